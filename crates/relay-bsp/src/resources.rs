use crate::board::{RelayResources, TwimBusResources};
use embassy_nrf::{
    bind_interrupts,
    gpio::{AnyPin, Level, Output, OutputDrive},
    interrupt::{self, InterruptExt},
    peripherals, twim, Peri,
};
use expander_bus::{
    BusConfig, BusFactory, ClockSource, I2cExpanderBus, OutputLineController,
    RELAY_COUNT,
};
use grounded::uninit::GroundedArrayCell;

/// Expander bus backed by TWIM1.
pub type TwimExpanderBus = I2cExpanderBus<twim::Twim<'static>>;

/// Relay table driven from plain GPIO outputs.
pub type Relays = OutputLineController<Output<'static>, RELAY_COUNT>;

/// Bus settings the TWIM peripheral cannot honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwimConfigError {
    /// TWIM always runs from the HF peripheral clock.
    UnsupportedClockSource(ClockSource),
    /// TWIM only supports 100, 250 and 400 kHz.
    UnsupportedFrequency(u32),
}

/// Destructor token for recovering TWIM1 peripheral resources.
pub struct TwimDestructor;

/// Factory for creating the expander bus from TWIM1 peripheral resources.
pub struct TwimFactory;

/// DMA buffer for TWIM operations, stored in a sound `GroundedArrayCell`.
static TWIM_DMA_BUF: GroundedArrayCell<u8, 32> =
    GroundedArrayCell::const_init();

bind_interrupts!(struct TwimIrqs {
    TWISPI1 => twim::InterruptHandler<peripherals::TWISPI1>;
});

fn twim_config(config: &BusConfig) -> Result<twim::Config, TwimConfigError> {
    if config.clock_source != ClockSource::Default {
        return Err(TwimConfigError::UnsupportedClockSource(
            config.clock_source,
        ));
    }
    let frequency = match config.frequency_hz {
        100_000 => twim::Frequency::K100,
        250_000 => twim::Frequency::K250,
        400_000 => twim::Frequency::K400,
        hz => return Err(TwimConfigError::UnsupportedFrequency(hz)),
    };

    let mut twim_config = twim::Config::default();
    twim_config.frequency = frequency;
    twim_config.sda_pullup = config.internal_pullups;
    twim_config.scl_pullup = config.internal_pullups;
    Ok(twim_config)
}

impl BusFactory for TwimFactory {
    type Bus = TwimExpanderBus;
    type Resources = TwimBusResources;
    type Destructor = TwimDestructor;
    type Error = TwimConfigError;

    fn create(
        resources: Self::Resources,
        config: &BusConfig,
    ) -> Result<(Self::Bus, Self::Destructor), (Self::Error, Self::Resources)>
    {
        let twim_config = match twim_config(config) {
            Ok(c) => c,
            Err(e) => return Err((e, resources)),
        };
        // The TWIM input filter is fixed in silicon.
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ignoring glitch filter of {} cycles",
            config.glitch_filter_cycles
        );
        interrupt::TWISPI1.set_priority(interrupt::Priority::P3);

        // SAFETY: create only runs while no bus exists, and recover runs only
        // after the previous bus was dropped, so no live reference to this
        // buffer remains. The static is `const_init` so it is zeroed.
        let buf: &'static mut [u8; 32] =
            unsafe { &mut *(TWIM_DMA_BUF.as_mut_ptr() as *mut [u8; 32]) };

        let twim = twim::Twim::new(
            resources.twim,
            TwimIrqs,
            resources.sda,
            resources.scl,
            twim_config,
            buf,
        );

        Ok((I2cExpanderBus::new(twim, config.frequency_hz), TwimDestructor))
    }

    fn recover(_destructor: Self::Destructor) -> Self::Resources {
        // SAFETY: the session manager drops the bus before calling recover,
        // so nothing else holds these peripherals.
        unsafe { TwimBusResources::steal() }
    }
}

impl RelayResources {
    /// Claim the relay pins as outputs, all driven low.
    pub fn configure(self) -> Relays {
        let output = |pin: Peri<'static, AnyPin>| {
            Output::new(pin, Level::Low, OutputDrive::Standard)
        };
        OutputLineController::new([
            output(self.relay1.into()),
            output(self.relay2.into()),
            output(self.relay3.into()),
            output(self.relay4.into()),
        ])
    }
}
