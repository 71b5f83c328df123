use embassy_nrf::interrupt::Priority;
use embassy_nrf::peripherals::{self, WDT};
use embassy_nrf::Peri;

// nRF52840-DK bring-up wiring. The relay lines land on LED1..LED4, which
// are active-low, so a released relay shows as a lit LED.

pub struct TwimBusResources {
    pub twim: Peri<'static, peripherals::TWISPI1>,
    pub sda: Peri<'static, peripherals::P0_26>,
    pub scl: Peri<'static, peripherals::P0_27>,
}

impl TwimBusResources {
    /// # Safety
    ///
    /// Nothing else may hold the TWIM instance or its pins.
    pub unsafe fn steal() -> Self {
        Self {
            twim: peripherals::TWISPI1::steal(),
            sda: peripherals::P0_26::steal(),
            scl: peripherals::P0_27::steal(),
        }
    }
}

pub struct RelayResources {
    pub relay1: Peri<'static, peripherals::P0_13>,
    pub relay2: Peri<'static, peripherals::P0_14>,
    pub relay3: Peri<'static, peripherals::P0_15>,
    pub relay4: Peri<'static, peripherals::P0_16>,
}

pub struct RelayBoard {
    pub twim_bus_resources: TwimBusResources,
    pub relay_resources: RelayResources,
    pub wdt: Peri<'static, WDT>,
}

impl Default for RelayBoard {
    fn default() -> Self {
        let mut config = embassy_nrf::config::Config::default();
        config.gpiote_interrupt_priority = Priority::P2;
        config.time_interrupt_priority = Priority::P2;
        Self::new(config)
    }
}

impl RelayBoard {
    pub fn new(config: embassy_nrf::config::Config) -> Self {
        let p = embassy_nrf::init(config);

        Self {
            twim_bus_resources: TwimBusResources {
                twim: p.TWISPI1,
                sda: p.P0_26,
                scl: p.P0_27,
            },
            relay_resources: RelayResources {
                relay1: p.P0_13,
                relay2: p.P0_14,
                relay3: p.P0_15,
                relay4: p.P0_16,
            },
            wdt: p.WDT,
        }
    }
}
