use embassy_nrf::interrupt::Priority;
use embassy_nrf::peripherals::{self, WDT};
use embassy_nrf::Peri;

/// Two-wire bus shared by the I/O expanders and the RTC.
pub struct TwimBusResources {
    pub twim: Peri<'static, peripherals::TWISPI1>,
    pub sda: Peri<'static, peripherals::P0_21>,
    pub scl: Peri<'static, peripherals::P0_22>,
}

impl TwimBusResources {
    /// Rebuild the bus resources from the raw peripherals.
    ///
    /// # Safety
    ///
    /// Nothing else may hold the TWIM instance or its pins.
    pub unsafe fn steal() -> Self {
        Self {
            twim: peripherals::TWISPI1::steal(),
            sda: peripherals::P0_21::steal(),
            scl: peripherals::P0_22::steal(),
        }
    }
}

/// Relay driver inputs, in logical relay order.
pub struct RelayResources {
    pub relay1: Peri<'static, peripherals::P0_15>,
    pub relay2: Peri<'static, peripherals::P0_16>,
    pub relay3: Peri<'static, peripherals::P0_17>,
    pub relay4: Peri<'static, peripherals::P0_18>,
}

/// Peripherals of the r1 relay controller board.
pub struct RelayBoard {
    /// Expander bus.
    pub twim_bus_resources: TwimBusResources,
    /// Relay outputs.
    pub relay_resources: RelayResources,
    /// Watchdog Timer.
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
    /// Create a new instance based on HAL configuration
    pub fn new(config: embassy_nrf::config::Config) -> Self {
        let p = embassy_nrf::init(config);

        Self {
            twim_bus_resources: TwimBusResources {
                twim: p.TWISPI1,
                sda: p.P0_21,
                scl: p.P0_22,
            },
            relay_resources: RelayResources {
                relay1: p.P0_15,
                relay2: p.P0_16,
                relay3: p.P0_17,
                relay4: p.P0_18,
            },
            wdt: p.WDT,
        }
    }
}
