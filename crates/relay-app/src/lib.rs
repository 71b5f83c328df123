#![no_std]

mod bus_manager;
pub mod sink;
pub mod tasks;
#[doc(hidden)]
pub mod util;

pub const HW_VERSION: &str = env!("HW_VERSION");
pub const FW_VERSION: &str = env!("FW_VERSION");

pub mod prelude {
    pub use super::{
        bus_manager::*, debug, error, info, sink::*, tasks::*, unwrap, warn,
        FW_VERSION, HW_VERSION,
    };
    pub use embassy_executor::Spawner;
    pub use embassy_time::{Duration, Timer};

    pub use expander_bus::{
        BusConfig, ExpansionRegistry, PollConfig, DS3231_ADDR,
    };
    pub use relay_bsp::{RelayBoard, RelayResources, Relays, TwimBusResources};
}
