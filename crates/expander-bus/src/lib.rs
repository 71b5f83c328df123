#![cfg_attr(not(test), no_std)]
//! Bus sessions, payload decoding and the poll cycle for PCF857x I/O
//! expanders, plus the relay output table.
//!
//! One [`BusSessionManager`] owns the bus. Each read attaches the device,
//! transfers, and detaches it again through a [`DeviceSession`] guard.
//! [`poll_all`] walks an [`ExpansionRegistry`] in order and decodes every
//! reading into a [`LineState`].

mod fmt;

mod bus;
mod config;
mod decode;
mod descriptor;
mod error;
mod factory;
mod manager;
mod output;
mod registry;
mod session;

pub use bus::{AttachedDevice, DeviceSlots, ExpanderBus, I2cExpanderBus};
pub use config::{
    BusConfig, ClockSource, PollConfig, CYCLE_DELAY_MS, GLITCH_FILTER_CYCLES,
    INTER_READ_DELAY_MS, TRANSACTION_TIMEOUT_MS,
};
pub use decode::{decode, LineState};
pub use descriptor::{
    AddressWidth, DeviceDescriptor, ExpanderDescriptor, ExpanderWidth,
    RawReading, DS3231_ADDR, PCF8574_ADDR, PCF8575_ADDR, STANDARD_MODE_HZ,
};
pub use error::{BusError, OutputError, RegistryError};
pub use factory::BusFactory;
pub use manager::BusSessionManager;
pub use output::{OutputLineController, RELAY_COUNT};
pub use registry::{
    poll_all, poll_one, CycleSummary, ExpansionRegistry, NoopSink, PollEvent,
    PollOutcome, PollResults, PollSink, DEFAULT_EXPANDERS, MAX_EXPANDERS,
};
pub use session::DeviceSession;
