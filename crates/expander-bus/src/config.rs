//! Bus and poll-cycle configuration.

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::descriptor::STANDARD_MODE_HZ;

/// Per-transaction read budget.
pub const TRANSACTION_TIMEOUT_MS: u64 = 1000;
/// Settling pause between two expanders of the same cycle.
pub const INTER_READ_DELAY_MS: u64 = 100;
/// Pause between two complete poll cycles.
pub const CYCLE_DELAY_MS: u64 = 200;
/// SDA/SCL glitch filter length, in source clock cycles.
pub const GLITCH_FILTER_CYCLES: u8 = 7;

/// Clock feeding the bus peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Whatever the platform picks for its I2C block.
    #[default]
    Default,
    /// Crystal oscillator.
    Xtal,
    /// Peripheral bus clock.
    Apb,
}

/// Parameters for bringing the bus up. Pins travel with the factory resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    pub clock_source: ClockSource,
    pub glitch_filter_cycles: u8,
    pub internal_pullups: bool,
    pub frequency_hz: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            clock_source: ClockSource::Default,
            glitch_filter_cycles: GLITCH_FILTER_CYCLES,
            internal_pullups: true,
            frequency_hz: STANDARD_MODE_HZ,
        }
    }
}

/// Timing of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollConfig {
    pub timeout_ms: u64,
    pub inter_read_delay_ms: u64,
    pub cycle_delay_ms: u64,
}

impl PollConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn inter_read_delay(&self) -> Duration {
        Duration::from_millis(self.inter_read_delay_ms)
    }

    pub fn cycle_delay(&self) -> Duration {
        Duration::from_millis(self.cycle_delay_ms)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout_ms: TRANSACTION_TIMEOUT_MS,
            inter_read_delay_ms: INTER_READ_DELAY_MS,
            cycle_delay_ms: CYCLE_DELAY_MS,
        }
    }
}
