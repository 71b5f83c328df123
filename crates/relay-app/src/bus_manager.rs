//! Expander bus manager for the TWIM1 peripheral on nRF52840.

use expander_bus::BusSessionManager;
use relay_bsp::TwimFactory;

/// Session manager owning the expander bus.
pub type ExpanderBusManager = BusSessionManager<TwimFactory>;
