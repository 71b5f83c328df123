#![no_std]
//! Board support for the expander relay controller.
//!
//! Splits the nRF52840 peripherals into per-function resource groups and
//! provides the TWIM-backed [`expander_bus::BusFactory`] used by the app.

// Modules
mod board;
mod resources;

// Flatten
pub use board::*;
pub use resources::*;
