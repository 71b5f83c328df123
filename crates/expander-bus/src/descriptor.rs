//! Device and expander descriptors.

use crate::error::BusError;

/// PCF8574 8-line expander address (A2..A0 = 0).
pub const PCF8574_ADDR: u8 = 0x20;
/// PCF8575 16-line expander address (A2..A0 = 1).
pub const PCF8575_ADDR: u8 = 0x27;
/// DS3231 real-time clock. Reserved on the bus, not polled.
pub const DS3231_ADDR: u8 = 0x68;

/// Standard-mode I2C clock.
pub const STANDARD_MODE_HZ: u32 = 100_000;

const MAX_SEVEN_BIT_ADDR: u8 = 0x7F;

/// Addressing mode used when registering a device on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressWidth {
    #[default]
    SevenBit,
}

/// Everything the bus needs to talk to one physical device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceDescriptor {
    address: u8,
    address_width: AddressWidth,
    clock_speed_hz: u32,
}

impl DeviceDescriptor {
    /// Describe a 7-bit device. Returns `None` for addresses above `0x7F`.
    pub const fn new(address: u8, clock_speed_hz: u32) -> Option<Self> {
        if address > MAX_SEVEN_BIT_ADDR {
            return None;
        }
        Some(Self {
            address,
            address_width: AddressWidth::SevenBit,
            clock_speed_hz,
        })
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    pub const fn address_width(&self) -> AddressWidth {
        self.address_width
    }

    pub const fn clock_speed_hz(&self) -> u32 {
        self.clock_speed_hz
    }
}

/// Width of an expander port.
///
/// Carries both the number of I/O lines and the number of bytes a plain
/// read returns, so callers never derive one from the other by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpanderWidth {
    /// PCF8574 style, one port byte.
    Width8,
    /// PCF8575 style, two port bytes (P0x first, then P1x).
    Width16,
}

impl ExpanderWidth {
    pub const fn line_count(self) -> usize {
        match self {
            Self::Width8 => 8,
            Self::Width16 => 16,
        }
    }

    pub const fn byte_count(self) -> usize {
        match self {
            Self::Width8 => 1,
            Self::Width16 => 2,
        }
    }

    pub const fn from_line_count(lines: usize) -> Option<Self> {
        match lines {
            8 => Some(Self::Width8),
            16 => Some(Self::Width16),
            _ => None,
        }
    }
}

/// One entry of the expansion registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExpanderDescriptor {
    pub device: DeviceDescriptor,
    pub width: ExpanderWidth,
    pub label: &'static str,
}

impl ExpanderDescriptor {
    pub const fn new(
        device: DeviceDescriptor,
        width: ExpanderWidth,
        label: &'static str,
    ) -> Self {
        Self { device, width, label }
    }

    pub const fn line_count(&self) -> usize {
        self.width.line_count()
    }
}

/// Bytes returned by a single expander read.
///
/// Lives for one transaction only; the poll cycle decodes it immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawReading {
    bytes: [u8; 2],
    len: u8,
}

impl RawReading {
    pub fn new(bytes: &[u8]) -> Result<Self, BusError> {
        match *bytes {
            [b0] => Ok(Self { bytes: [b0, 0], len: 1 }),
            [b0, b1] => Ok(Self { bytes: [b0, b1], len: 2 }),
            _ => Err(BusError::InvalidLength(bytes.len())),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Little-endian port word: first byte is lines 0..8.
    pub fn word(&self) -> u16 {
        u16::from_le_bytes(self.bytes)
    }
}
