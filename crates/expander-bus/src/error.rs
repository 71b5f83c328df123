use embedded_hal::i2c::ErrorKind;

/// Errors that can occur during a bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The device could not be registered on the bus (address already
    /// attached, no free device slot, or unsupported clock speed).
    AttachFailed,
    /// The device did not answer within the transaction budget.
    Timeout,
    /// The device is present but did not acknowledge the read.
    Nack,
    /// Any other fault reported by the bus peripheral.
    Transfer,
    /// Expanders only ever produce 1 or 2 byte payloads.
    InvalidLength(usize),
}

impl From<ErrorKind> for BusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => BusError::Nack,
            _ => BusError::Transfer,
        }
    }
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BusError::AttachFailed => write!(f, "failed to attach device"),
            BusError::Timeout => write!(f, "bus transaction timed out"),
            BusError::Nack => write!(f, "device did not acknowledge"),
            BusError::Transfer => write!(f, "bus transfer fault"),
            BusError::InvalidLength(len) => {
                write!(f, "invalid read length: {}", len)
            }
        }
    }
}

/// Errors raised by the relay output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// The logical index has no mapped output line.
    InvalidIndex(usize),
    /// The pin driver rejected the level write.
    Pin,
}

impl core::fmt::Display for OutputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OutputError::InvalidIndex(index) => {
                write!(f, "invalid output line index: {}", index)
            }
            OutputError::Pin => write!(f, "output pin write failed"),
        }
    }
}

/// Errors raised when building or addressing the expander registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No expander is registered at this index.
    UnknownExpander(usize),
    /// The registry has no room left.
    Full,
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegistryError::UnknownExpander(index) => {
                write!(f, "unknown expander index: {}", index)
            }
            RegistryError::Full => write!(f, "expander registry is full"),
        }
    }
}
