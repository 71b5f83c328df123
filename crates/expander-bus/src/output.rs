//! Relay outputs driven directly from MCU pins.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::OutputError;

/// Number of relay lines on the board.
pub const RELAY_COUNT: usize = 4;

/// Fixed table from logical relay index to physical output pin.
///
/// The table is built once from the configured pins and never reordered.
/// Writes are not read back.
pub struct OutputLineController<P, const N: usize = RELAY_COUNT> {
    lines: [P; N],
}

impl<P: OutputPin, const N: usize> OutputLineController<P, N> {
    pub fn new(lines: [P; N]) -> Self {
        Self { lines }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Drive a single relay. Out-of-range indices write nothing.
    pub fn set_line(
        &mut self,
        index: usize,
        level: bool,
    ) -> Result<(), OutputError> {
        let line =
            self.lines.get_mut(index).ok_or(OutputError::InvalidIndex(index))?;
        line.set_state(PinState::from(level)).map_err(|_| OutputError::Pin)
    }

    /// Drive every relay to the same level.
    ///
    /// Every line is written even if an earlier write fails; the first
    /// failure is reported.
    pub fn set_all(&mut self, level: bool) -> Result<(), OutputError> {
        let mut result = Ok(());
        for line in self.lines.iter_mut() {
            if line.set_state(PinState::from(level)).is_err() && result.is_ok()
            {
                result = Err(OutputError::Pin);
            }
        }
        result
    }

    pub fn into_inner(self) -> [P; N] {
        self.lines
    }
}
