//! Raw port bytes to per-line states.

use crate::descriptor::{ExpanderWidth, RawReading};

/// Level of every line of one expander, as read in one poll.
///
/// Line `i` is bit `i` of the little-endian port word: lines 0..8 come from
/// the first byte, lines 8..16 from the second. High reads as `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineState {
    bits: u16,
    width: ExpanderWidth,
}

impl LineState {
    pub fn len(&self) -> usize {
        self.width.line_count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn width(&self) -> ExpanderWidth {
        self.width
    }

    /// State of line `index`, `None` past the expander width.
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.len()).then(|| (self.bits >> index) & 1 == 1)
    }

    /// Port word with unused high lines cleared.
    pub fn raw(&self) -> u16 {
        self.bits
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| (self.bits >> i) & 1 == 1)
    }

    /// Number of lines reading high.
    pub fn count_high(&self) -> u32 {
        self.bits.count_ones()
    }
}

/// Turn a raw reading into line states. Pure, no failure path.
///
/// Bytes beyond the width are ignored; a short reading leaves the missing
/// lines low. The poll cycle always reads `width.byte_count()` bytes.
pub fn decode(raw: &RawReading, width: ExpanderWidth) -> LineState {
    let bits = raw
        .as_bytes()
        .iter()
        .take(width.byte_count())
        .enumerate()
        .fold(0u16, |acc, (i, byte)| acc | (u16::from(*byte) << (8 * i)));
    LineState { bits, width }
}
