//! Selection type for the mask editing engine.

use serde::{Deserialize, Serialize};

/// A selection over the value buffer: `start..end` slot offsets, collapsed
/// to a bare cursor when both are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A cursor with no selected range
    pub const fn collapsed(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Check if the selection is a bare cursor (start == end)
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Number of slots covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clamp both offsets into `0..=max`, keeping start <= end
    pub fn clamp_to(&self, max: usize) -> Self {
        let start = self.start.min(max);
        let end = self.end.min(max).max(start);
        Self { start, end }
    }
}
