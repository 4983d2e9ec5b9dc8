use serde::{Deserialize, Serialize};

use crate::utils::constants::{DEFAULT_VISIBLE_END, DEFAULT_VISIBLE_START};

/// Half-open index range `[start, end)` into the filtered view.
///
/// Signed so that callers may hand over ranges that start before the first
/// row; slicing clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRange {
    pub start: i64,
    pub end: i64,
}

impl VisibleRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Expand by `buffer` on both sides and clamp to `[0, len]`.
    ///
    /// The returned bounds always satisfy `start <= end <= len`.
    pub fn buffered_bounds(&self, buffer: usize, len: usize) -> (usize, usize) {
        let buffer = i64::try_from(buffer).unwrap_or(i64::MAX);
        let len_i = i64::try_from(len).unwrap_or(i64::MAX);

        let start = self.start.saturating_sub(buffer).clamp(0, len_i);
        let end = self.end.saturating_add(buffer).clamp(0, len_i);

        // Clamped values lie in [0, len] so the casts are lossless.
        let start = start as usize;
        let end = end as usize;
        (start.min(end), end)
    }
}

impl Default for VisibleRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_VISIBLE_START,
            end: DEFAULT_VISIBLE_END,
        }
    }
}
