//! Brush window — the visible index range over the x-axis.

use crate::error::ChartError;
use serde::{Deserialize, Serialize};

/// Inclusive index range, as reported by the library's brush change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrushRange {
    pub start_index: usize,
    pub end_index: usize,
}

impl BrushRange {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    /// The range covering all `len` points, or `None` for an empty series.
    pub fn full(len: usize) -> Option<Self> {
        len.checked_sub(1).map(|end| Self::new(0, end))
    }

    pub fn validate(&self, len: usize) -> Result<(), ChartError> {
        if self.start_index > self.end_index || self.end_index >= len {
            return Err(ChartError::InvalidBrush {
                start: self.start_index,
                end: self.end_index,
                len,
            });
        }
        Ok(())
    }

    /// Number of indices covered.
    pub fn width(&self) -> usize {
        self.end_index.saturating_sub(self.start_index) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }

    /// The covered items, clamped to what `items` actually holds.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start_index.min(items.len());
        let end = self.end_index.saturating_add(1).min(items.len()).max(start);
        &items[start..end]
    }
}
