//! Band layout of bars inside the plot area.
//!
//! Mirrors what the charting library does before it calls the shape callback:
//! one slot per visible bar, and a ranged `[open, close]` bar whose `y` sits at
//! the close and whose signed height reaches down to the open.

use super::geometry::BarBox;
use super::scale::ValueDomain;
use crate::domain::candle::Ohlc;

/// Pixel rectangle the bars are drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Fraction of each slot left empty between bars.
    pub bar_gap: f64,
}

impl PlotArea {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            bar_gap: 0.1,
        }
    }

    pub fn with_bar_gap(mut self, bar_gap: f64) -> Self {
        self.bar_gap = bar_gap.clamp(0.0, 1.0);
        self
    }

    /// Vertical pixel for a value; the domain maximum maps to the top edge.
    pub fn value_to_pixel(&self, value: f64, domain: &ValueDomain) -> f64 {
        self.y + (domain.max - value) / domain.span() * self.height
    }

    /// Bounding box for the bar in `slot` out of `slots`.
    pub fn bar_box(&self, slot: usize, slots: usize, ohlc: &Ohlc, domain: &ValueDomain) -> BarBox {
        let slot_width = self.width / slots.max(1) as f64;
        let bar_width = slot_width * (1.0 - self.bar_gap);
        let close_px = self.value_to_pixel(ohlc.close, domain);
        let open_px = self.value_to_pixel(ohlc.open, domain);

        BarBox {
            x: self.x + slot as f64 * slot_width + (slot_width - bar_width) / 2.0,
            y: close_px,
            width: bar_width,
            height: open_px - close_px,
        }
    }
}
