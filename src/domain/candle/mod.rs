//! Candle domain — price points, feed messages, series merging.

mod convert;
pub mod sample;
pub mod state;
pub mod wire;

use crate::error::ValidationError;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub use state::{BarBoundary, MergeOutcome, PriceSeries, ValidationMode};

/// The four prices summarizing one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Check `high ≥ max(open, close)` and `low ≤ min(open, close)`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field });
            }
        }

        let body_top = self.open.max(self.close);
        if self.high < body_top {
            return Err(ValidationError::HighBelowBody {
                high: self.high,
                body_top,
            });
        }

        let body_bottom = self.open.min(self.close);
        if self.low > body_bottom {
            return Err(ValidationError::LowAboveBody {
                low: self.low,
                body_bottom,
            });
        }

        Ok(())
    }
}

/// One bar of the displayed series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// ISO-like timestamp as delivered by the feed.
    pub timestamp: String,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: impl Into<String>, ohlc: Ohlc) -> Self {
        Self {
            timestamp: timestamp.into(),
            high: ohlc.high,
            low: ohlc.low,
            open: ohlc.open,
            close: ohlc.close,
        }
    }

    pub fn ohlc(&self) -> Ohlc {
        Ohlc::new(self.open, self.high, self.low, self.close)
    }

    /// Overwrite the prices, keeping the bar's timestamp.
    pub fn set_ohlc(&mut self, ohlc: Ohlc) {
        self.open = ohlc.open;
        self.high = ohlc.high;
        self.low = ohlc.low;
        self.close = ohlc.close;
    }

    /// Wall-clock time of the bar, if the timestamp parses.
    pub fn wall_clock(&self) -> Option<NaiveDateTime> {
        convert::parse_wall_clock(&self.timestamp)
    }

    /// Minute-of-hour of the bar's wall-clock time.
    pub fn minute(&self) -> Option<u32> {
        self.wall_clock().map(|t| t.minute())
    }

    /// Axis label (`HH:MM`), or the raw timestamp when it does not parse.
    pub fn label(&self) -> String {
        match self.wall_clock() {
            Some(t) => t.format("%H:%M").to_string(),
            None => self.timestamp.clone(),
        }
    }
}

/// A point in the shape the charting library consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub label: String,
    pub high: f64,
    pub low: f64,
    #[serde(rename = "openClose")]
    pub open_close: [f64; 2],
}

impl ChartPoint {
    pub fn open(&self) -> f64 {
        self.open_close[0]
    }

    pub fn close(&self) -> f64 {
        self.open_close[1]
    }

    pub fn ohlc(&self) -> Ohlc {
        Ohlc::new(self.open(), self.high, self.low, self.close())
    }
}

impl From<&PricePoint> for ChartPoint {
    fn from(p: &PricePoint) -> Self {
        Self {
            name: p.timestamp.clone(),
            label: p.label(),
            high: p.high,
            low: p.low,
            open_close: [p.open, p.close],
        }
    }
}
