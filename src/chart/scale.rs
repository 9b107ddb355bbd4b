//! Value domain (y-axis scale) computed from the full series.

use crate::domain::candle::PricePoint;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed margins applied around the series extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleMargins {
    /// Multiplier for the lowest value.
    pub lower: f64,
    /// Multiplier for the highest value.
    pub upper: f64,
    /// Decimal places the bounds are rounded to.
    pub decimals: u32,
}

impl Default for ScaleMargins {
    fn default() -> Self {
        Self {
            lower: 0.992,
            upper: 1.012,
            decimals: 2,
        }
    }
}

/// The `[dataMin, dataMax]` value range of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    #[serde(rename = "dataMin")]
    pub min: f64,
    #[serde(rename = "dataMax")]
    pub max: f64,
}

impl ValueDomain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A domain with no usable bounds. Geometry computed against it collapses
    /// to 0 instead of failing.
    pub fn undefined() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    /// Domain over arbitrary values; non-finite values are skipped.
    ///
    /// Returns `None` when no finite value remains.
    pub fn from_values(values: impl IntoIterator<Item = f64>, margins: &ScaleMargins) -> Option<Self> {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        Some(Self {
            min: round_to(lo * margins.lower, margins.decimals)?,
            max: round_to(hi * margins.upper, margins.decimals)?,
        })
    }

    /// Domain over the open and close values the bars plot.
    pub fn from_points(points: &[PricePoint], margins: &ScaleMargins) -> Option<Self> {
        Self::from_values(points.iter().flat_map(|p| [p.open, p.close]), margins)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Round half away from zero on the exact binary value, like `toFixed`.
fn round_to(value: f64, decimals: u32) -> Option<f64> {
    Decimal::from_f64_retain(value)?
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
}
