//! Bar geometry — the body rectangle and wick line for one candlestick.

use super::scale::ValueDomain;
use crate::domain::candle::Ohlc;
use serde::{Deserialize, Serialize};

/// CSS colour of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    Green,
    Red,
    Gray,
}

impl BarColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
            Self::Gray => "gray",
        }
    }
}

impl std::fmt::Display for BarColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarKind {
    Rising,
    Falling,
    Doji,
}

/// Pixel box the library assigns to a bar. `height` is signed: negative for a
/// falling bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Fixed sizes used when drawing bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStyle {
    /// Body height of a doji marker, in pixels.
    pub doji_height: f64,
    /// Fraction of the value span used as the doji reference size.
    pub doji_reference: f64,
    pub wick_width: f64,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            doji_height: 1.0,
            doji_reference: 0.01,
            wick_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WickLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: BarColor,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: BarColor,
}

/// Drawing primitives for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub kind: BarKind,
    pub wick: WickLine,
    pub body: BodyRect,
}

/// Compute the wick and body of one bar.
///
/// `plot_height` is the pixel height of the plot background; together with the
/// domain it gives the pixels-per-value ratio used for doji bars, whose own
/// body carries no usable scale.
///
/// Never fails: any coordinate that comes out non-finite (NaN prices, a
/// zero-width domain) is drawn at 0.
pub fn bar_geometry(
    bounds: &BarBox,
    ohlc: &Ohlc,
    domain: &ValueDomain,
    plot_height: f64,
    style: &BarStyle,
) -> BarGeometry {
    let Ohlc {
        open,
        high,
        low,
        close,
    } = *ohlc;

    let is_growing = bounds.height >= 0.0;
    let is_doji = bounds.height == 0.0 || open == close;

    let kind = if is_doji {
        BarKind::Doji
    } else if is_growing {
        BarKind::Rising
    } else {
        BarKind::Falling
    };

    let color = match kind {
        BarKind::Doji => BarColor::Gray,
        BarKind::Rising => BarColor::Green,
        BarKind::Falling => BarColor::Red,
    };

    let body_height = match kind {
        BarKind::Doji => style.doji_height,
        _ => bounds.height.abs(),
    };

    let ratio = if is_doji {
        let doji_size = plot_height * (style.doji_reference / domain.span());
        (doji_size / style.doji_reference).abs()
    } else {
        (body_height / (open - close)).abs()
    };

    let wick_x = bounds.x + bounds.width / 2.0;
    let body_top = if is_growing {
        bounds.y
    } else {
        bounds.y - body_height
    };
    let wick_top = if is_growing {
        bounds.y + body_height + (open - high) * ratio
    } else {
        bounds.y - body_height + (open - high) * ratio
    };
    let wick_bottom = bounds.y + (close - low) * ratio;

    BarGeometry {
        kind,
        wick: WickLine {
            x1: finite_or_zero(wick_x),
            y1: finite_or_zero(wick_top),
            x2: finite_or_zero(wick_x),
            y2: finite_or_zero(wick_bottom),
            stroke: color,
            stroke_width: style.wick_width,
        },
        body: BodyRect {
            x: finite_or_zero(bounds.x),
            y: finite_or_zero(body_top),
            width: finite_or_zero(bounds.width),
            height: finite_or_zero(body_height),
            fill: color,
        },
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
