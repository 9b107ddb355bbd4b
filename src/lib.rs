//! # candle-chart
//!
//! Live candlestick chart state for a single instrument: merges a streaming
//! price feed into a bar series and computes everything a charting library
//! needs to draw it.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Newtypes, the candle domain slice (types, wire types, merge state)
//! 2. **Chart** — Value domain, plot layout, bar geometry, brush, tooltip
//! 3. **Feed** — `PriceFeed` trait, scoped `Subscription` handle, in-process `ChannelFeed`
//! 4. **View** — `ChartView` tying one series, brush and subscription together
//! 5. **Bindings** — `JsChart` for the browser (`wasm` feature)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use candle_chart::prelude::*;
//!
//! let feed = ChannelFeed::new();
//! let mut view = ChartView::builder().symbol("PETR4").build()?;
//! view.mount(&feed).await?;
//!
//! while let Some(update) = view.next_update().await {
//!     update?;
//!     let mut bars: Vec<BarGeometry> = Vec::new();
//!     view.render(&PlotArea::new(0.0, 0.0, 800.0, 400.0), &mut bars);
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Crate error types.
pub mod error;

// ── Layer 2: Chart ───────────────────────────────────────────────────────────

/// Scale, layout, geometry and the renderer seam.
pub mod chart;

// ── Layer 3: Feed ────────────────────────────────────────────────────────────

/// Feed subscriptions.
pub mod feed;

// ── Layer 4: View ────────────────────────────────────────────────────────────

/// `ChartView` — the primary entry point.
pub mod view;

// ── Layer 5: Bindings ────────────────────────────────────────────────────────

#[cfg(feature = "wasm")]
pub mod wasm;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Resolution, Symbol};

    // Domain types — candle
    pub use crate::domain::candle::wire::{FeedMessage, Snapshot, WireBar};
    pub use crate::domain::candle::{
        BarBoundary, ChartPoint, MergeOutcome, Ohlc, PricePoint, PriceSeries, ValidationMode,
    };

    // Chart
    pub use crate::chart::{
        bar_geometry, render_window, BarBox, BarColor, BarGeometry, BarKind, BarRenderer,
        BarStyle, BodyRect, BrushRange, PlotArea, ScaleMargins, Tooltip, ValueDomain, WickLine,
    };

    // Errors
    pub use crate::error::{ChartError, FeedError, ValidationError};

    // Feed
    pub use crate::feed::{ChannelFeed, FeedEvent, PriceFeed, Subscription};

    // View
    pub use crate::view::{ChartConfig, ChartView, ChartViewBuilder};
}
