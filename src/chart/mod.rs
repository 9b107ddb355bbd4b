//! Chart layer — scale, layout, bar geometry, brush, tooltip, renderer seam.
//!
//! Rendering is an explicit two-pass pipeline: the [`ValueDomain`] is computed
//! once from the whole series, then each visible bar is laid out and turned
//! into drawing primitives.

pub mod brush;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod scale;
pub mod tooltip;

pub use brush::BrushRange;
pub use geometry::{bar_geometry, BarBox, BarColor, BarGeometry, BarKind, BarStyle, BodyRect, WickLine};
pub use layout::PlotArea;
pub use render::{render_window, BarRenderer};
pub use scale::{ScaleMargins, ValueDomain};
pub use tooltip::Tooltip;
