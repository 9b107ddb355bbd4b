//! Renderer seam — the shape-drawing callback invoked once per visible bar.

use super::brush::BrushRange;
use super::geometry::{bar_geometry, BarGeometry, BarStyle};
use super::layout::PlotArea;
use super::scale::ValueDomain;
use crate::domain::candle::ChartPoint;

/// Receives the primitives for each visible bar.
///
/// `index` is the bar's position in the full series, not in the window.
pub trait BarRenderer {
    fn draw_bar(&mut self, index: usize, point: &ChartPoint, geometry: &BarGeometry);
}

impl BarRenderer for Vec<BarGeometry> {
    fn draw_bar(&mut self, _index: usize, _point: &ChartPoint, geometry: &BarGeometry) {
        self.push(*geometry);
    }
}

/// Lay out and draw the bars inside `window`.
///
/// The domain must already be computed from the full series; this pass only
/// reads it.
pub fn render_window<R: BarRenderer>(
    points: &[ChartPoint],
    window: BrushRange,
    domain: &ValueDomain,
    area: &PlotArea,
    style: &BarStyle,
    renderer: &mut R,
) {
    let visible = window.slice(points);
    let offset = window.start_index;

    for (slot, point) in visible.iter().enumerate() {
        let ohlc = point.ohlc();
        let bounds = area.bar_box(slot, visible.len(), &ohlc, domain);
        let geometry = bar_geometry(&bounds, &ohlc, domain, area.height, style);
        renderer.draw_bar(offset + slot, point, &geometry);
    }
}
