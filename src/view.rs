//! `ChartView` — one mounted chart: its series, brush window and feed
//! subscription.
//!
//! The view is single-owner state. It is mutated only by the task that owns
//! it, either by awaiting [`ChartView::next_update`] or by draining buffered
//! events once per frame with [`ChartView::drain_pending`].

use crate::chart::{
    bar_geometry, render_window, BarBox, BarGeometry, BarRenderer, BarStyle, BrushRange,
    PlotArea, ScaleMargins, Tooltip, ValueDomain,
};
use crate::domain::candle::sample::sample_points;
use crate::domain::candle::wire::FeedMessage;
use crate::domain::candle::{BarBoundary, ChartPoint, MergeOutcome, Ohlc, PriceSeries, ValidationMode};
use crate::error::ChartError;
use crate::feed::{FeedEvent, PriceFeed, Subscription};
use crate::shared::Symbol;

/// Configuration for a chart view.
#[derive(Debug, Clone, Default)]
pub struct ChartConfig {
    pub symbol: Symbol,
    pub scale: ScaleMargins,
    pub style: BarStyle,
    pub boundary: BarBoundary,
    pub validation: ValidationMode,
}

pub struct ChartView {
    config: ChartConfig,
    series: PriceSeries,
    brush: Option<BrushRange>,
    subscription: Option<Subscription>,
}

impl ChartView {
    pub fn builder() -> ChartViewBuilder {
        ChartViewBuilder::default()
    }

    /// An unmounted view with an empty series.
    pub fn new(config: ChartConfig) -> Self {
        let series = PriceSeries::new()
            .with_boundary(config.boundary)
            .with_validation(config.validation);
        Self {
            config,
            series,
            brush: None,
            subscription: None,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    // ── Feed lifecycle ───────────────────────────────────────────────────

    /// Subscribe to the configured symbol.
    ///
    /// A view that is already mounted releases its previous subscription first.
    pub async fn mount<F: PriceFeed>(&mut self, feed: &F) -> Result<(), ChartError> {
        self.teardown();
        let subscription = feed.subscribe(&self.config.symbol).await?;
        tracing::info!("Chart mounted on {}", self.config.symbol);
        self.subscription = Some(subscription);
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Release the feed subscription. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
            tracing::info!("Chart on {} torn down", self.config.symbol);
        }
    }

    /// Wait for the next feed event and merge it.
    ///
    /// Returns `None` when the view is not mounted or the feed closed; a closed
    /// feed also unmounts the view.
    pub async fn next_update(&mut self) -> Option<Result<MergeOutcome, ChartError>> {
        let event = self.subscription.as_mut()?.recv().await;
        self.handle_event(event)
    }

    /// Merge every event already buffered, without waiting.
    ///
    /// Returns the outcomes of the messages that merged; failures are logged.
    pub fn drain_pending(&mut self) -> Vec<MergeOutcome> {
        let mut outcomes = Vec::new();
        loop {
            let Some(subscription) = self.subscription.as_mut() else {
                break;
            };
            let Some(event) = subscription.try_recv() else {
                break;
            };
            match self.handle_event(Some(event)) {
                Some(Ok(outcome)) => outcomes.push(outcome),
                Some(Err(e)) => tracing::warn!("Dropped feed update for {}: {}", self.config.symbol, e),
                None => break,
            }
        }
        outcomes
    }

    fn handle_event(&mut self, event: Option<FeedEvent>) -> Option<Result<MergeOutcome, ChartError>> {
        match event {
            Some(FeedEvent::Message(message)) => Some(self.apply(message)),
            Some(FeedEvent::Error(e)) => {
                tracing::warn!("Feed error for {}: {}", self.config.symbol, e);
                Some(Err(e.into()))
            }
            Some(FeedEvent::Closed) | None => {
                tracing::warn!("Feed for {} closed", self.config.symbol);
                self.teardown();
                None
            }
        }
    }

    /// Merge one message into the series.
    ///
    /// A snapshot resets the brush to the full series.
    pub fn apply(&mut self, message: FeedMessage) -> Result<MergeOutcome, ChartError> {
        let outcome = self.series.apply(message)?;
        if matches!(outcome, MergeOutcome::Replaced { .. }) {
            self.brush = None;
        }
        Ok(outcome)
    }

    /// Decode raw feed text and merge it.
    pub fn apply_json(&mut self, text: &str) -> Result<MergeOutcome, ChartError> {
        let message = FeedMessage::from_json(text)?;
        self.apply(message)
    }

    // ── Brush ────────────────────────────────────────────────────────────

    /// The visible window; the full series when no brush is set.
    pub fn brush(&self) -> Option<BrushRange> {
        self.brush.or_else(|| BrushRange::full(self.series.len()))
    }

    pub fn set_brush(&mut self, range: BrushRange) -> Result<(), ChartError> {
        range.validate(self.series.len())?;
        self.brush = Some(range);
        Ok(())
    }

    pub fn reset_brush(&mut self) {
        self.brush = None;
    }

    // ── Rendering ────────────────────────────────────────────────────────

    /// All points, in the shape the charting library consumes.
    pub fn points(&self) -> Vec<ChartPoint> {
        self.series.chart_points()
    }

    pub fn visible_points(&self) -> Vec<ChartPoint> {
        let points = self.series.chart_points();
        match self.brush() {
            Some(window) => window.slice(&points).to_vec(),
            None => Vec::new(),
        }
    }

    /// Series-wide `[dataMin, dataMax]`; `None` while no price is finite.
    pub fn value_domain(&self) -> Option<ValueDomain> {
        ValueDomain::from_points(self.series.points(), &self.config.scale)
    }

    fn effective_domain(&self) -> ValueDomain {
        self.value_domain().unwrap_or_else(ValueDomain::undefined)
    }

    /// Draw the visible window into `area`.
    ///
    /// Computes the domain from the whole series first, then hands one
    /// geometry per visible bar to `renderer`. Bars without finite prices
    /// are still drawn, collapsed to 0. Returns the domain used, or `None`
    /// (drawing nothing) for an empty series.
    pub fn render<R: BarRenderer>(&self, area: &PlotArea, renderer: &mut R) -> Option<ValueDomain> {
        let window = self.brush()?;
        let domain = self.effective_domain();
        let points = self.series.chart_points();
        render_window(&points, window, &domain, area, &self.config.style, renderer);
        Some(domain)
    }

    /// Geometry for a bar the library has already laid out.
    pub fn bar_shape(&self, bounds: &BarBox, ohlc: &Ohlc, plot_height: f64) -> BarGeometry {
        bar_geometry(bounds, ohlc, &self.effective_domain(), plot_height, &self.config.style)
    }

    pub fn tooltip(&self, index: usize) -> Option<Tooltip> {
        self.series.points().get(index).map(Tooltip::for_point)
    }
}

impl std::fmt::Debug for ChartView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartView")
            .field("symbol", &self.config.symbol)
            .field("points", &self.series.len())
            .field("brush", &self.brush)
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct ChartViewBuilder {
    config: ChartConfig,
    sample_data: bool,
}

impl ChartViewBuilder {
    pub fn symbol(mut self, symbol: impl Into<Symbol>) -> Self {
        self.config.symbol = symbol.into();
        self
    }

    pub fn scale(mut self, scale: ScaleMargins) -> Self {
        self.config.scale = scale;
        self
    }

    pub fn style(mut self, style: BarStyle) -> Self {
        self.config.style = style;
        self
    }

    pub fn boundary(mut self, boundary: BarBoundary) -> Self {
        self.config.boundary = boundary;
        self
    }

    pub fn validation(mut self, validation: ValidationMode) -> Self {
        self.config.validation = validation;
        self
    }

    /// Start with the static sample bars instead of an empty series.
    pub fn sample_data(mut self, enabled: bool) -> Self {
        self.sample_data = enabled;
        self
    }

    pub fn build(self) -> Result<ChartView, ChartError> {
        if self.config.symbol.is_empty() {
            return Err(ChartError::Config("symbol must not be empty".into()));
        }

        let mut view = ChartView::new(self.config);
        if self.sample_data {
            view.series = PriceSeries::from_points(sample_points())
                .with_boundary(view.config.boundary)
                .with_validation(view.config.validation);
        }
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::BarColor;
    use crate::domain::candle::wire::WireBar;
    use crate::feed::ChannelFeed;

    fn wire(ts: &str, high: f64, low: f64, open: f64, close: f64) -> WireBar {
        WireBar {
            updated_at: ts.into(),
            max_price: high,
            min_price: low,
            open_price: open,
            close_price: close,
        }
    }

    fn sample_view() -> ChartView {
        ChartView::builder().symbol("PETR4").sample_data(true).build().unwrap()
    }

    #[test]
    fn test_build_requires_symbol() {
        let err = ChartView::builder().build().unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));
    }

    #[test]
    fn test_sample_view_points() {
        let view = sample_view();
        let points = view.points();
        assert_eq!(points.len(), 5);
        assert_eq!(points[2].label, "10:47");
        assert_eq!(points[2].open_close, [20.42, 20.18]);
        assert_eq!(view.brush(), Some(BrushRange::new(0, 4)));
    }

    #[test]
    fn test_sample_view_ignores_ticks_before_snapshot() {
        let mut view = sample_view();
        let outcome = view
            .apply(FeedMessage::tick(wire("2024-06-01T14:49:10Z", 20.25, 20.15, 20.20, 20.22)))
            .unwrap();
        assert_eq!(outcome, MergeOutcome::Ignored);
        assert_eq!(view.series().len(), 5);
        assert_eq!(view.series().last().unwrap().timestamp, "2023-01-05T10:49:00Z");
        assert_eq!(view.points()[4].open_close, [20.20, 20.16]);
    }

    #[test]
    fn test_apply_json_decodes_feed_text() {
        let mut view = sample_view();
        assert!(matches!(view.apply_json("[1, 2"), Err(ChartError::Serde(_))));

        let outcome = view
            .apply_json(r#"{"History":[{"UpdateAt":"2023-01-05T10:49:00Z","MaxPrice":20.2,"MinPrice":20.16,"OpenPrice":20.2,"ClosePrice":20.16}]}"#)
            .unwrap();
        assert_eq!(outcome, MergeOutcome::Replaced { len: 1 });

        let outcome = view
            .apply_json(r#"{"UpdatedAt":"2023-01-05T10:50:00Z","MaxPrice":20.3,"MinPrice":20.1,"OpenPrice":20.16,"ClosePrice":20.2}"#)
            .unwrap();
        assert_eq!(outcome, MergeOutcome::Appended);
        assert_eq!(view.series().len(), 2);
    }

    #[test]
    fn test_set_brush_scopes_visible_points() {
        let mut view = sample_view();
        view.set_brush(BrushRange::new(3, 4)).unwrap();
        let labels: Vec<_> = view.visible_points().into_iter().map(|p| p.label).collect();
        assert_eq!(labels, ["10:48", "10:49"]);

        assert!(view.set_brush(BrushRange::new(2, 9)).is_err());
        assert_eq!(view.brush(), Some(BrushRange::new(3, 4)));
    }

    #[test]
    fn test_reset_brush_restores_full_window() {
        let mut view = sample_view();
        view.set_brush(BrushRange::new(1, 2)).unwrap();
        assert_eq!(view.visible_points().len(), 2);

        view.reset_brush();
        assert_eq!(view.brush(), Some(BrushRange::new(0, 4)));
        assert_eq!(view.visible_points().len(), 5);
    }

    #[test]
    fn test_snapshot_resets_brush() {
        let mut view = sample_view();
        view.set_brush(BrushRange::new(3, 4)).unwrap();
        view.apply(FeedMessage::snapshot(vec![wire("2023-01-05T11:00:00Z", 21.0, 20.0, 20.5, 20.8)]))
            .unwrap();
        assert_eq!(view.brush(), Some(BrushRange::new(0, 0)));
    }

    #[test]
    fn test_render_uses_series_wide_domain() {
        let mut view = sample_view();
        view.set_brush(BrushRange::new(2, 2)).unwrap();
        let mut bars: Vec<BarGeometry> = Vec::new();
        let domain = view.render(&PlotArea::new(0.0, 0.0, 100.0, 400.0), &mut bars).unwrap();
        assert_eq!(domain, view.value_domain().unwrap());
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].body.fill, BarColor::Red);
    }

    #[test]
    fn test_render_empty_view_draws_nothing() {
        let view = ChartView::builder().symbol("PETR4").build().unwrap();
        let mut bars: Vec<BarGeometry> = Vec::new();
        assert!(view.render(&PlotArea::new(0.0, 0.0, 100.0, 400.0), &mut bars).is_none());
        assert!(bars.is_empty());
    }

    #[test]
    fn test_render_collapses_bars_without_prices() {
        let mut view = ChartView::builder().symbol("PETR4").build().unwrap();
        view.apply(FeedMessage::snapshot(vec![wire(
            "2023-01-05T10:45:00Z",
            f64::NAN,
            f64::NAN,
            f64::NAN,
            f64::NAN,
        )]))
        .unwrap();
        assert!(view.value_domain().is_none());

        let mut bars: Vec<BarGeometry> = Vec::new();
        let domain = view.render(&PlotArea::new(0.0, 0.0, 100.0, 400.0), &mut bars).unwrap();
        assert!(domain.min.is_nan() && domain.max.is_nan());
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].body.y, 0.0);
        assert_eq!(bars[0].body.height, 0.0);
        assert_eq!(bars[0].wick.y1, 0.0);
        assert_eq!(bars[0].wick.y2, 0.0);
        assert_eq!(bars[0].wick.x1, 50.0);
    }

    #[test]
    fn test_bar_shape_without_domain_still_draws() {
        let view = ChartView::builder().symbol("PETR4").build().unwrap();
        let bounds = BarBox {
            x: 10.0,
            y: 0.0,
            width: 20.0,
            height: 0.0,
        };
        let g = view.bar_shape(&bounds, &Ohlc::new(20.0, 20.1, 19.9, 20.0), 400.0);
        assert_eq!(g.kind, crate::chart::BarKind::Doji);
        assert_eq!(g.wick.x1, 20.0);
        assert_eq!(g.wick.y1, 0.0);
        assert_eq!(g.body.height, 1.0);
    }

    #[test]
    fn test_bar_shape_for_library_callback() {
        let view = sample_view();
        let bounds = BarBox {
            x: 100.0,
            y: 80.0,
            width: 40.0,
            height: -140.0,
        };
        let g = view.bar_shape(&bounds, &Ohlc::new(20.42, 20.63, 20.10, 20.18), 400.0);
        assert_eq!(g.body.fill, BarColor::Red);
        assert_eq!(g.body.height, 140.0);
        assert_eq!(g.wick.x1, 120.0);
    }

    #[test]
    fn test_tooltip_by_index() {
        let view = sample_view();
        let tooltip = view.tooltip(0).unwrap();
        assert_eq!(tooltip.open, 20.24);
        assert!(view.tooltip(5).is_none());
    }

    #[tokio::test]
    async fn test_mount_and_teardown_release_subscription() {
        let feed = ChannelFeed::new();
        let mut view = sample_view();
        view.mount(&feed).await.unwrap();
        assert!(view.is_mounted());
        assert_eq!(feed.subscriber_count(&Symbol::from("PETR4")), 1);

        view.mount(&feed).await.unwrap();
        assert_eq!(feed.subscriber_count(&Symbol::from("PETR4")), 1);

        view.teardown();
        assert!(!view.is_mounted());
        assert_eq!(feed.subscriber_count(&Symbol::from("PETR4")), 0);
    }

    #[tokio::test]
    async fn test_mount_on_shut_down_feed_fails() {
        let feed = ChannelFeed::new();
        feed.shutdown();
        let mut view = sample_view();
        let err = view.mount(&feed).await.unwrap_err();
        assert!(matches!(err, ChartError::Feed(crate::error::FeedError::Closed)));
        assert!(!view.is_mounted());
    }

    #[tokio::test]
    async fn test_drop_view_releases_subscription() {
        let feed = ChannelFeed::new();
        let mut view = sample_view();
        view.mount(&feed).await.unwrap();
        drop(view);
        assert_eq!(feed.subscriber_count(&Symbol::from("PETR4")), 0);
    }

    #[tokio::test]
    async fn test_drain_pending_applies_buffered_ticks() {
        let feed = ChannelFeed::new();
        let symbol = Symbol::from("PETR4");
        let mut view = sample_view();
        view.mount(&feed).await.unwrap();

        feed.publish(&symbol, FeedMessage::snapshot(vec![wire("2023-01-05T10:49:00Z", 20.20, 20.16, 20.20, 20.16)]));
        feed.publish(&symbol, FeedMessage::tick(wire("2023-01-05T10:49:30Z", 20.25, 20.15, 20.20, 20.22)));
        feed.publish_json(&symbol, "garbage");
        feed.publish(&symbol, FeedMessage::tick(wire("2023-01-05T10:50:00Z", 20.30, 20.20, 20.22, 20.28)));

        let outcomes = view.drain_pending();
        assert_eq!(
            outcomes,
            [MergeOutcome::Replaced { len: 1 }, MergeOutcome::Updated, MergeOutcome::Appended]
        );
        assert_eq!(view.series().len(), 2);
        assert!(view.drain_pending().is_empty());
    }
}
