//! Browser bindings for the charting library.
//!
//! The JS side owns the transport and the SVG; it pushes raw feed text in and
//! pulls points, bar shapes and tooltip text out as JSON strings.

use wasm_bindgen::prelude::*;

use crate::chart::{BarBox, BrushRange};
use crate::domain::candle::Ohlc;
use crate::view::ChartView;

#[wasm_bindgen]
pub struct JsChart {
    view: ChartView,
}

#[wasm_bindgen]
impl JsChart {
    #[wasm_bindgen(constructor)]
    pub fn new(symbol: &str) -> Result<JsChart, JsError> {
        let view = ChartView::builder().symbol(symbol).build()?;
        Ok(Self { view })
    }

    /// A chart pre-filled with the static sample bars.
    #[wasm_bindgen(js_name = withSampleData)]
    pub fn with_sample_data(symbol: &str) -> Result<JsChart, JsError> {
        let view = ChartView::builder().symbol(symbol).sample_data(true).build()?;
        Ok(Self { view })
    }

    /// Merge one raw feed message. Returns the number of points afterwards.
    #[wasm_bindgen(js_name = applyMessage)]
    pub fn apply_message(&mut self, json: &str) -> Result<usize, JsError> {
        self.view.apply_json(json)?;
        Ok(self.view.series().len())
    }

    /// Points as JSON, each with `name`, `label`, `high`, `low`, `openClose`.
    #[wasm_bindgen(js_name = pointsJson)]
    pub fn points_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.view.points())?)
    }

    #[wasm_bindgen(js_name = setBrush)]
    pub fn set_brush(&mut self, start: usize, end: usize) -> Result<(), JsError> {
        self.view.set_brush(BrushRange::new(start, end))?;
        Ok(())
    }

    /// Wick and body for a bar the library laid out, as JSON.
    #[wasm_bindgen(js_name = barShape)]
    #[allow(clippy::too_many_arguments)]
    pub fn bar_shape(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        open: f64,
        close: f64,
        high: f64,
        low: f64,
        plot_height: f64,
    ) -> Result<String, JsError> {
        let bounds = BarBox {
            x,
            y,
            width,
            height,
        };
        let geometry = self
            .view
            .bar_shape(&bounds, &Ohlc::new(open, high, low, close), plot_height);
        Ok(serde_json::to_string(&geometry)?)
    }

    #[wasm_bindgen(js_name = tooltipText)]
    pub fn tooltip_text(&self, index: usize) -> Option<String> {
        self.view.tooltip(index).map(|t| t.to_string())
    }
}
