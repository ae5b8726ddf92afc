use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::application::{ChartConfig, HistoryChart, HistoryChartService};
use crate::domain::{
    errors::ChartResult,
    history::{QuoteRow, Symbol},
    logging::{GlobalLogger, LogComponent},
    quotes::{QuoteListWidget, format_usd},
};
use crate::infrastructure::InMemoryQuoteStore;

/// WASM API for the JavaScript chart host.
/// Thin bridge: parsing and lookup live in the domain layer.
#[wasm_bindgen]
pub struct HistoryChartApi {
    chart: HistoryChart,
}

impl HistoryChartApi {
    /// Chart `history` for `symbol` with the given settings, served from a
    /// single-row store.
    pub fn build(symbol: &str, history: &str, config: &ChartConfig) -> ChartResult<Self> {
        let row = QuoteRow {
            id: 0,
            symbol: Symbol::new(symbol)?,
            price: 0.0,
            history: history.to_string(),
        };
        let service = HistoryChartService::new(
            Arc::new(InMemoryQuoteStore::with_rows([row])),
            config,
            Arc::new(GlobalLogger),
        );
        service.load_chart(symbol).map(Self::from)
    }

    pub fn chart(&self) -> &HistoryChart {
        &self.chart
    }
}

impl From<HistoryChart> for HistoryChartApi {
    fn from(chart: HistoryChart) -> Self {
        Self { chart }
    }
}

#[wasm_bindgen]
impl HistoryChartApi {
    #[wasm_bindgen(constructor)]
    pub fn new(symbol: &str, history: &str) -> Result<HistoryChartApi, JsError> {
        Self::build(symbol, history, &ChartConfig::default())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Same as the constructor, with settings given as a JSON document.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        symbol: &str,
        history: &str,
        config_json: &str,
    ) -> Result<HistoryChartApi, JsError> {
        let config = ChartConfig::from_json(config_json).map_err(|e| JsError::new(&e.to_string()))?;
        Self::build(symbol, history, &config).map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn title(&self) -> String {
        self.chart.title.value().to_string()
    }

    #[wasm_bindgen(js_name = pointCount)]
    pub fn point_count(&self) -> usize {
        self.chart.series.len()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.chart.series.xs()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.chart.series.ys()
    }

    /// Axis tick formatter: the date label closest to `value`.
    #[wasm_bindgen(js_name = formatAxisValue)]
    pub fn format_axis_value(&self, value: f64) -> String {
        self.chart
            .series
            .labels()
            .nearest_label_with(value, &GlobalLogger)
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.chart).map_err(|e| JsError::new(&e.to_string()))
    }
}

/// Quote list backing the home-screen widget, plus detail charts for its rows
#[wasm_bindgen]
pub struct QuoteListApi {
    store: Arc<InMemoryQuoteStore>,
    charts: HistoryChartService,
    widget: QuoteListWidget,
}

impl Default for QuoteListApi {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteListApi {
    pub fn with_config(config: &ChartConfig) -> Self {
        let store = Arc::new(InMemoryQuoteStore::new());
        let charts = HistoryChartService::new(store.clone(), config, Arc::new(GlobalLogger));
        Self {
            store,
            charts,
            widget: QuoteListWidget::new(),
        }
    }

    /// Insert or replace a quote. Visible in the list after the next `refresh`.
    pub fn store_quote(&self, id: i64, symbol: &str, price: f64, history: &str) -> ChartResult<()> {
        let symbol = Symbol::new(symbol)?;
        crate::log_debug!(
            LogComponent::Presentation("QuoteListApi"),
            "Storing quote {} for {}",
            id,
            symbol
        );
        self.store.upsert(QuoteRow {
            id,
            symbol,
            price,
            history: history.to_string(),
        })?;
        Ok(())
    }

    /// Detail chart for a stored symbol.
    pub fn load_chart(&self, symbol: &str) -> ChartResult<HistoryChartApi> {
        self.charts.load_chart(symbol).map(HistoryChartApi::from)
    }
}

#[wasm_bindgen]
impl QuoteListApi {
    #[wasm_bindgen(constructor)]
    pub fn new() -> QuoteListApi {
        Self::with_config(&ChartConfig::default())
    }

    pub fn upsert(&self, id: i64, symbol: &str, price: f64, history: &str) -> Result<(), JsError> {
        self.store_quote(id, symbol, price, history)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = chartFor)]
    pub fn chart_for(&self, symbol: &str) -> Result<HistoryChartApi, JsError> {
        self.load_chart(symbol).map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn refresh(&mut self) {
        self.widget.on_data_set_changed(self.store.as_ref(), &GlobalLogger);
    }

    pub fn count(&self) -> usize {
        self.widget.count()
    }

    #[wasm_bindgen(js_name = symbolAt)]
    pub fn symbol_at(&self, position: i64) -> Option<String> {
        self.widget.view_at(position).map(|item| item.symbol)
    }

    #[wasm_bindgen(js_name = priceAt)]
    pub fn price_at(&self, position: i64) -> Option<String> {
        self.widget.view_at(position).map(|item| item.price)
    }

    #[wasm_bindgen(js_name = itemId)]
    pub fn item_id(&self, position: i64) -> i64 {
        self.widget.item_id(position)
    }
}

#[wasm_bindgen(js_name = formatUsd)]
pub fn format_usd_js(price: f64) -> String {
    format_usd(price)
}
