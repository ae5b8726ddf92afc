use crate::{
    application::config::ChartConfig,
    domain::{
        errors::{ChartError, ChartResult},
        history::{HistorySeries, HistorySeriesParser, QuoteStore, Symbol},
        logging::{LogComponent, Logger},
    },
};
use serde::Serialize;
use std::sync::Arc;

/// Everything a line chart needs for one symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryChart {
    pub title: Symbol,
    pub series: HistorySeries,
}

impl HistoryChart {
    /// Label for an axis tick at `position`.
    pub fn axis_label(&self, position: f64) -> String {
        self.series.labels().nearest_label(position)
    }
}

/// Loads a symbol's stored history and turns it into a [`HistoryChart`]
pub struct HistoryChartService {
    store: Arc<dyn QuoteStore>,
    parser: HistorySeriesParser,
    logger: Arc<dyn Logger>,
}

impl HistoryChartService {
    pub fn new(store: Arc<dyn QuoteStore>, config: &ChartConfig, logger: Arc<dyn Logger>) -> Self {
        let parser = HistorySeriesParser::new(Arc::new(config.date_formatter()))
            .with_logger(Arc::clone(&logger));
        Self {
            store,
            parser,
            logger,
        }
    }

    /// Build the chart for `symbol`.
    ///
    /// A symbol without a row is an error; a row whose history holds no
    /// valid records yields an empty chart.
    pub fn load_chart(&self, symbol: &str) -> ChartResult<HistoryChart> {
        let symbol = Symbol::new(symbol).inspect_err(|_| {
            self.logger
                .error(LogComponent::Application("ChartService"), "Chart requested without a symbol");
        })?;

        let blob = match self.store.history_for(&symbol) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                self.logger.error(
                    LogComponent::Application("ChartService"),
                    &format!("History query for symbol {} returned no rows", symbol),
                );
                return Err(ChartError::NoRows(symbol));
            }
            Err(e) => {
                self.logger.error(
                    LogComponent::Application("ChartService"),
                    &format!("History query for symbol {} failed: {}", symbol, e),
                );
                return Err(e.into());
            }
        };

        let series = self.parser.parse(&blob);
        if series.is_empty() {
            self.logger.warn(
                LogComponent::Application("ChartService"),
                &format!("No valid history records for {}", symbol),
            );
        }

        self.logger.debug(
            LogComponent::Application("ChartService"),
            &format!("Created stock chart for {} with {} points", symbol, series.len()),
        );

        Ok(HistoryChart {
            title: symbol,
            series,
        })
    }
}
