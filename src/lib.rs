use wasm_bindgen::prelude::*;

use crate::domain::logging::LogComponent;

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod presentation;
pub mod time_utils;

pub use application::{ChartConfig, HistoryChart, HistoryChartService};
pub use domain::history::{AxisLabelTable, HistoryPoint, HistorySeries, HistorySeriesParser};

/// Install the console logger and wall-clock time provider.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    install_services(&ChartConfig::development());

    crate::log_info!(
        LogComponent::Presentation("Initialize"),
        "Stock history chart core initialized ({})",
        env!("CARGO_PKG_VERSION")
    );
}

/// Install global services for `config`. Only the first call takes effect.
pub fn install_services(config: &ChartConfig) {
    domain::logging::init_logger(Box::new(console_logger(config)));

    let time_provider = Box::new(infrastructure::SystemTimeProvider::new());
    domain::logging::init_time_provider(time_provider);
}

fn console_logger(config: &ChartConfig) -> infrastructure::ConsoleLogger {
    infrastructure::ConsoleLogger::new(config.log_level)
}
