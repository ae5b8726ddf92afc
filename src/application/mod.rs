pub mod chart_service;
pub mod config;

pub use chart_service::*;
pub use config::*;
