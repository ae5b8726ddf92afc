use serde::Deserialize;

use crate::domain::errors::ConfigError;
use crate::domain::logging::LogLevel;
use crate::time_utils::{DateStyle, ShortDateFormatter};

/// Largest UTC offset, in minutes, a fixed offset can express.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Runtime settings for chart assembly and diagnostics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub date_style: DateStyle,
    pub utc_offset_minutes: i32,
    pub log_level: LogLevel,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl ChartConfig {
    pub fn production() -> Self {
        Self {
            date_style: DateStyle::Us,
            utc_offset_minutes: 0,
            log_level: LogLevel::Info,
        }
    }

    pub fn development() -> Self {
        Self {
            log_level: LogLevel::Debug,
            ..Self::production()
        }
    }

    /// Parse a JSON document; missing fields fall back to [`ChartConfig::production`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::InvalidValue {
                field: "utc_offset_minutes",
                reason: format!(
                    "{} is outside +-{}",
                    self.utc_offset_minutes, MAX_UTC_OFFSET_MINUTES
                ),
            });
        }
        Ok(())
    }

    pub fn date_formatter(&self) -> ShortDateFormatter {
        ShortDateFormatter::new(self.date_style, self.utc_offset_minutes)
    }
}
