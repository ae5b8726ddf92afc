use chrono::{DateTime, Datelike, FixedOffset};
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::domain::history::{DateLabelFormatter, Timestamp};

/// Short date conventions for axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum DateStyle {
    /// `M/d/yy`
    #[default]
    #[strum(serialize = "us")]
    #[serde(rename = "us")]
    Us,
    /// `dd.MM.yy`
    #[strum(serialize = "european")]
    #[serde(rename = "european")]
    European,
    /// `yyyy-MM-dd`
    #[strum(serialize = "iso")]
    #[serde(rename = "iso")]
    Iso,
}

/// Format `timestamp` (ms) as a short date in the given style and UTC offset.
///
/// Returns an empty string for timestamps chrono cannot represent or an
/// offset outside +-24h.
pub fn format_short_date(timestamp: i64, style: DateStyle, utc_offset_minutes: i32) -> String {
    let Some(offset) = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)) else {
        return String::new();
    };
    let Some(date) = DateTime::from_timestamp_millis(timestamp) else {
        return String::new();
    };
    let date = date.with_timezone(&offset);

    match style {
        DateStyle::Us => format!(
            "{}/{}/{:02}",
            date.month(),
            date.day(),
            date.year().rem_euclid(100)
        ),
        DateStyle::European => format!(
            "{:02}.{:02}.{:02}",
            date.day(),
            date.month(),
            date.year().rem_euclid(100)
        ),
        DateStyle::Iso => date.format("%Y-%m-%d").to_string(),
    }
}

/// [`DateLabelFormatter`] backed by [`format_short_date`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortDateFormatter {
    pub style: DateStyle,
    pub utc_offset_minutes: i32,
}

impl ShortDateFormatter {
    pub fn new(style: DateStyle, utc_offset_minutes: i32) -> Self {
        Self {
            style,
            utc_offset_minutes,
        }
    }
}

impl DateLabelFormatter for ShortDateFormatter {
    fn format_date(&self, timestamp: Timestamp) -> String {
        format_short_date(timestamp.millis(), self.style, self.utc_offset_minutes)
    }
}
