use std::sync::Arc;

use crate::domain::history::{HistoryPoint, HistorySeries, Price, RelativeTime, Timestamp};
use crate::domain::logging::{LogComponent, LogLevel, Logger, NoOpLogger};

/// Record separator inside a stored history blob.
pub const RECORD_SEPARATOR: char = '\n';
/// Separator between the timestamp and the price of one record.
pub const FIELD_SEPARATOR: &str = ", ";

/// Turns an absolute timestamp into the short date shown under an axis tick.
pub trait DateLabelFormatter: Send + Sync {
    fn format_date(&self, timestamp: Timestamp) -> String;
}

impl<F> DateLabelFormatter for F
where
    F: Fn(Timestamp) -> String + Send + Sync,
{
    fn format_date(&self, timestamp: Timestamp) -> String {
        self(timestamp)
    }
}

/// Why a record was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum RecordRejection {
    FieldCount(usize),
    Timestamp(String),
    Price(String),
}

/// Parses stored history blobs into chartable series.
///
/// A blob is newest-first, one `"<epochMillis>, <price>"` record per line,
/// and always ends with a sentinel segment that is discarded. Malformed
/// records are skipped and reported to the logger at debug level; parsing
/// itself never fails.
pub struct HistorySeriesParser {
    formatter: Arc<dyn DateLabelFormatter>,
    logger: Arc<dyn Logger>,
}

impl HistorySeriesParser {
    pub fn new(formatter: Arc<dyn DateLabelFormatter>) -> Self {
        Self {
            formatter,
            logger: Arc::new(NoOpLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn parse(&self, blob: &str) -> HistorySeries {
        let mut records: Vec<&str> = blob.split(RECORD_SEPARATOR).collect();
        // trailing sentinel, present even when the blob is empty
        records.pop();

        let mut series = HistorySeries::new();
        let mut reference: Option<i64> = None;

        for record in records.into_iter().rev() {
            let (timestamp, price) = match parse_record(record) {
                Ok(parsed) => parsed,
                Err(rejection) => {
                    self.report(record, &rejection);
                    continue;
                }
            };

            let seconds = timestamp.seconds();
            let reference_seconds = *reference.get_or_insert(seconds);
            let relative_time = RelativeTime::from(seconds - reference_seconds);

            series.push(
                HistoryPoint::new(relative_time, price),
                self.formatter.format_date(timestamp),
            );
        }

        series
    }

    fn report(&self, record: &str, rejection: &RecordRejection) {
        let message = match rejection {
            RecordRejection::FieldCount(count) => {
                format!("Invalid history data entry ({} fields)", count)
            }
            RecordRejection::Timestamp(reason) | RecordRejection::Price(reason) => {
                format!("Invalid history data x or y value: {}", reason)
            }
        };
        self.logger.log_with_metadata(
            LogLevel::Debug,
            LogComponent::Domain("HistoryParser"),
            &message,
            &format!("record={:?}", record),
        );
    }
}

/// Split one record into its timestamp and price.
pub fn parse_record(record: &str) -> Result<(Timestamp, Price), RecordRejection> {
    let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
    let [millis, price] = fields.as_slice() else {
        return Err(RecordRejection::FieldCount(fields.len()));
    };

    let millis = millis
        .parse::<i64>()
        .map_err(|e| RecordRejection::Timestamp(e.to_string()))?;
    let price = price
        .trim()
        .parse::<f64>()
        .map_err(|e| RecordRejection::Price(e.to_string()))?;

    Ok((Timestamp::from_millis(millis), Price::from(price)))
}
