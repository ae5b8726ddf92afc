use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider, get_time_provider};

/// Console logger: browser console on wasm32, stderr everywhere else
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Whether entries at `level` reach the console.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn format_log_entry(entry: &LogEntry) -> String {
        let timestamp = get_time_provider().format_timestamp(entry.timestamp);
        match &entry.metadata {
            Some(metadata) => format!(
                "[{}] {} {} | {} | {}",
                timestamp, entry.level, entry.component, entry.message, metadata
            ),
            None => format!(
                "[{}] {} {} | {}",
                timestamp, entry.level, entry.component, entry.message
            ),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn write(level: LogLevel, formatted: String) {
        let formatted: wasm_bindgen::JsValue = formatted.into();
        match level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&formatted),
            LogLevel::Info => web_sys::console::info_1(&formatted),
            LogLevel::Warn => web_sys::console::warn_1(&formatted),
            LogLevel::Error => web_sys::console::error_1(&formatted),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn write(_level: LogLevel, formatted: String) {
        eprintln!("{}", formatted);
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if self.enabled(entry.level) {
            Self::write(entry.level, Self::format_log_entry(&entry));
        }
    }
}

/// Logger that keeps entries in memory, for inspection by tests and tools
#[derive(Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn count_at(&self, level: LogLevel) -> usize {
        self.entries().iter().filter(|e| e.level == level).count()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

/// Wall-clock time provider
pub struct SystemTimeProvider;

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for SystemTimeProvider {
    fn current_timestamp(&self) -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        i64::try_from(timestamp)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .map(|date| date.format("%H:%M:%S%.3f").to_string())
            .unwrap_or_else(|| timestamp.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logging::LogComponent;

    fn entry(metadata: Option<&str>) -> LogEntry {
        LogEntry {
            timestamp: 42,
            level: LogLevel::Warn,
            component: LogComponent::Application("ChartService"),
            message: "No valid history records for GOOG".to_string(),
            metadata: metadata.map(str::to_string),
        }
    }

    #[test]
    fn console_line_without_metadata() {
        let line = ConsoleLogger::format_log_entry(&entry(None));
        assert!(line.starts_with('['));
        assert!(line.ends_with("]  WARN APP:ChartService | No valid history records for GOOG"));
    }

    #[test]
    fn console_line_appends_metadata() {
        let line = ConsoleLogger::format_log_entry(&entry(Some("record=\"x\"")));
        assert!(line.ends_with(
            "]  WARN APP:ChartService | No valid history records for GOOG | record=\"x\""
        ));
    }

    #[test]
    fn console_filters_below_min_level() {
        let logger = ConsoleLogger::new_production();
        assert_eq!(logger.min_level(), LogLevel::Info);
        assert!(!logger.enabled(LogLevel::Trace));
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Error));

        let logger = ConsoleLogger::new_development();
        assert!(logger.enabled(LogLevel::Debug));
        assert!(!logger.enabled(LogLevel::Trace));
    }

    #[test]
    fn memory_logger_keeps_entries_in_order() {
        let logger = MemoryLogger::new();
        logger.debug(LogComponent::Domain("Test"), "first");
        logger.error(LogComponent::Domain("Test"), "second");

        let entries = logger.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(logger.count_at(LogLevel::Error), 1);
    }

    #[test]
    fn system_time_formats_clock_time() {
        let provider = SystemTimeProvider::new();
        assert_eq!(provider.format_timestamp(3_723_004), "01:02:03.004");
    }
}
