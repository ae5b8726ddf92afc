use crate::domain::history::Symbol;

/// Root error type. Parsing never produces one; only the service and
/// configuration layers do.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Chart(ChartError),
    Store(StoreError),
    Config(ConfigError),
}

/// Failures while assembling a chart for a symbol
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    MissingSymbol,
    NoRows(Symbol),
    Store(StoreError),
}

/// Failures of the quote row store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Unavailable(String),
    Poisoned,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    InvalidValue { field: &'static str, reason: String },
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Chart(e) => write!(f, "Chart Error: {}", e),
            AppError::Store(e) => write!(f, "Store Error: {}", e),
            AppError::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartError::MissingSymbol => write!(f, "symbol is missing"),
            ChartError::NoRows(symbol) => {
                write!(f, "history query for symbol {} returned no rows", symbol.value())
            }
            ChartError::Store(e) => write!(f, "history query failed: {}", e),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
            StoreError::Poisoned => write!(f, "store lock poisoned"),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "cannot parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for ChartError {}
impl std::error::Error for StoreError {}
impl std::error::Error for ConfigError {}

impl From<ChartError> for AppError {
    fn from(error: ChartError) -> Self {
        AppError::Chart(error)
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        AppError::Store(error)
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        AppError::Config(error)
    }
}

impl From<StoreError> for ChartError {
    fn from(error: StoreError) -> Self {
        ChartError::Store(error)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Parse(error.to_string())
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
pub type StoreResult<T> = Result<T, StoreError>;
