use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::errors::ChartError;

/// Value Object - price of a single history record
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - absolute record time in milliseconds since the epoch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Deref, Serialize,
    Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(value: i64) -> Self {
        Self(value)
    }

    pub fn millis(&self) -> i64 {
        self.0
    }

    /// Whole seconds, truncated toward zero.
    pub fn seconds(&self) -> i64 {
        self.0 / 1000
    }
}

/// Value Object - seconds elapsed since the first valid record of a parse
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Deref, Constructor,
    Serialize, Deserialize,
)]
pub struct RelativeTime(i64);

impl RelativeTime {
    pub const ZERO: RelativeTime = RelativeTime(0);

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

/// One chartable point: x is relative seconds, y is the price
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub relative_time: RelativeTime,
    pub price: Price,
}

/// Value Object - ticker symbol, always upper case
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Result<Self, ChartError> {
        let symbol = symbol.into();
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(ChartError::MissingSymbol);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ChartError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
