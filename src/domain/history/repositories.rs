use crate::domain::errors::StoreResult;
use crate::domain::history::Symbol;

/// One row of the quote table
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRow {
    pub id: i64,
    pub symbol: Symbol,
    pub price: f64,
    /// Serialized newest-first history blob
    pub history: String,
}

/// Row lookup over stored quotes
pub trait QuoteStore: Send + Sync {
    /// History column of the row for `symbol`, `None` when there is no row.
    fn history_for(&self, symbol: &Symbol) -> StoreResult<Option<String>>;

    /// All rows, ordered by symbol.
    fn all_quotes(&self) -> StoreResult<Vec<QuoteRow>>;
}
