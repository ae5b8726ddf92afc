use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::history::{QuoteRow, QuoteStore, Symbol};

/// Quote rows kept in memory, keyed by symbol
#[derive(Default)]
pub struct InMemoryQuoteStore {
    rows: RwLock<BTreeMap<Symbol, QuoteRow>>,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later rows replace earlier ones with the same symbol.
    pub fn with_rows(rows: impl IntoIterator<Item = QuoteRow>) -> Self {
        let rows: BTreeMap<Symbol, QuoteRow> = rows.into_iter().map(|row| (row.symbol.clone(), row)).collect();
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Insert a row or replace the one with the same symbol.
    pub fn upsert(&self, row: QuoteRow) -> StoreResult<()> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        rows.insert(row.symbol.clone(), row);
        Ok(())
    }
}

impl QuoteStore for InMemoryQuoteStore {
    fn history_for(&self, symbol: &Symbol) -> StoreResult<Option<String>> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.get(symbol).map(|row| row.history.clone()))
    }

    fn all_quotes(&self) -> StoreResult<Vec<QuoteRow>> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        Ok(rows.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, symbol: &str, history: &str) -> QuoteRow {
        QuoteRow {
            id,
            symbol: Symbol::new(symbol).unwrap(),
            price: 1.0,
            history: history.to_string(),
        }
    }

    #[test]
    fn with_rows_keeps_the_last_row_per_symbol() {
        let store = InMemoryQuoteStore::with_rows([
            row(1, "GOOG", "old\n"),
            row(2, "AAPL", ""),
            row(3, "goog", "new\n"),
        ]);

        let quotes = store.all_quotes().unwrap();
        let ids: Vec<i64> = quotes.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(
            store.history_for(&Symbol::new("GOOG").unwrap()).unwrap().as_deref(),
            Some("new\n")
        );
    }

    #[test]
    fn unknown_symbol_has_no_history() {
        let store = InMemoryQuoteStore::with_rows([row(1, "GOOG", "")]);
        assert_eq!(store.history_for(&Symbol::new("MSFT").unwrap()).unwrap(), None);
    }
}
