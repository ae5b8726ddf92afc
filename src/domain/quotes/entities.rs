use serde::Serialize;

use super::services::format_usd;
use crate::domain::history::{QuoteRow, QuoteStore};
use crate::domain::logging::{LogComponent, Logger};

/// Position value a list host passes for "no item".
pub const INVALID_POSITION: i64 = -1;

/// Texts of one list row as the widget shows them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuoteListItem {
    pub symbol: String,
    pub price: String,
}

/// Backing model of the home-screen quote list.
///
/// Holds a snapshot of the quote rows, ordered by symbol, taken on the last
/// refresh. Positions outside the snapshot never panic.
#[derive(Debug, Clone, Default)]
pub struct QuoteListWidget {
    rows: Option<Vec<QuoteRow>>,
}

impl QuoteListWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-query the store and replace the snapshot.
    ///
    /// A failed query leaves the list empty.
    pub fn on_data_set_changed(&mut self, store: &dyn QuoteStore, logger: &dyn Logger) {
        self.rows = match store.all_quotes() {
            Ok(mut rows) => {
                rows.sort_by(|a, b| a.symbol.cmp(&b.symbol));
                logger.debug(
                    LogComponent::Domain("QuoteList"),
                    &format!("Loaded {} quotes for widget", rows.len()),
                );
                Some(rows)
            }
            Err(e) => {
                logger.error(
                    LogComponent::Domain("QuoteList"),
                    &format!("Quote query failed: {}", e),
                );
                None
            }
        };
    }

    pub fn on_destroy(&mut self) {
        self.rows = None;
    }

    pub fn count(&self) -> usize {
        self.rows.as_ref().map_or(0, Vec::len)
    }

    fn row(&self, position: i64) -> Option<&QuoteRow> {
        if position == INVALID_POSITION {
            return None;
        }
        let index = usize::try_from(position).ok()?;
        self.rows.as_ref()?.get(index)
    }

    pub fn view_at(&self, position: i64) -> Option<QuoteListItem> {
        self.row(position).map(|row| QuoteListItem {
            symbol: row.symbol.value().to_string(),
            price: format_usd(row.price),
        })
    }

    /// Placeholder row shown while the list loads.
    pub fn loading_view(&self) -> QuoteListItem {
        QuoteListItem::default()
    }

    pub fn view_type_count(&self) -> usize {
        1
    }

    /// Row id at `position`, or the position itself when there is no row.
    pub fn item_id(&self, position: i64) -> i64 {
        self.row(position).map_or(position, |row| row.id)
    }

    pub fn has_stable_ids(&self) -> bool {
        true
    }
}
