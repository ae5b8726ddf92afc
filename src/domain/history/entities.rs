pub use super::value_objects::{HistoryPoint, Price, RelativeTime};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::logging::{LogComponent, Logger};

/// Ordered mapping from relative time to a short date label.
///
/// Keys are unique and ascending, which is what the floor/ceiling lookups
/// in [`AxisLabelTable::nearest_label`] rely on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AxisLabelTable {
    labels: BTreeMap<RelativeTime, String>,
}

impl AxisLabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the label for `time`.
    pub fn insert(&mut self, time: RelativeTime, label: String) {
        self.labels.insert(time, label);
    }

    pub fn get(&self, time: RelativeTime) -> Option<&str> {
        self.labels.get(&time).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = RelativeTime> + '_ {
        self.labels.keys().copied()
    }

    /// Greatest entry whose key is `<= query`.
    pub fn floor_entry(&self, query: f64) -> Option<(RelativeTime, &str)> {
        if query.is_nan() {
            return None;
        }
        // float -> int casts saturate, so huge queries still land on the ends
        let bound = RelativeTime::from(query.floor() as i64);
        self.labels
            .range(..=bound)
            .next_back()
            .map(|(key, label)| (*key, label.as_str()))
    }

    /// Smallest entry whose key is `>= query`.
    pub fn ceiling_entry(&self, query: f64) -> Option<(RelativeTime, &str)> {
        if query.is_nan() {
            return None;
        }
        let bound = RelativeTime::from(query.ceil() as i64);
        self.labels
            .range(bound..)
            .next()
            .map(|(key, label)| (*key, label.as_str()))
    }

    /// Label of the entry closest to `query`.
    ///
    /// The floor wins only when it is strictly closer; ties go to the
    /// ceiling. A missing side is treated as infinitely far away. Returns an
    /// empty string when nothing matches (empty table or a NaN query).
    pub fn nearest_label(&self, query: f64) -> String {
        self.nearest_label_with(query, &crate::domain::logging::NoOpLogger)
    }

    /// Same as [`nearest_label`](Self::nearest_label), reporting lookup misses to `logger`.
    pub fn nearest_label_with(&self, query: f64, logger: &dyn Logger) -> String {
        let floor = self.floor_entry(query);
        let ceiling = self.ceiling_entry(query);

        let floor_diff = floor.map_or(f64::INFINITY, |(key, _)| query - key.as_f64());
        let ceiling_diff = ceiling.map_or(f64::INFINITY, |(key, _)| key.as_f64() - query);

        let chosen = if floor_diff < ceiling_diff {
            floor
        } else {
            ceiling.or(floor)
        };

        match chosen {
            Some((_, label)) => label.to_string(),
            None => {
                logger.error(
                    LogComponent::Domain("AxisLabels"),
                    &format!("no axis label for position {}", query),
                );
                String::new()
            }
        }
    }
}

/// Parsed price history: chronological points plus their axis labels
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistorySeries {
    points: Vec<HistoryPoint>,
    labels: AxisLabelTable,
}

impl HistorySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point and record its label in lock-step.
    pub fn push(&mut self, point: HistoryPoint, label: String) {
        self.labels.insert(point.relative_time, label);
        self.points.push(point);
    }

    pub fn points(&self) -> &[HistoryPoint] {
        &self.points
    }

    pub fn labels(&self) -> &AxisLabelTable {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.relative_time.as_f64()).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price.value()).collect()
    }

    /// Lowest and highest price in the series
    pub fn price_range(&self) -> Option<(Price, Price)> {
        let first = self.points.first()?.price;
        Some(self.points.iter().fold((first, first), |(min, max), p| {
            let min = if p.price < min { p.price } else { min };
            let max = if p.price > max { p.price } else { max };
            (min, max)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(i64, &str)]) -> AxisLabelTable {
        let mut table = AxisLabelTable::new();
        for (key, label) in entries {
            table.insert(RelativeTime::from(*key), label.to_string());
        }
        table
    }

    #[test]
    fn floor_and_ceiling_between_keys() {
        let table = table(&[(0, "D0"), (100, "D1")]);
        assert_eq!(table.floor_entry(40.5), Some((RelativeTime::from(0), "D0")));
        assert_eq!(table.ceiling_entry(40.5), Some((RelativeTime::from(100), "D1")));
        assert_eq!(table.floor_entry(-0.5), None);
        assert_eq!(table.ceiling_entry(100.5), None);
    }

    #[test]
    fn exact_key_is_both_floor_and_ceiling() {
        let table = table(&[(0, "D0"), (100, "D1")]);
        assert_eq!(table.floor_entry(100.0), Some((RelativeTime::from(100), "D1")));
        assert_eq!(table.ceiling_entry(100.0), Some((RelativeTime::from(100), "D1")));
        assert_eq!(table.nearest_label(100.0), "D1");
    }

    #[test]
    fn fractional_query_just_below_key() {
        let table = table(&[(10, "A"), (11, "B")]);
        assert_eq!(table.nearest_label(10.4), "A");
        assert_eq!(table.nearest_label(10.6), "B");
    }

    #[test]
    fn nan_query_degrades_to_empty() {
        let table = table(&[(0, "D0")]);
        assert_eq!(table.nearest_label(f64::NAN), "");
    }

    #[test]
    fn infinite_queries_use_the_existing_side() {
        let table = table(&[(0, "D0"), (100, "D1")]);
        assert_eq!(table.nearest_label(f64::INFINITY), "D1");
        assert_eq!(table.nearest_label(f64::NEG_INFINITY), "D0");
    }

    #[test]
    fn price_range_of_empty_series_is_none() {
        assert_eq!(HistorySeries::new().price_range(), None);
    }
}
