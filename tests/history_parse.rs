use std::sync::Arc;

use quickcheck_macros::quickcheck;
use stock_history_chart::domain::history::{
    HistorySeriesParser, RelativeTime, Timestamp,
};
use stock_history_chart::domain::logging::LogLevel;
use stock_history_chart::infrastructure::MemoryLogger;

fn parser() -> HistorySeriesParser {
    HistorySeriesParser::new(Arc::new(|ts: Timestamp| format!("day-{}", ts.millis())))
}

/// Serialize `(millis, price)` records, given oldest first, the way the store writes them.
fn blob(records: &[(i64, f64)]) -> String {
    records
        .iter()
        .rev()
        .map(|(millis, price)| format!("{}, {}\n", millis, price))
        .collect()
}

#[test]
fn newest_first_blob_comes_out_chronological() {
    let series = parser().parse("1494510300000, 11.25\n1494467100000, 10.75\n1494423900000, 10.5\n");

    let xs: Vec<i64> = series.points().iter().map(|p| p.relative_time.value()).collect();
    assert_eq!(xs, vec![0, 43_200, 86_400]);
    assert_eq!(series.ys(), vec![10.5, 10.75, 11.25]);
    assert_eq!(series.labels().get(RelativeTime::from(43_200)), Some("day-1494467100000"));
}

#[test]
fn empty_blob_yields_empty_series() {
    let series = parser().parse("");
    assert!(series.is_empty());
    assert!(series.labels().is_empty());
}

#[test]
fn sentinel_only_blob_yields_empty_series() {
    let logger = Arc::new(MemoryLogger::new());
    let series = parser().with_logger(logger.clone()).parse("\n");
    // the single remaining segment is empty and rejected
    assert!(series.is_empty());
    assert_eq!(logger.count_at(LogLevel::Debug), 1);
}

#[test]
fn trailing_newline_does_not_produce_a_rejected_record() {
    let logger = Arc::new(MemoryLogger::new());
    let series = parser()
        .with_logger(logger.clone())
        .parse("2000000, 6.0\n1000000, 5.0\n");
    assert_eq!(series.len(), 2);
    assert!(logger.entries().is_empty());
}

#[test]
fn malformed_middle_record_is_skipped() {
    let logger = Arc::new(MemoryLogger::new());
    let series = parser()
        .with_logger(logger.clone())
        .parse("1000, 5.0\nnotanumber\n2000, 6.0\n");

    assert_eq!(series.len(), 2);
    let mut prices = series.ys();
    prices.sort_by(f64::total_cmp);
    assert_eq!(prices, vec![5.0, 6.0]);

    let entries = logger.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, LogLevel::Debug);
    assert_eq!(entries[0].metadata.as_deref(), Some("record=\"notanumber\""));
}

#[test]
fn reference_is_the_first_valid_record_not_the_first_line() {
    let series = parser().parse("9000, 3.0\n5000, 2.0\nbroken, 1.0\n");
    assert_eq!(series.points()[0].relative_time, RelativeTime::ZERO);
    assert_eq!(series.points()[0].price.value(), 2.0);
    assert_eq!(series.points()[1].relative_time.value(), 4);
}

#[test]
fn all_malformed_records_yield_empty_series() {
    let series = parser().parse("a, b\n1,2\n, \n");
    assert!(series.is_empty());
    assert!(series.labels().is_empty());
}

#[test]
fn price_range_spans_the_series() {
    let series = parser().parse(&blob(&[(0, 4.0), (1000, 9.5), (2000, 1.25)]));
    let (min, max) = series.price_range().unwrap();
    assert_eq!(min.value(), 1.25);
    assert_eq!(max.value(), 9.5);
}

#[quickcheck]
fn round_trip_keeps_count_and_deltas(base: u32, steps: Vec<(u16, u16)>) -> bool {
    let mut millis = i64::from(base) * 1000;
    let mut records = Vec::with_capacity(steps.len());
    for (step, cents) in &steps {
        millis += i64::from(*step) + 1;
        records.push((millis, f64::from(*cents) / 100.0));
    }

    let series = parser().parse(&blob(&records));
    if series.len() != records.len() {
        return false;
    }

    let reference = records.first().map(|(ms, _)| ms / 1000).unwrap_or_default();
    series.points().iter().zip(&records).all(|(point, (ms, price))| {
        point.relative_time.value() == ms / 1000 - reference && point.price.value() == *price
    })
}

#[quickcheck]
fn relative_times_are_non_decreasing_from_zero(steps: Vec<u32>) -> bool {
    let mut millis = 1_494_423_900_000i64;
    let records: Vec<(i64, f64)> = steps
        .iter()
        .map(|step| {
            millis += i64::from(*step);
            (millis, 1.0)
        })
        .collect();

    let series = parser().parse(&blob(&records));
    let xs: Vec<i64> = series.points().iter().map(|p| p.relative_time.value()).collect();
    xs.first().is_none_or(|first| *first == 0) && xs.windows(2).all(|w| w[0] <= w[1])
}

#[quickcheck]
fn label_keys_match_point_times(steps: Vec<u16>) -> bool {
    let mut millis = 0i64;
    let records: Vec<(i64, f64)> = steps
        .iter()
        .map(|step| {
            millis += i64::from(*step);
            (millis, 2.5)
        })
        .collect();

    let series = parser().parse(&blob(&records));
    let mut times: Vec<RelativeTime> = series.points().iter().map(|p| p.relative_time).collect();
    times.dedup();
    series.labels().keys().eq(times)
}

#[quickcheck]
fn malformed_lines_are_dropped_wherever_they_sit(steps: Vec<(u16, bool)>, junk: u8) -> bool {
    const MALFORMED: [&str; 4] = ["garbage", "1000,5.0", "abc, 1.0", "1000, 2.0, 3.0"];

    let mut millis = 1_494_423_900_000i64;
    let mut lines = Vec::new();
    let mut valid = 0;
    for (index, (step, malformed)) in steps.iter().enumerate() {
        if *malformed {
            let pick = (usize::from(junk) + index) % MALFORMED.len();
            lines.push(MALFORMED[pick].to_string());
        } else {
            millis += i64::from(*step) * 1000;
            lines.push(format!("{}, {}", millis, step));
            valid += 1;
        }
    }
    // store order is newest first
    let text: String = lines.iter().rev().map(|line| format!("{}\n", line)).collect();

    let logger = Arc::new(MemoryLogger::new());
    let series = parser().with_logger(logger.clone()).parse(&text);
    series.len() == valid
        && series.labels().len() <= valid
        && logger.count_at(LogLevel::Debug) == steps.len() - valid
}
