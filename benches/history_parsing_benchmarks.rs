use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;
use stock_history_chart::domain::history::HistorySeriesParser;
use stock_history_chart::time_utils::{DateStyle, ShortDateFormatter};

/// Weekly closes, newest first, the way the quote store serializes them
fn generate_history_blob(count: usize) -> String {
    let start = 1_262_304_000_000i64; // 2010-01-01
    let week = 7 * 24 * 60 * 60 * 1000i64;
    let mut blob = String::with_capacity(count * 24);
    for i in (0..count).rev() {
        let price = 100.0 + (i as f64 * 0.05).sin() * 25.0;
        blob.push_str(&format!("{}, {:.2}\n", start + i as i64 * week, price));
    }
    blob
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_parse");
    let parser = HistorySeriesParser::new(Arc::new(ShortDateFormatter::new(DateStyle::Us, 0)));

    for count in [52, 520, 5200] {
        let blob = generate_history_blob(count);
        group.bench_with_input(BenchmarkId::new("parse", count), &blob, |b, blob| {
            b.iter(|| parser.parse(black_box(blob)))
        });
    }
    group.finish();
}

fn bench_nearest_label(c: &mut Criterion) {
    let parser = HistorySeriesParser::new(Arc::new(ShortDateFormatter::default()));
    let series = parser.parse(&generate_history_blob(5200));
    let last = series.points().last().map_or(0.0, |p| p.relative_time.as_f64());

    c.bench_function("nearest_label_axis_sweep", |b| {
        b.iter(|| {
            for tick in 0..10 {
                black_box(series.labels().nearest_label(last * tick as f64 / 9.0));
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_nearest_label);
criterion_main!(benches);
