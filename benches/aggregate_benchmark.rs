use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use training_dashboard::models::{ActivityRecord, DateKey};
use training_dashboard::services::aggregator::aggregate_by_date;
use training_dashboard::services::metrics::{calculate_acwr, dashboard};

/// Two years of training: one or two sessions most days.
fn synthetic_history() -> Vec<ActivityRecord> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    (0..730u64)
        .flat_map(|day| {
            let date = DateKey::from(start + Days::new(day)).value();
            let sessions = if day % 7 == 6 { 0 } else { 1 + day % 2 };
            (0..sessions).map(move |s| {
                let distance = 5000.0 + ((day * 37 + s * 11) % 15_000) as f64;
                ActivityRecord::new(date, distance, distance * 0.3, distance / 100.0, 140.0)
            })
        })
        .collect()
}

fn benchmark_pipeline(c: &mut Criterion) {
    let records = synthetic_history();
    let days = aggregate_by_date(&records);
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

    let mut group = c.benchmark_group("pipeline");

    group.bench_function("aggregate_by_date", |b| {
        b.iter(|| aggregate_by_date(black_box(&records)))
    });

    group.bench_function("calculate_acwr", |b| {
        b.iter(|| calculate_acwr(black_box(&days), black_box(today)))
    });

    group.bench_function("dashboard", |b| {
        b.iter(|| dashboard(black_box(&days), black_box(today)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_pipeline);
criterion_main!(benches);
