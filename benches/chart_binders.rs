//! Chart binder benchmarks
//!
//! Every dashboard interaction re-runs one of the binders over the whole
//! dataset, so both should stay well under a millisecond for datasets of a
//! few thousand launches.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench chart_binders
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use launchdash::binder::{correlation_chart, proportion_chart};
use launchdash::dataset::{Dataset, LaunchRecord, Outcome};
use launchdash::filter::{PayloadRange, SiteFilter};

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Synthetic dataset with a deterministic spread of sites, masses and outcomes
fn create_bench_dataset(size: usize) -> Dataset {
    let records = (0..size)
        .map(|i| {
            let outcome = if i % 3 == 0 {
                Outcome::Failure
            } else {
                Outcome::Success
            };
            LaunchRecord::new(SITES[i % SITES.len()], ((i * 37) % 10_000) as f64, outcome)
        })
        .collect();
    Dataset::from_records(records)
}

fn bench_proportion_chart(c: &mut Criterion) {
    let mut group = c.benchmark_group("proportion_chart");

    for size in [100, 1_000, 10_000] {
        let dataset = create_bench_dataset(size);
        group.bench_with_input(BenchmarkId::new("all_sites", size), &dataset, |b, ds| {
            b.iter(|| proportion_chart(black_box(ds), &SiteFilter::All));
        });

        let site = SiteFilter::from_selection("KSC LC-39A");
        group.bench_with_input(BenchmarkId::new("single_site", size), &dataset, |b, ds| {
            b.iter(|| proportion_chart(black_box(ds), &site));
        });
    }

    group.finish();
}

fn bench_correlation_chart(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_chart");
    let range = PayloadRange::new(2_000.0, 8_000.0);

    for size in [100, 1_000, 10_000] {
        let dataset = create_bench_dataset(size);
        group.bench_with_input(BenchmarkId::new("all_sites", size), &dataset, |b, ds| {
            b.iter(|| correlation_chart(black_box(ds), &SiteFilter::All, range));
        });
    }

    group.finish();
}

fn bench_figure_serialization(c: &mut Criterion) {
    let dataset = create_bench_dataset(1_000);
    let figure = correlation_chart(&dataset, &SiteFilter::All, PayloadRange::new(0.0, 10_000.0));

    c.bench_function("correlation_to_json", |b| {
        b.iter(|| black_box(&figure).to_json());
    });
}

criterion_group!(
    benches,
    bench_proportion_chart,
    bench_correlation_chart,
    bench_figure_serialization
);
criterion_main!(benches);
