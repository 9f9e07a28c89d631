//! Pipeline benchmarks for chicama.
//!
//! Run with: `cargo bench --package chicama-bench`
//!
//! Measures the CPU-bound stages of a fetch session: business-day
//! math, timestamp normalization with gap filling, and CSV encoding.

use std::time::Duration;

use chicama_bench::{session_raw_bars, vix_raw_bars};
use chicama_format::CsvSink;
use chicama_normalize::{GapFiller, TimestampNormalizer};
use chicama_types::paginate::business_days;
use chicama_types::{Bar, BarSink, SessionProfile};
use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tempfile::TempDir;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

/// Runs bars through normalization and gap filling, returning rows.
fn run_pipeline(bars: &[chicama_types::RawBar], profile: SessionProfile) -> Vec<Bar> {
    let mut normalizer = TimestampNormalizer::new(profile);
    let mut filler = GapFiller::new(profile);
    let mut rows = Vec::new();
    for raw in bars {
        let bar = normalizer.normalize(raw).unwrap();
        rows.extend(filler.process(bar));
    }
    rows
}

fn business_days_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("business_days");
    let from = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

    for years in [1_i32, 5, 20] {
        let to = NaiveDate::from_ymd_opt(2020 + years, 1, 1).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(years), &to, |b, to| {
            b.iter(|| business_days(from, *to));
        });
    }

    group.finish();
}

fn normalize_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for days in [1_usize, 20] {
        let bars = session_raw_bars(start_date(), days);
        group.throughput(Throughput::Elements(bars.len() as u64));
        group.bench_with_input(BenchmarkId::new("us-equity", days), &bars, |b, bars| {
            b.iter(|| run_pipeline(bars, SessionProfile::UsEquity).len());
        });
    }

    let bars = vix_raw_bars(start_date(), 5);
    group.throughput(Throughput::Elements(bars.len() as u64));
    group.bench_with_input(BenchmarkId::new("cboe-vix", 5_usize), &bars, |b, bars| {
        b.iter(|| run_pipeline(bars, SessionProfile::CboeVix).len());
    });

    group.finish();
}

fn csv_write_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_write");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    let raw = session_raw_bars(start_date(), 20);
    let rows = run_pipeline(&raw, SessionProfile::UsEquity);
    group.throughput(Throughput::Elements(rows.len() as u64));

    group.bench_function("memory", |b| {
        b.iter(|| {
            let mut sink = CsvSink::new(Vec::new());
            for row in &rows {
                sink.append(row).unwrap();
            }
            sink.finish().unwrap();
            sink.into_inner().len()
        });
    });

    group.bench_function("tempfile", |b| {
        b.iter(|| {
            let dir = TempDir::new().unwrap();
            let mut sink = CsvSink::create(dir.path().join("bars.csv")).unwrap();
            for row in &rows {
                sink.append(row).unwrap();
            }
            sink.finish().unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    business_days_benchmark,
    normalize_benchmark,
    csv_write_benchmark
);
criterion_main!(benches);
