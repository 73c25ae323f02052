//! Benchmarks for the motion-metrics pipeline.
//!
//! Run with: cargo bench -p motion-metrics
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p motion-metrics -- --save-baseline main
//! 2. After changes: cargo bench -p motion-metrics -- --baseline main

#![allow(missing_docs, clippy::cast_precision_loss, clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use motion_metrics::{
    AnalysisConfig, MotionAnalyzer, SampleStore, SavitzkyGolay, Smoother, SmoothingConfig,
};
use motion_types::{Metric, PoseSample};

// =============================================================================
// Test Data Generation
// =============================================================================

/// Interleaved recording of `markers` markers at 30 Hz for `frames` frames.
fn recording(markers: u32, frames: u32) -> SampleStore {
    let mut samples = Vec::with_capacity((markers * frames) as usize);
    for frame in 0..frames {
        let t = f64::from(frame) / 30.0;
        for marker in 0..markers {
            let phase = f64::from(marker);
            samples.push(PoseSample::new(
                t,
                u64::from(frame),
                marker,
                [(t + phase).sin(), (t + phase).cos(), 0.3 + 0.01 * t],
                [0.1 * t, 0.0, ((t * 2.0) % 6.0) - 3.0],
            ));
        }
    }
    SampleStore::new(samples)
}

// =============================================================================
// Pipeline Benchmarks
// =============================================================================

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("Analysis");

    let test_cases = [
        ("1x1000", recording(1, 1000)),
        ("4x1000", recording(4, 1000)),
        ("16x1000", recording(16, 1000)),
        ("4x10000", recording(4, 10_000)),
    ];

    for (name, store) in &test_cases {
        group.throughput(Throughput::Elements(store.len() as u64));

        let parallel = MotionAnalyzer::new(AnalysisConfig::default());
        group.bench_with_input(BenchmarkId::new("parallel", name), store, |b, store| {
            b.iter(|| parallel.analyze(black_box(store)));
        });

        let sequential = MotionAnalyzer::new(AnalysisConfig::default().sequential());
        group.bench_with_input(BenchmarkId::new("sequential", name), store, |b, store| {
            b.iter(|| sequential.analyze(black_box(store)));
        });
    }

    group.finish();
}

// =============================================================================
// Smoothing Benchmarks
// =============================================================================

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Smoothing");

    let signal: Vec<f64> = (0..10_000).map(|i| (f64::from(i) * 0.01).sin()).collect();
    let series: Vec<Metric<f64>> = signal
        .iter()
        .enumerate()
        .map(|(i, v)| if i % 500 == 0 { Metric::NotAvailable } else { Metric::Available(*v) })
        .collect();

    for (window, order) in [(5, 2), (11, 3), (21, 4)] {
        group.bench_function(BenchmarkId::new("filter_build", window), |b| {
            b.iter(|| SavitzkyGolay::new(black_box(window), black_box(order)).unwrap());
        });

        let filter = SavitzkyGolay::new(window, order).unwrap();
        group.bench_function(BenchmarkId::new("apply_10k", window), |b| {
            b.iter(|| filter.apply(black_box(&signal)));
        });

        let mut smoother = Smoother::new(SmoothingConfig::new(window, order)).unwrap();
        group.bench_function(BenchmarkId::new("series_with_gaps_10k", window), |b| {
            b.iter(|| smoother.smooth_series(black_box(&series)).unwrap());
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_analysis, bench_smoothing);

criterion_main!(benches);
