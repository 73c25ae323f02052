//! End-to-end scenarios through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use approx::assert_relative_eq;
use motion_metrics::{
    AnalysisConfig, Cell, DuplicatePolicy, MetricsError, MotionAnalyzer, SampleStore, analyze,
    sample_table, summary_table,
};
use motion_types::{AngleUnit, Metric, PoseSample};

const HEADER: [&str; 9] = ["timestamp", "frame", "marker_id", "x", "y", "z", "rx", "ry", "rz"];

fn store(rows: &[[&str; 9]]) -> SampleStore {
    SampleStore::parse(&HEADER, rows).unwrap()
}

fn available(values: impl IntoIterator<Item = Metric<f64>>) -> Vec<Option<f64>> {
    values.into_iter().map(Metric::into_option).collect()
}

#[test]
fn three_sample_walk() {
    let store = store(&[
        ["0.0", "0", "0", "0", "0", "0.30", "0", "0", "0"],
        ["0.039", "1", "0", "0.01", "0", "0.30", "0", "0", "0"],
        ["0.078", "2", "0", "0.02", "0", "0.30", "0", "0", "0"],
    ]);
    let analysis = MotionAnalyzer::new(AnalysisConfig::default()).analyze(&store);
    let samples = &analysis.track(0).unwrap().samples;

    let steps = available(samples.iter().map(|s| s.distance_step));
    assert!(steps[0].is_none());
    assert_relative_eq!(steps[1].unwrap(), 0.01, epsilon = 1e-12);
    assert_relative_eq!(steps[2].unwrap(), 0.01, epsilon = 1e-12);

    assert_eq!(samples[0].cumulative_distance, 0.0);
    assert_relative_eq!(samples[1].cumulative_distance, 0.01, epsilon = 1e-12);
    assert_relative_eq!(samples[2].cumulative_distance, 0.02, epsilon = 1e-12);

    let speed = samples[1].speed_raw.value().unwrap();
    assert_relative_eq!(speed, 0.256, epsilon = 1e-3);

    // Too short to smooth: smoothed equals raw.
    assert_eq!(samples[1].speed, samples[1].speed_raw);
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn angle_wrap_reads_as_short_rotation() {
    let samples = vec![
        PoseSample::new(0.0, 0, 0, [0.0; 3], [3.10, 0.0, 0.0]),
        PoseSample::new(1.0, 1, 0, [0.0; 3], [-3.10, 0.0, 0.0]),
    ];
    let analysis = analyze(samples, &AnalysisConfig::default());
    let track = analysis.track(0).unwrap();

    let angular = track.samples[1].angular_speed_raw.value().unwrap();
    assert!(angular < 0.1, "expected ~0.08 rad/s, got {angular}");
    assert_relative_eq!(angular, 2.0 * std::f64::consts::PI - 6.2, epsilon = 1e-9);
}

#[test]
fn repeated_timestamp_never_divides_by_zero() {
    let samples = vec![
        PoseSample::new(0.0, 0, 0, [0.0; 3], [0.0; 3]),
        PoseSample::new(1.0, 1, 0, [1.0, 0.0, 0.0], [0.1, 0.0, 0.0]),
        PoseSample::new(1.0, 2, 0, [2.0, 0.0, 0.0], [0.2, 0.0, 0.0]),
        PoseSample::new(2.0, 3, 0, [3.0, 0.0, 0.0], [0.3, 0.0, 0.0]),
    ];
    let config = AnalysisConfig::default().with_duplicates(DuplicatePolicy::Keep);
    let analysis = analyze(samples, &config);
    let track = analysis.track(0).unwrap();

    let at_duplicate = &track.samples[2];
    assert!(at_duplicate.velocity.is_not_available());
    assert!(at_duplicate.speed_raw.is_not_available());
    assert!(at_duplicate.angular_velocity.is_not_available());
    for s in &track.samples {
        for v in [s.speed, s.speed_raw, s.acceleration_raw, s.angular_speed_raw] {
            if let Metric::Available(v) = v {
                assert!(v.is_finite());
            }
        }
    }

    assert!(matches!(
        analysis.diagnostics[0].issue,
        MetricsError::DegenerateTimeStep { index: 2, .. }
    ));
}

#[test]
fn interleaved_entities_match_isolated_runs() {
    let mut interleaved = Vec::new();
    let mut only_a = Vec::new();
    let mut only_b = Vec::new();
    for i in 0..20_u32 {
        let t = f64::from(i) / 30.0;
        let a = PoseSample::new(t, u64::from(i), 0, [t.sin(), t.cos(), 0.3], [0.0, 0.0, t]);
        let b = PoseSample::new(t, u64::from(i), 1, [2.0 * t, 0.0, 0.5 * t * t], [t, 0.0, 0.0]);
        interleaved.push(a);
        interleaved.push(b);
        only_a.push(a);
        only_b.push(b);
    }

    let config = AnalysisConfig::default();
    let together = analyze(interleaved, &config);
    let alone_a = analyze(only_a, &config);
    let alone_b = analyze(only_b, &config);

    assert_eq!(together.track(0), alone_a.track(0));
    assert_eq!(together.track(1), alone_b.track(1));
}

#[test]
fn shuffled_input_is_sorted() {
    let ordered: Vec<PoseSample> = (0..10_u32)
        .map(|i| {
            let t = f64::from(i) * 0.1;
            PoseSample::new(t, u64::from(i), 0, [t * t, 0.0, 0.0], [0.0; 3])
        })
        .collect();
    let mut shuffled = ordered.clone();
    shuffled.reverse();
    shuffled.swap(2, 7);

    let config = AnalysisConfig::default();
    assert_eq!(
        analyze(ordered, &config).tracks,
        analyze(shuffled, &config).tracks
    );
}

#[test]
fn missing_column_fails_before_analysis() {
    let header = ["timestamp", "marker_id", "x", "y", "rx", "ry", "rz"];
    let rows: Vec<Vec<&str>> = vec![vec!["0", "0", "0", "0", "0", "0", "0"]];
    let err = SampleStore::parse(&header, &rows).unwrap_err();
    assert_eq!(err, MetricsError::missing_columns(["z"]));
}

#[test]
fn exported_tables_bind_by_name() {
    let samples: Vec<PoseSample> = (0..12_u32)
        .map(|i| {
            let t = f64::from(i) * 0.04;
            PoseSample::new(t, u64::from(i), 3, [0.1 * t, 0.0, 0.3], [0.0, 0.0, 0.5 * t])
        })
        .collect();
    let analysis = analyze(samples, &AnalysisConfig::default());

    let table = sample_table(&analysis, AngleUnit::Degrees);
    assert_eq!(table.len(), 12);
    let speed = table.column("speed_raw").unwrap();
    assert_eq!(speed[0], Cell::NotAvailable);
    assert_relative_eq!(speed[5].as_f64().unwrap(), 0.1, epsilon = 1e-9);

    let omega = table.column("omega_z").unwrap();
    assert_relative_eq!(omega[5].as_f64().unwrap(), 0.5_f64.to_degrees(), epsilon = 1e-9);

    let summary = summary_table(&analysis, AngleUnit::Radians);
    assert_eq!(summary.column("entity_id").unwrap(), vec![Cell::Int(3)]);
    assert_relative_eq!(
        summary.column("sample_rate").unwrap()[0].as_f64().unwrap(),
        25.0,
        epsilon = 1e-9
    );

    let rendered: Vec<Vec<String>> = table.records().collect();
    assert_eq!(rendered[0][table.column_index("omega_z").unwrap()], "NA");
}

#[test]
fn summary_is_idempotent_across_runs() {
    let samples: Vec<PoseSample> = (0..30_u32)
        .map(|i| {
            let t = f64::from(i) * 0.033;
            PoseSample::new(t, u64::from(i), 0, [t.sin(), 0.0, 0.0], [0.0, t.cos(), 0.0])
        })
        .collect();
    let config = AnalysisConfig::default();
    let first = analyze(samples.clone(), &config);
    let second = analyze(samples, &config);
    assert_eq!(first.track(0).unwrap().summary, second.track(0).unwrap().summary);
    assert_eq!(first.overall, second.overall);
}
