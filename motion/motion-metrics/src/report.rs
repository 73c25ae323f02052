//! Human-readable run summary.

use std::fmt::Write;

use motion_types::{AngleUnit, Metric, ScalarStats, TrackSummary};

use crate::analysis::Analysis;

const RULE_WIDTH: usize = 70;

impl Analysis {
    /// Renders a text summary of every analysed track.
    ///
    /// Angular speeds are shown in `unit` per second.
    #[must_use]
    #[allow(clippy::let_underscore_must_use)] // String::write_fmt is infallible
    pub fn to_report(&self, unit: AngleUnit) -> String {
        let mut report = String::new();
        let _ = writeln!(report, "{}", "=".repeat(RULE_WIDTH));
        let _ = writeln!(report, "Trajectory Analysis Summary");
        let _ = writeln!(report, "{}", "=".repeat(RULE_WIDTH));

        for track in self.tracks.values() {
            write_track(&mut report, &track.summary, unit);
        }

        let overall = &self.overall;
        let _ = writeln!(report, "\nOverall:");
        let _ = writeln!(
            report,
            "  Markers analysed: {} of {}",
            overall.analyzed_tracks, overall.entity_count
        );
        let _ = writeln!(report, "  Samples: {}", overall.sample_count);
        if let Metric::Available(span) = overall.time_span {
            let _ = writeln!(
                report,
                "  Time span: {:.2} s to {:.2} s ({:.2} s)",
                span.min,
                span.max,
                span.range()
            );
        }
        let _ = writeln!(report, "  Total distance: {:.4} m", overall.total_distance);

        let warnings = self.warnings().count();
        let errors = self.errors().count();
        if warnings + errors > 0 {
            let _ = writeln!(report, "\nDiagnostics ({warnings} warnings, {errors} errors):");
            for diagnostic in &self.diagnostics {
                let _ = writeln!(report, "  {diagnostic}");
            }
        }

        report
    }
}

#[allow(clippy::let_underscore_must_use)]
fn write_track(report: &mut String, s: &TrackSummary, unit: AngleUnit) {
    let _ = writeln!(report, "\nMarker {}:", s.entity_id);
    let _ = writeln!(report, "{}", "-".repeat(RULE_WIDTH));

    let _ = writeln!(report, "\nTime:");
    let _ = writeln!(report, "  Duration: {:.2} s", s.duration);
    let _ = writeln!(report, "  Samples: {}", s.sample_count);
    let _ = writeln!(report, "  Sample rate: {} Hz", fixed(s.sample_rate, 1));

    let _ = writeln!(report, "\nPosition range:");
    for (name, r) in ["X", "Y", "Z"].iter().zip(s.position) {
        let _ = writeln!(
            report,
            "  {name}: [{:.4}, {:.4}] m (range: {:.4} m)",
            r.min,
            r.max,
            r.range()
        );
    }

    let _ = writeln!(report, "\nDistance:");
    let _ = writeln!(report, "  Total: {:.4} m", s.total_distance);
    let _ = writeln!(
        report,
        "  Mean per step: {} m",
        fixed(s.mean_step_distance, 6)
    );

    if let Metric::Available(speed) = s.speed {
        let _ = writeln!(report, "\nSpeed:");
        let _ = writeln!(report, "  Mean: {:.4} m/s", speed.mean);
        let _ = writeln!(report, "  Max: {:.4} m/s", speed.max);
        let _ = writeln!(report, "  Min: {:.4} m/s", speed.min);
        let _ = writeln!(report, "  Std dev: {} m/s", fixed(speed.std_dev, 4));
    }

    if let Metric::Available(accel) = s.acceleration {
        let _ = writeln!(report, "\nAcceleration:");
        let _ = writeln!(report, "  Mean: {:.4} m/s²", accel.mean);
        let _ = writeln!(report, "  Max: {:.4} m/s²", accel.max);
    }

    let _ = writeln!(report, "\nRotation range:");
    for (name, r) in ["Rx", "Ry", "Rz"].iter().zip(s.orientation_deg) {
        let _ = writeln!(report, "  {name}: [{:.2}, {:.2}] deg", r.min, r.max);
    }

    if let Metric::Available(angular) = s.angular_speed {
        let angular: ScalarStats = angular.scaled(unit.from_radians(1.0));
        let label = unit.rate_label();
        let _ = writeln!(report, "\nAngular speed:");
        let _ = writeln!(report, "  Mean: {:.4} {label}", angular.mean);
        let _ = writeln!(report, "  Max: {:.4} {label}", angular.max);
    }
}

fn fixed(value: Metric<f64>, precision: usize) -> String {
    match value {
        Metric::Available(v) => format!("{v:.precision$}"),
        Metric::NotAvailable => crate::export::NOT_AVAILABLE.to_string(),
    }
}
