//! Per-track and overall summary statistics.

use motion_types::{AxisRange, DerivedSample, EntityId, Metric, ScalarStats, TrackSummary};
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

/// Reduces a derived track to its summary.
///
/// Not-available entries are ignored. The reduction is pure, so repeated
/// calls on the same samples give identical results.
///
/// # Errors
///
/// Returns [`MetricsError::InsufficientSamples`] if `samples` is empty.
///
/// # Example
///
/// ```
/// use motion_metrics::{differentiate, summarize};
/// use motion_types::{EntityTrack, PoseSample};
///
/// let track = EntityTrack::new(
///     0,
///     vec![
///         PoseSample::new(0.0, 0, 0, [0.0; 3], [0.0; 3]),
///         PoseSample::new(1.0, 1, 0, [2.0, 0.0, 0.0], [0.0; 3]),
///         PoseSample::new(2.0, 2, 0, [2.0, 1.0, 0.0], [0.0; 3]),
///     ],
/// )
/// .unwrap();
/// let derived = differentiate(&track).unwrap().samples;
///
/// let summary = summarize(0, &derived).unwrap();
/// assert_eq!(summary.duration, 2.0);
/// assert_eq!(summary.sample_rate.value(), Some(1.0));
/// assert_eq!(summary.total_distance, 3.0);
/// assert_eq!(summary.position[0].max, 2.0);
/// ```
pub fn summarize(entity_id: EntityId, samples: &[DerivedSample]) -> Result<TrackSummary> {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Err(MetricsError::insufficient_samples(entity_id, 0));
    };

    let time_range = AxisRange::new(first.timestamp(), last.timestamp());
    let duration = time_range.range();
    #[allow(clippy::cast_precision_loss)]
    let sample_rate = if duration > 0.0 {
        Metric::Available((samples.len() - 1) as f64 / duration)
    } else {
        Metric::NotAvailable
    };

    let axis_range = |f: &dyn Fn(&DerivedSample) -> f64| {
        AxisRange::from_values(samples.iter().map(f)).unwrap_or_default()
    };
    let position = [0, 1, 2].map(|axis| axis_range(&|s| s.pose.position[axis]));
    let orientation_deg = [0, 1, 2].map(|axis| axis_range(&|s| s.orientation_deg[axis]));

    let stats = |f: fn(&DerivedSample) -> Metric<f64>| -> Metric<ScalarStats> {
        let values: Vec<f64> = samples.iter().filter_map(|s| f(s).value()).collect();
        ScalarStats::from_values(&values).into()
    };

    let speed = stats(|s| s.speed);
    let acceleration = stats(|s| s.acceleration_magnitude);
    let angular_speed = stats(|s| s.angular_speed);
    let mean_step_distance = stats(|s| s.distance_step).map(|s| s.mean);

    Ok(TrackSummary {
        entity_id,
        sample_count: samples.len(),
        time_range,
        duration,
        sample_rate,
        position,
        orientation_deg,
        speed,
        acceleration,
        angular_speed,
        mean_step_distance,
        total_distance: last.cumulative_distance,
    })
}

/// Totals across every analysed entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverallSummary {
    /// Entities seen in the input (analysed plus failed).
    pub entity_count: usize,
    /// Entities with a complete result.
    pub analyzed_tracks: usize,
    /// Entities reported only as a diagnostic.
    pub failed_tracks: usize,
    /// Samples across analysed tracks.
    pub sample_count: usize,
    /// Earliest start and latest end among analysed tracks.
    pub time_span: Metric<AxisRange>,
    /// Sum of per-track total distances in meters.
    pub total_distance: f64,
}

impl OverallSummary {
    /// Combines per-track summaries.
    #[must_use]
    pub fn from_summaries<'a>(
        summaries: impl IntoIterator<Item = &'a TrackSummary>,
        failed_tracks: usize,
    ) -> Self {
        let mut overall = Self {
            failed_tracks,
            ..Self::default()
        };
        let mut span: Option<AxisRange> = None;

        for summary in summaries {
            overall.analyzed_tracks += 1;
            overall.sample_count += summary.sample_count;
            overall.total_distance += summary.total_distance;
            span = Some(match span {
                None => summary.time_range,
                Some(r) => AxisRange::new(
                    r.min.min(summary.time_range.min),
                    r.max.max(summary.time_range.max),
                ),
            });
        }

        overall.entity_count = overall.analyzed_tracks + failed_tracks;
        overall.time_span = span.into();
        overall
    }

    /// Length of the overall time span in seconds.
    #[must_use]
    pub fn duration(&self) -> Metric<f64> {
        self.time_span.map(|r| r.range())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use approx::assert_relative_eq;
    use motion_types::{EntityTrack, PoseSample};

    use super::*;
    use crate::angular::apply_angular;
    use crate::differentiate::differentiate;

    fn derived(points: &[(f64, [f64; 3], [f64; 3])]) -> Vec<DerivedSample> {
        let samples = points
            .iter()
            .map(|&(t, p, r)| PoseSample::new(t, 0, 1, p, r))
            .collect();
        let track = EntityTrack::new(1, samples).unwrap();
        let mut out = differentiate(&track).unwrap().samples;
        apply_angular(&mut out);
        out
    }

    #[test]
    fn summary_fields() {
        let samples = derived(&[
            (0.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            (0.5, [1.0, -1.0, 0.0], [0.1, 0.0, 0.0]),
            (1.0, [2.0, -2.0, 0.5], [0.2, 0.0, 0.0]),
            (1.5, [3.0, -1.0, 0.5], [0.3, 0.0, 0.0]),
        ]);
        let s = summarize(1, &samples).unwrap();

        assert_eq!(s.entity_id, 1);
        assert_eq!(s.sample_count, 4);
        assert_eq!(s.time_range, AxisRange::new(0.0, 1.5));
        assert_eq!(s.duration, 1.5);
        assert_relative_eq!(s.sample_rate.value().unwrap(), 2.0);
        assert_eq!(s.position[0], AxisRange::new(0.0, 3.0));
        assert_eq!(s.position[1], AxisRange::new(-2.0, 0.0));
        assert_eq!(s.position[2], AxisRange::new(0.0, 0.5));
        assert_relative_eq!(s.orientation_deg[0].max, 0.3_f64.to_degrees(), epsilon = 1e-9);

        let speed = s.speed.value().unwrap();
        assert_eq!(speed.count, 3);
        assert_eq!(s.acceleration.value().unwrap().count, 2);

        let angular = s.angular_speed.value().unwrap();
        assert_relative_eq!(angular.mean, 0.2, epsilon = 1e-9);

        assert_relative_eq!(s.total_distance, samples[3].cumulative_distance);
        assert_relative_eq!(
            s.mean_step_distance.value().unwrap(),
            s.total_distance / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn zero_duration_has_no_rate() {
        let samples = derived(&[
            (1.0, [0.0; 3], [0.0; 3]),
            (1.0, [1.0, 0.0, 0.0], [0.0; 3]),
        ]);
        let s = summarize(1, &samples).unwrap();
        assert_eq!(s.duration, 0.0);
        assert!(s.sample_rate.is_not_available());
        assert!(s.speed.is_not_available());
        assert_eq!(s.total_distance, 1.0);
    }

    #[test]
    fn empty_is_error() {
        assert_eq!(
            summarize(3, &[]).unwrap_err(),
            MetricsError::insufficient_samples(3, 0)
        );
    }

    #[test]
    fn summarize_is_idempotent() {
        let samples = derived(&[
            (0.0, [0.0; 3], [0.0; 3]),
            (0.1, [0.3, 0.1, 0.0], [0.5, -0.2, 3.1]),
            (0.2, [0.5, 0.2, 0.1], [0.4, -0.1, -3.1]),
        ]);
        assert_eq!(summarize(1, &samples).unwrap(), summarize(1, &samples).unwrap());
    }

    #[test]
    fn overall_combines_tracks() {
        let a = summarize(
            1,
            &derived(&[(0.0, [0.0; 3], [0.0; 3]), (2.0, [1.0, 0.0, 0.0], [0.0; 3])]),
        )
        .unwrap();
        let b = summarize(
            1,
            &derived(&[
                (1.0, [0.0; 3], [0.0; 3]),
                (2.0, [0.0, 2.0, 0.0], [0.0; 3]),
                (3.0, [0.0, 2.0, 0.0], [0.0; 3]),
            ]),
        )
        .unwrap();

        let overall = OverallSummary::from_summaries([&a, &b], 2);
        assert_eq!(overall.entity_count, 4);
        assert_eq!(overall.analyzed_tracks, 2);
        assert_eq!(overall.failed_tracks, 2);
        assert_eq!(overall.sample_count, 5);
        assert_eq!(overall.time_span.value(), Some(AxisRange::new(0.0, 3.0)));
        assert_eq!(overall.duration().value(), Some(3.0));
        assert_eq!(overall.total_distance, 3.0);
    }

    #[test]
    fn overall_empty() {
        let overall = OverallSummary::from_summaries(std::iter::empty(), 1);
        assert_eq!(overall.entity_count, 1);
        assert!(overall.time_span.is_not_available());
    }
}
