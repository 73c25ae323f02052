//! Per-track aggregate statistics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{EntityId, Metric};

/// Closed interval covered by one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisRange {
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
}

impl AxisRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Computes the range of a sequence of values.
    ///
    /// Returns `None` if `values` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use motion_types::AxisRange;
    ///
    /// let r = AxisRange::from_values([0.3, -0.1, 0.2]).unwrap();
    /// assert_eq!(r.min, -0.1);
    /// assert_eq!(r.max, 0.3);
    /// assert!((r.range() - 0.4).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| {
            Some(match acc {
                None => Self::new(v, v),
                Some(r) => Self::new(r.min.min(v), r.max.max(v)),
            })
        })
    }

    /// Width of the interval (`max - min`).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Summary statistics of a scalar signal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalarStats {
    /// Number of values aggregated.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Sample standard deviation (`n - 1` denominator); undefined for one value.
    pub std_dev: Metric<f64>,
}

impl ScalarStats {
    /// Computes statistics over `values`.
    ///
    /// Returns `None` if `values` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use motion_types::ScalarStats;
    ///
    /// let s = ScalarStats::from_values(&[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(s.count, 3);
    /// assert!((s.mean - 2.0).abs() < 1e-12);
    /// assert!((s.std_dev.value().unwrap() - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let range = AxisRange::from_values(values.iter().copied())?;
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let std_dev = if values.len() > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
            Metric::Available((ss / (n - 1.0)).sqrt())
        } else {
            Metric::NotAvailable
        };

        Some(Self {
            count: values.len(),
            mean,
            min: range.min,
            max: range.max,
            std_dev,
        })
    }

    /// Applies a linear unit conversion to every statistic.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            count: self.count,
            mean: self.mean * factor,
            min: self.min * factor,
            max: self.max * factor,
            std_dev: self.std_dev.map(|s| s * factor.abs()),
        }
    }
}

/// Aggregate statistics for one tracked marker.
///
/// Built once after every [`DerivedSample`](crate::DerivedSample) of the track
/// exists; never mutated afterwards. Speed, acceleration and angular speed
/// statistics are over smoothed values, ignoring not-available entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackSummary {
    /// Marker identifier.
    pub entity_id: EntityId,

    /// Number of samples in the track.
    pub sample_count: usize,

    /// Timestamps of the first and last sample.
    pub time_range: AxisRange,

    /// Time between first and last sample in seconds.
    pub duration: f64,

    /// `(n - 1) / duration` in Hz; undefined for zero duration.
    pub sample_rate: Metric<f64>,

    /// Position range per axis in meters.
    pub position: [AxisRange; 3],

    /// Orientation range per axis in degrees.
    pub orientation_deg: [AxisRange; 3],

    /// Speed statistics in m/s.
    pub speed: Metric<ScalarStats>,

    /// Acceleration magnitude statistics in m/s².
    pub acceleration: Metric<ScalarStats>,

    /// Angular speed statistics in rad/s.
    pub angular_speed: Metric<ScalarStats>,

    /// Mean distance between consecutive samples in meters.
    pub mean_step_distance: Metric<f64>,

    /// Cumulative distance at the final sample in meters.
    pub total_distance: f64,
}
