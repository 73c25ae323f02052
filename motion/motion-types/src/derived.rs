//! Pose samples extended with derived motion metrics.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Metric, PoseSample, to_degrees, vec3, wrap_degrees};

/// A pose sample with its kinematic and angular derivatives.
///
/// Derived fields of the first sample of a track are
/// [`Metric::NotAvailable`]; so are acceleration fields of the second sample
/// and any derivative taken across a zero-length time step.
///
/// The unprefixed `speed`, `acceleration_magnitude` and `angular_speed`
/// fields hold smoothed values; their `*_raw` counterparts keep the
/// unsmoothed values for comparison. Angular rates are in rad/s.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DerivedSample {
    /// The source observation.
    pub pose: PoseSample,

    /// Velocity in m/s: `[vx, vy, vz]`.
    pub velocity: Metric<[f64; 3]>,

    /// Smoothed speed in m/s.
    pub speed: Metric<f64>,

    /// Unsmoothed speed in m/s.
    pub speed_raw: Metric<f64>,

    /// Acceleration in m/s²: `[ax, ay, az]`.
    pub acceleration: Metric<[f64; 3]>,

    /// Smoothed acceleration magnitude in m/s².
    pub acceleration_magnitude: Metric<f64>,

    /// Unsmoothed acceleration magnitude in m/s².
    pub acceleration_raw: Metric<f64>,

    /// Distance from the previous sample in meters.
    pub distance_step: Metric<f64>,

    /// Distance traveled since the start of the track in meters.
    pub cumulative_distance: f64,

    /// Orientation in degrees, each axis wrapped to `[-180, 180)`.
    pub orientation_deg: [f64; 3],

    /// Angular velocity in rad/s: `[omega_x, omega_y, omega_z]`.
    pub angular_velocity: Metric<[f64; 3]>,

    /// Smoothed angular speed in rad/s.
    pub angular_speed: Metric<f64>,

    /// Unsmoothed angular speed in rad/s.
    pub angular_speed_raw: Metric<f64>,
}

impl DerivedSample {
    /// Creates a derived sample with no derivatives yet.
    ///
    /// # Example
    ///
    /// ```
    /// use motion_types::{DerivedSample, PoseSample};
    ///
    /// let pose = PoseSample::new(0.0, 0, 1, [0.0; 3], [std::f64::consts::FRAC_PI_2, 0.0, 0.0]);
    /// let d = DerivedSample::new(pose);
    ///
    /// assert!(d.speed.is_not_available());
    /// assert_eq!(d.cumulative_distance, 0.0);
    /// assert!((d.orientation_deg[0] - 90.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn new(pose: PoseSample) -> Self {
        Self {
            pose,
            velocity: Metric::NotAvailable,
            speed: Metric::NotAvailable,
            speed_raw: Metric::NotAvailable,
            acceleration: Metric::NotAvailable,
            acceleration_magnitude: Metric::NotAvailable,
            acceleration_raw: Metric::NotAvailable,
            distance_step: Metric::NotAvailable,
            cumulative_distance: 0.0,
            orientation_deg: vec3::map(pose.orientation, |r| wrap_degrees(to_degrees(r))),
            angular_velocity: Metric::NotAvailable,
            angular_speed: Metric::NotAvailable,
            angular_speed_raw: Metric::NotAvailable,
        }
    }

    /// Timestamp of the source observation.
    #[must_use]
    pub const fn timestamp(&self) -> f64 {
        self.pose.timestamp
    }
}
