//! Angular rates from orientation samples.
//!
//! Orientation differences are wrapped into `(-π, π]` before dividing by the
//! time step, so crossing the ±π boundary reads as a small rotation rather
//! than a near-full turn.

use motion_types::{DerivedSample, Metric, PoseSample, vec3, wrap_to_pi};

use crate::differentiate::time_step;

/// Angular velocity between two consecutive poses in rad/s.
///
/// Not available if the time step is not positive.
///
/// # Example
///
/// ```
/// use motion_metrics::angular_velocity;
/// use motion_types::PoseSample;
///
/// let a = PoseSample::new(0.0, 0, 0, [0.0; 3], [3.10, 0.0, 0.0]);
/// let b = PoseSample::new(1.0, 1, 0, [0.0; 3], [-3.10, 0.0, 0.0]);
///
/// let omega = angular_velocity(&a, &b).value().unwrap();
/// assert!((omega[0] - 0.0832).abs() < 1e-3);
/// ```
#[must_use]
pub fn angular_velocity(prev: &PoseSample, curr: &PoseSample) -> Metric<[f64; 3]> {
    time_step(curr.timestamp - prev.timestamp).map(|dt| {
        let delta = vec3::sub(curr.orientation, prev.orientation);
        vec3::div(vec3::map(delta, wrap_to_pi), dt)
    })
}

/// Fills angular velocity and angular speed of a differentiated track.
///
/// Sample 0 stays not available. Smoothed angular speed is initialised to
/// the raw value.
pub fn apply_angular(samples: &mut [DerivedSample]) {
    for i in 1..samples.len() {
        let omega = angular_velocity(&samples[i - 1].pose, &samples[i].pose);
        let current = &mut samples[i];
        current.angular_velocity = omega;
        current.angular_speed_raw = omega.map(vec3::norm);
        current.angular_speed = current.angular_speed_raw;
    }
}

/// Removes ±2π jumps from an angle sequence so it becomes continuous.
///
/// # Example
///
/// ```
/// use motion_metrics::unwrap_angles;
///
/// let unwrapped = unwrap_angles(&[3.0, -3.0, -2.9]);
/// assert!((unwrapped[1] - (-3.0 + std::f64::consts::TAU)).abs() < 1e-12);
/// assert!(unwrapped[2] > unwrapped[1]);
/// ```
#[must_use]
pub fn unwrap_angles(angles: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(angles.len());
    let Some(&first) = angles.first() else {
        return out;
    };
    out.push(first);

    let mut acc = first;
    for pair in angles.windows(2) {
        acc += wrap_to_pi(pair[1] - pair[0]);
        out.push(acc);
    }
    out
}
