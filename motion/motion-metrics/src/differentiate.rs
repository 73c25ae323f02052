//! Finite-difference kinematics.
//!
//! Forward differences, `(current - previous) / dt`, between consecutive
//! samples of one track:
//!
//! ```text
//! d_i = |p_i - p_{i-1}|               distance step
//! v_i = (p_i - p_{i-1}) / dt_i        velocity
//! a_i = (v_i - v_{i-1}) / dt_i        acceleration
//! ```
//!
//! Sample 0 has no velocity; samples 0 and 1 have no acceleration. A step
//! with `dt_i <= 0` leaves the derivatives that depend on it not available.

use motion_types::{DerivedSample, EntityTrack, Metric, vec3};
use tracing::warn;

use crate::error::{Diagnostic, MetricsError, Result};

/// Derived samples of one track plus any warnings raised along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Differentiated {
    /// One derived sample per input sample, same order.
    pub samples: Vec<DerivedSample>,
    /// Degenerate time step warnings.
    pub diagnostics: Vec<Diagnostic>,
}

/// Returns `dt` if it can be divided by.
pub(crate) fn time_step(dt: f64) -> Metric<f64> {
    if dt > 0.0 && dt.is_finite() {
        Metric::Available(dt)
    } else {
        Metric::NotAvailable
    }
}

/// Computes distance, velocity, speed and acceleration for every sample.
///
/// Smoothed fields are initialised to their raw values.
///
/// # Errors
///
/// Returns [`MetricsError::InsufficientSamples`] if the track has fewer than
/// two samples.
///
/// # Example
///
/// ```
/// use motion_metrics::differentiate;
/// use motion_types::{EntityTrack, PoseSample};
///
/// let track = EntityTrack::new(
///     0,
///     vec![
///         PoseSample::new(0.0, 0, 0, [0.0, 0.0, 0.0], [0.0; 3]),
///         PoseSample::new(0.5, 1, 0, [1.0, 0.0, 0.0], [0.0; 3]),
///         PoseSample::new(1.0, 2, 0, [3.0, 0.0, 0.0], [0.0; 3]),
///     ],
/// )
/// .unwrap();
///
/// let out = differentiate(&track).unwrap();
/// assert!(out.samples[0].speed_raw.is_not_available());
/// assert_eq!(out.samples[1].speed_raw.value(), Some(2.0));
/// assert_eq!(out.samples[2].acceleration_raw.value(), Some(4.0));
/// assert_eq!(out.samples[2].cumulative_distance, 3.0);
/// ```
pub fn differentiate(track: &EntityTrack) -> Result<Differentiated> {
    let entity_id = track.entity_id();
    let poses = track.samples();
    if poses.len() < 2 {
        return Err(MetricsError::insufficient_samples(entity_id, poses.len()));
    }

    let mut samples: Vec<DerivedSample> = Vec::with_capacity(poses.len());
    let mut diagnostics = Vec::new();
    let mut cumulative = 0.0;

    for (index, pose) in poses.iter().enumerate() {
        let mut current = DerivedSample::new(*pose);

        if let Some(prev) = samples.last() {
            let step = vec3::sub(pose.position, prev.pose.position);
            let distance = pose.distance_to(&prev.pose);
            cumulative += distance;
            current.distance_step = Metric::Available(distance);

            let dt = time_step(pose.timestamp - prev.pose.timestamp);
            if dt.is_not_available() {
                warn!(
                    entity_id,
                    index,
                    timestamp = pose.timestamp,
                    "Zero-length time step; derivatives not available"
                );
                diagnostics.push(Diagnostic::for_entity(
                    entity_id,
                    MetricsError::degenerate_time_step(entity_id, index, pose.timestamp),
                ));
            }

            current.velocity = dt.map(|dt| vec3::div(step, dt));
            current.speed_raw = current.velocity.map(vec3::norm);
            current.acceleration = prev
                .velocity
                .zip(current.velocity)
                .zip(dt)
                .map(|((v0, v1), dt)| vec3::div(vec3::sub(v1, v0), dt));
            current.acceleration_raw = current.acceleration.map(vec3::norm);
        }

        current.cumulative_distance = cumulative;
        current.speed = current.speed_raw;
        current.acceleration_magnitude = current.acceleration_raw;
        samples.push(current);
    }

    Ok(Differentiated {
        samples,
        diagnostics,
    })
}
