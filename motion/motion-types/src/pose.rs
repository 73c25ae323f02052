//! Raw pose observations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::vec3;

/// Identifier of a tracked marker.
pub type EntityId = u32;

/// One observation of a tracked marker.
///
/// Produced by an upstream pose estimator (marker detector, motion capture
/// driver) and never mutated afterwards.
///
/// # Units
///
/// - Timestamp: seconds (≥ 0)
/// - Position: meters, `[x, y, z]`
/// - Orientation: radians, `[rx, ry, rz]`, each in `(-π, π]`
///
/// # Example
///
/// ```
/// use motion_types::PoseSample;
///
/// let a = PoseSample::new(0.0, 0, 3, [0.0, 0.0, 0.3], [0.0; 3]);
/// let b = PoseSample::new(0.1, 1, 3, [0.3, 0.4, 0.3], [0.0; 3]);
/// assert!((a.distance_to(&b) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoseSample {
    /// Capture time in seconds.
    pub timestamp: f64,

    /// Source frame number. Carried through to the output untouched.
    pub frame: u64,

    /// Marker identifier.
    pub entity_id: EntityId,

    /// Position in meters: `[x, y, z]`.
    pub position: [f64; 3],

    /// Orientation in radians: `[rx, ry, rz]`.
    pub orientation: [f64; 3],
}

impl PoseSample {
    /// Creates a new pose sample.
    #[must_use]
    pub const fn new(
        timestamp: f64,
        frame: u64,
        entity_id: EntityId,
        position: [f64; 3],
        orientation: [f64; 3],
    ) -> Self {
        Self {
            timestamp,
            frame,
            entity_id,
            position,
            orientation,
        }
    }

    /// Euclidean distance between the positions of two samples.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        vec3::distance(self.position, other.position)
    }

    /// Returns true if every numeric field is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.timestamp.is_finite()
            && self.position.iter().all(|v| v.is_finite())
            && self.orientation.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn pose_new() {
        let s = PoseSample::new(1.5, 12, 4, [1.0, 2.0, 3.0], [0.1, 0.2, 0.3]);
        assert_eq!(s.timestamp, 1.5);
        assert_eq!(s.frame, 12);
        assert_eq!(s.entity_id, 4);
        assert_eq!(s.position, [1.0, 2.0, 3.0]);
        assert_eq!(s.orientation, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn pose_is_finite() {
        let ok = PoseSample::new(0.0, 0, 0, [0.0; 3], [0.0; 3]);
        let bad = PoseSample::new(0.0, 0, 0, [f64::NAN, 0.0, 0.0], [0.0; 3]);
        assert!(ok.is_finite());
        assert!(!bad.is_finite());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn pose_serialization() {
        let s = PoseSample::new(0.039, 1, 0, [0.01, 0.0, 0.3], [0.0; 3]);
        let json = serde_json::to_string(&s).ok();
        assert!(json.is_some());

        let parsed: Result<PoseSample, _> = serde_json::from_str(&json.unwrap_or_default());
        assert_eq!(parsed.ok(), Some(s));
    }
}
