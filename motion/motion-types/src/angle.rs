//! Angle conventions.

use std::f64::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit used when reporting angular rates.
///
/// Computation is always carried out in radians; this only affects the
/// exported/reported values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AngleUnit {
    /// Radians (rad, rad/s).
    #[default]
    Radians,
    /// Degrees (°, °/s).
    Degrees,
}

impl AngleUnit {
    /// Converts a value in radians into this unit.
    #[must_use]
    pub fn from_radians(self, rad: f64) -> f64 {
        match self {
            Self::Radians => rad,
            Self::Degrees => to_degrees(rad),
        }
    }

    /// Short label for an angular rate in this unit.
    #[must_use]
    pub const fn rate_label(self) -> &'static str {
        match self {
            Self::Radians => "rad/s",
            Self::Degrees => "deg/s",
        }
    }

    /// Lowercase name (`"radians"` or `"degrees"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Radians => "radians",
            Self::Degrees => "degrees",
        }
    }
}

impl std::str::FromStr for AngleUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "radians" | "rad" => Ok(Self::Radians),
            "degrees" | "deg" => Ok(Self::Degrees),
            other => Err(format!("unknown angle unit '{other}'")),
        }
    }
}

/// Converts radians to degrees.
#[must_use]
pub fn to_degrees(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Maps an angular difference into `(-π, π]`.
///
/// An exact `±π` difference maps to `+π`.
///
/// # Example
///
/// ```
/// use motion_types::wrap_to_pi;
///
/// // +177.6° to -177.6° is a 4.8° rotation, not 355°.
/// let d = wrap_to_pi(-3.10 - 3.10);
/// assert!((d - 0.0832).abs() < 1e-3);
/// assert_eq!(wrap_to_pi(-std::f64::consts::PI), std::f64::consts::PI);
/// ```
#[must_use]
pub fn wrap_to_pi(delta: f64) -> f64 {
    PI - (PI - delta).rem_euclid(TAU)
}

/// Maps an angle in degrees into `[-180, 180)`.
///
/// # Example
///
/// ```
/// use motion_types::wrap_degrees;
///
/// assert_eq!(wrap_degrees(190.0), -170.0);
/// assert_eq!(wrap_degrees(180.0), -180.0);
/// assert_eq!(wrap_degrees(-45.0), -45.0);
/// ```
#[must_use]
pub fn wrap_degrees(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}
