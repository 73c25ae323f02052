//! Pose and motion-metric types for tracked rigid markers.
//!
//! This crate provides the data model shared by the motion-metrics engine
//! and anything that feeds it or consumes its output:
//!
//! - [`PoseSample`] - One timestamped position + orientation observation
//! - [`EntityTrack`] - Time-ordered samples of a single marker
//! - [`DerivedSample`] - A pose sample extended with kinematic and angular metrics
//! - [`TrackSummary`] - Per-marker aggregate statistics
//! - [`Metric`] - A derived value that may be "not available"
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **no I/O and no numeric dependencies**. It can
//! be used by:
//! - Live pose producers (marker detectors, motion-capture drivers)
//! - Offline analysis tools
//! - Renderers and exporters that bind to derived columns
//!
//! # Not Available Values
//!
//! Derivatives are undefined at the start of a track and across zero-length
//! time steps. Those positions hold [`Metric::NotAvailable`] instead of a
//! numeric sentinel, so a missing value can never be mistaken for zero.
//!
//! # Example
//!
//! ```
//! use motion_types::{Metric, PoseSample};
//!
//! let sample = PoseSample::new(0.04, 1, 7, [0.01, 0.0, 0.30], [0.0, 0.0, 0.1]);
//! assert_eq!(sample.entity_id, 7);
//!
//! let speed: Metric<f64> = Metric::Available(0.25);
//! assert_eq!(speed.value(), Some(0.25));
//! assert!(Metric::<f64>::NotAvailable.value().is_none());
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod angle;
mod derived;
mod error;
mod metric;
mod pose;
mod summary;
mod track;
pub mod vec3;

pub use angle::{AngleUnit, to_degrees, wrap_degrees, wrap_to_pi};
pub use derived::DerivedSample;
pub use error::TypesError;
pub use metric::Metric;
pub use pose::{EntityId, PoseSample};
pub use summary::{AxisRange, ScalarStats, TrackSummary};
pub use track::EntityTrack;
