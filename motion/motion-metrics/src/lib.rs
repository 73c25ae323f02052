//! Kinematic and angular motion metrics for multi-marker pose trajectories.
//!
//! Turns irregular, interleaved, noisy position/orientation samples into
//! per-marker velocity, acceleration, distance and angular-rate series plus
//! summary statistics.
//!
//! # Pipeline
//!
//! ```text
//! SampleStore -> demultiplex -> differentiate + angular -> smooth -> summarize -> export
//! ```
//!
//! - [`SampleStore`] / [`Demultiplexed`] - Ingestion and per-marker partitioning
//! - [`differentiate`] - Forward differences for distance, velocity, acceleration
//! - [`angular_velocity`] - Wrap-aware angular rates
//! - [`SavitzkyGolay`] / [`Smoother`] - Noise reduction of derived scalars
//! - [`summarize`] / [`OverallSummary`] - Aggregate statistics
//! - [`sample_table`] / [`summary_table`] - Flat tables for renderers
//! - [`MotionAnalyzer`] - Runs all of the above per marker
//!
//! The engine performs no I/O. Per-marker problems are reported as
//! [`Diagnostic`]s next to the successful results; only input-schema errors
//! fail a whole run.
//!
//! # Example
//!
//! ```
//! use motion_metrics::{AnalysisConfig, MotionAnalyzer, SampleStore, sample_table};
//!
//! let headers = ["timestamp", "frame", "marker_id", "x", "y", "z", "rx", "ry", "rz"];
//! let records = vec![
//!     vec!["0.000", "0", "0", "0.00", "0", "0.30", "0", "0", "0"],
//!     vec!["0.039", "1", "0", "0.01", "0", "0.30", "0", "0", "0"],
//!     vec!["0.078", "2", "0", "0.02", "0", "0.30", "0", "0", "0"],
//! ];
//!
//! let store = SampleStore::parse(&headers, &records).unwrap();
//! let config = AnalysisConfig::default();
//! let analysis = MotionAnalyzer::new(config).analyze(&store);
//!
//! let summary = &analysis.track(0).unwrap().summary;
//! assert!((summary.total_distance - 0.02).abs() < 1e-9);
//!
//! let table = sample_table(&analysis, config.angle_unit);
//! assert_eq!(table.records().next().unwrap()[12], "NA");
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod aggregate;
mod analysis;
mod angular;
mod config;
mod demux;
mod differentiate;
mod error;
mod export;
mod report;
mod schema;
mod smooth;

pub use aggregate::{OverallSummary, summarize};
pub use analysis::{Analysis, MotionAnalyzer, TrackAnalysis, analyze};
pub use angular::{angular_velocity, apply_angular, unwrap_angles};
pub use config::{AnalysisConfig, DuplicatePolicy, MarkerSelection, SmoothingConfig};
pub use demux::{Demultiplexed, SampleStore, load};
pub use differentiate::{Differentiated, differentiate};
pub use error::{Diagnostic, MetricsError, Result, Severity};
pub use export::{
    Cell, NOT_AVAILABLE, SAMPLE_COLUMNS, SUMMARY_COLUMNS, Table, sample_table, summary_table,
};
pub use schema::{ENTITY_ALIAS, FRAME_COLUMN, REQUIRED_COLUMNS, RecordSchema};
pub use smooth::{SavitzkyGolay, Smoother, smooth_track};
