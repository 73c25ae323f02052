//! Error types for the motion-metrics engine.

use motion_types::{EntityId, TypesError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors and warnings raised while deriving motion metrics.
///
/// Input-schema problems ([`MissingRequiredColumn`](Self::MissingRequiredColumn),
/// [`InvalidValue`](Self::InvalidValue)) are fatal and surface before any
/// computation. Everything else is scoped to a single entity and is reported
/// through a [`Diagnostic`] without affecting other entities.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricsError {
    /// A requested entity has fewer than two samples.
    #[error("insufficient samples for entity {entity_id}: found {found}, need at least 2")]
    InsufficientSamples {
        /// Entity that was requested.
        entity_id: EntityId,
        /// Number of samples available.
        found: usize,
    },

    /// Two consecutive samples of an entity share a timestamp.
    #[error("degenerate time step for entity {entity_id} at index {index} (t = {timestamp})")]
    DegenerateTimeStep {
        /// Entity of the track.
        entity_id: EntityId,
        /// Index of the later sample within the track.
        index: usize,
        /// The shared timestamp.
        timestamp: f64,
    },

    /// A later-arriving sample repeated an existing timestamp and was dropped.
    #[error("duplicate timestamp for entity {entity_id} at t = {timestamp}; later sample dropped")]
    DuplicateTimestamp {
        /// Entity of the track.
        entity_id: EntityId,
        /// The repeated timestamp.
        timestamp: f64,
    },

    /// Smoothing window and polynomial order are incompatible.
    #[error("invalid smoothing configuration: {reason}")]
    InvalidSmoothingConfig {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// The least-squares system behind the smoothing filter is singular.
    #[error("degenerate polynomial fit: {reason}")]
    DegenerateFit {
        /// Solver message.
        reason: String,
    },

    /// The input records lack one or more required fields.
    #[error("missing required column: {}", .columns.join(", "))]
    MissingRequiredColumn {
        /// Names of the missing columns.
        columns: Vec<String>,
    },

    /// A field could not be parsed.
    #[error("invalid value in column '{column}' at record {record}: '{value}'")]
    InvalidValue {
        /// Column name.
        column: String,
        /// Zero-based record index.
        record: usize,
        /// The offending text.
        value: String,
    },

    /// A track could not be assembled.
    #[error("invalid track: {reason}")]
    InvalidTrack {
        /// Underlying container error.
        reason: String,
    },
}

impl MetricsError {
    /// Creates an insufficient samples error.
    #[must_use]
    pub const fn insufficient_samples(entity_id: EntityId, found: usize) -> Self {
        Self::InsufficientSamples { entity_id, found }
    }

    /// Creates a degenerate time step warning.
    #[must_use]
    pub const fn degenerate_time_step(entity_id: EntityId, index: usize, timestamp: f64) -> Self {
        Self::DegenerateTimeStep {
            entity_id,
            index,
            timestamp,
        }
    }

    /// Creates a duplicate timestamp warning.
    #[must_use]
    pub const fn duplicate_timestamp(entity_id: EntityId, timestamp: f64) -> Self {
        Self::DuplicateTimestamp {
            entity_id,
            timestamp,
        }
    }

    /// Creates an invalid smoothing configuration error.
    #[must_use]
    pub fn invalid_smoothing(reason: impl Into<String>) -> Self {
        Self::InvalidSmoothingConfig {
            reason: reason.into(),
        }
    }

    /// Creates a degenerate fit error.
    #[must_use]
    pub fn degenerate_fit(reason: impl Into<String>) -> Self {
        Self::DegenerateFit {
            reason: reason.into(),
        }
    }

    /// Creates a missing column error.
    #[must_use]
    pub fn missing_columns<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self::MissingRequiredColumn {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(column: impl Into<String>, record: usize, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.into(),
            record,
            value: value.into(),
        }
    }

    /// Severity of this issue when reported as a diagnostic.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::DegenerateTimeStep { .. } | Self::DuplicateTimestamp { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Entity this issue is scoped to, if any.
    #[must_use]
    pub const fn entity_id(&self) -> Option<EntityId> {
        match self {
            Self::InsufficientSamples { entity_id, .. }
            | Self::DegenerateTimeStep { entity_id, .. }
            | Self::DuplicateTimestamp { entity_id, .. } => Some(*entity_id),
            _ => None,
        }
    }
}

impl From<TypesError> for MetricsError {
    fn from(err: TypesError) -> Self {
        Self::InvalidTrack {
            reason: err.to_string(),
        }
    }
}

/// Result type for motion-metrics operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// How serious a reported issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Processing continued; some values may be not available.
    Warning,
    /// The affected entity produced no results.
    Error,
}

/// A per-entity issue reported alongside successfully analysed tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Warning or error.
    pub severity: Severity,
    /// Entity the issue belongs to.
    pub entity_id: Option<EntityId>,
    /// The issue itself.
    pub issue: MetricsError,
}

impl Diagnostic {
    /// Creates a diagnostic scoped to an entity.
    #[must_use]
    pub fn for_entity(entity_id: EntityId, issue: MetricsError) -> Self {
        Self {
            severity: issue.severity(),
            entity_id: Some(entity_id),
            issue,
        }
    }

    /// Returns true for warnings.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }

    /// Returns true for errors.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl From<MetricsError> for Diagnostic {
    fn from(issue: MetricsError) -> Self {
        Self {
            severity: issue.severity(),
            entity_id: issue.entity_id(),
            issue,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level}: {}", self.issue)
    }
}
