//! Error types for motion data.

use thiserror::Error;

use crate::EntityId;

/// Errors raised when constructing motion data containers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypesError {
    /// A sample belongs to a different entity than its track.
    #[error("entity mismatch: track {expected} received a sample for entity {actual}")]
    EntityMismatch {
        /// Entity of the track.
        expected: EntityId,
        /// Entity of the offending sample.
        actual: EntityId,
    },

    /// Samples are not in non-decreasing timestamp order.
    #[error("unordered timestamps at index {index}: {previous} followed by {current}")]
    UnorderedTimestamps {
        /// Index of the offending sample.
        index: usize,
        /// Timestamp of the preceding sample.
        previous: f64,
        /// Timestamp of the offending sample.
        current: f64,
    },
}

impl TypesError {
    /// Creates an entity mismatch error.
    #[must_use]
    pub const fn entity_mismatch(expected: EntityId, actual: EntityId) -> Self {
        Self::EntityMismatch { expected, actual }
    }

    /// Creates an unordered timestamps error.
    #[must_use]
    pub const fn unordered(index: usize, previous: f64, current: f64) -> Self {
        Self::UnorderedTimestamps {
            index,
            previous,
            current,
        }
    }
}
