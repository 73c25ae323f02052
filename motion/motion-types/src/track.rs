//! Per-entity sample sequences.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{EntityId, PoseSample, TypesError};

/// Time-ordered samples of a single tracked marker.
///
/// All samples share `entity_id` and timestamps never decrease. Repeated
/// timestamps are allowed by the container; whether they survive
/// demultiplexing is a policy decision of the producer.
///
/// # Example
///
/// ```
/// use motion_types::{EntityTrack, PoseSample};
///
/// let track = EntityTrack::new(
///     2,
///     vec![
///         PoseSample::new(0.0, 0, 2, [0.0; 3], [0.0; 3]),
///         PoseSample::new(0.5, 1, 2, [1.0, 0.0, 0.0], [0.0; 3]),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(track.len(), 2);
/// assert_eq!(track.duration(), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityTrack {
    entity_id: EntityId,
    samples: Vec<PoseSample>,
}

impl EntityTrack {
    /// Creates a track from samples already sorted by timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if a sample belongs to another entity or if the
    /// timestamps decrease anywhere.
    pub fn new(entity_id: EntityId, samples: Vec<PoseSample>) -> Result<Self, TypesError> {
        for (index, sample) in samples.iter().enumerate() {
            if sample.entity_id != entity_id {
                return Err(TypesError::entity_mismatch(entity_id, sample.entity_id));
            }
            if index > 0 {
                let previous = samples[index - 1].timestamp;
                if sample.timestamp < previous {
                    return Err(TypesError::unordered(index, previous, sample.timestamp));
                }
            }
        }
        Ok(Self { entity_id, samples })
    }

    /// Marker identifier of this track.
    #[must_use]
    pub const fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// Samples in timestamp order.
    #[must_use]
    pub fn samples(&self) -> &[PoseSample] {
        &self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the track holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First sample, if any.
    #[must_use]
    pub fn first(&self) -> Option<&PoseSample> {
        self.samples.first()
    }

    /// Last sample, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PoseSample> {
        self.samples.last()
    }

    /// Time between the first and last sample.
    ///
    /// Returns `None` for an empty track.
    #[must_use]
    pub fn duration(&self) -> Option<f64> {
        Some(self.last()?.timestamp - self.first()?.timestamp)
    }
}
