//! Sample ingestion and per-entity demultiplexing.
//!
//! Input samples may arrive interleaved across markers and out of time order.
//! [`SampleStore`] holds them as received; [`SampleStore::demultiplex`]
//! partitions them into one [`EntityTrack`] per marker, sorted by timestamp.

use std::collections::BTreeMap;

use motion_types::{EntityId, EntityTrack, PoseSample};
use tracing::{debug, warn};

use crate::config::DuplicatePolicy;
use crate::error::{Diagnostic, MetricsError, Result};
use crate::schema::RecordSchema;

/// A flat collection of pose samples from any number of markers.
///
/// # Example
///
/// ```
/// use motion_metrics::{DuplicatePolicy, SampleStore};
/// use motion_types::PoseSample;
///
/// let store = SampleStore::new(vec![
///     PoseSample::new(0.1, 1, 2, [0.0; 3], [0.0; 3]),
///     PoseSample::new(0.0, 0, 1, [0.0; 3], [0.0; 3]),
///     PoseSample::new(0.0, 0, 2, [0.0; 3], [0.0; 3]),
/// ]);
/// assert_eq!(store.entity_ids(), vec![1, 2]);
///
/// let demuxed = store.demultiplex(DuplicatePolicy::DropLater);
/// assert_eq!(demuxed.tracks[&2].len(), 2);
/// assert_eq!(demuxed.tracks[&2].samples()[0].timestamp, 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStore {
    samples: Vec<PoseSample>,
}

impl SampleStore {
    /// Wraps samples in arrival order.
    #[must_use]
    pub const fn new(samples: Vec<PoseSample>) -> Self {
        Self { samples }
    }

    /// Parses header-named string records into a store.
    ///
    /// # Errors
    ///
    /// Fails on the first missing column or unparseable value; no partial
    /// store is returned.
    pub fn parse<H, R, S>(headers: &[H], records: R) -> Result<Self>
    where
        H: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<[S]>,
        S: AsRef<str>,
    {
        let schema = RecordSchema::resolve(headers)?;
        let samples = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| schema.parse_record(record.as_ref(), index))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(samples))
    }

    /// Samples in arrival order.
    #[must_use]
    pub fn samples(&self) -> &[PoseSample] {
        &self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distinct entity ids, ascending.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.samples.iter().map(|s| s.entity_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Partitions samples into per-entity tracks sorted by timestamp.
    ///
    /// Samples with equal timestamps keep their arrival order. Under
    /// [`DuplicatePolicy::DropLater`] only the first of them survives and a
    /// [`MetricsError::DuplicateTimestamp`] warning is recorded.
    #[must_use]
    pub fn demultiplex(&self, policy: DuplicatePolicy) -> Demultiplexed {
        let mut grouped: BTreeMap<EntityId, Vec<PoseSample>> = BTreeMap::new();
        for sample in &self.samples {
            grouped.entry(sample.entity_id).or_default().push(*sample);
        }

        let mut tracks = BTreeMap::new();
        let mut diagnostics = Vec::new();

        for (entity_id, mut samples) in grouped {
            // Stable, so equal timestamps stay in arrival order.
            samples.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

            if policy == DuplicatePolicy::DropLater {
                let before = samples.len();
                let mut kept: Vec<PoseSample> = Vec::with_capacity(before);
                for sample in samples {
                    if kept.last().is_some_and(|prev| prev.timestamp == sample.timestamp) {
                        warn!(
                            entity_id,
                            timestamp = sample.timestamp,
                            "Dropping sample with duplicate timestamp"
                        );
                        diagnostics.push(Diagnostic::for_entity(
                            entity_id,
                            MetricsError::duplicate_timestamp(entity_id, sample.timestamp),
                        ));
                    } else {
                        kept.push(sample);
                    }
                }
                samples = kept;
            }

            debug!(entity_id, samples = samples.len(), "Demultiplexed track");

            match EntityTrack::new(entity_id, samples) {
                Ok(track) => {
                    tracks.insert(entity_id, track);
                }
                Err(err) => {
                    diagnostics.push(Diagnostic::for_entity(entity_id, err.into()));
                }
            }
        }

        Demultiplexed {
            tracks,
            diagnostics,
        }
    }
}

impl From<Vec<PoseSample>> for SampleStore {
    fn from(samples: Vec<PoseSample>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<PoseSample> for SampleStore {
    fn from_iter<I: IntoIterator<Item = PoseSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Per-entity tracks produced by [`SampleStore::demultiplex`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Demultiplexed {
    /// Tracks keyed by entity id.
    pub tracks: BTreeMap<EntityId, EntityTrack>,
    /// Warnings raised while partitioning.
    pub diagnostics: Vec<Diagnostic>,
}

impl Demultiplexed {
    /// Returns the track for `entity_id` if it can be analysed.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InsufficientSamples`] if the entity is absent
    /// or has fewer than two samples.
    pub fn request(&self, entity_id: EntityId) -> Result<&EntityTrack> {
        match self.tracks.get(&entity_id) {
            Some(track) if track.len() >= 2 => Ok(track),
            Some(track) => Err(MetricsError::insufficient_samples(entity_id, track.len())),
            None => Err(MetricsError::insufficient_samples(entity_id, 0)),
        }
    }

    /// Entity ids with a track, ascending.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.tracks.keys().copied()
    }
}

/// Demultiplexes `samples` in one call.
#[must_use]
pub fn load(samples: Vec<PoseSample>, policy: DuplicatePolicy) -> Demultiplexed {
    SampleStore::new(samples).demultiplex(policy)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn sample(t: f64, id: EntityId, x: f64) -> PoseSample {
        PoseSample::new(t, 0, id, [x, 0.0, 0.0], [0.0; 3])
    }

    #[test]
    fn demultiplex_sorts_by_time() {
        let demuxed = load(
            vec![sample(0.2, 0, 2.0), sample(0.0, 0, 0.0), sample(0.1, 0, 1.0)],
            DuplicatePolicy::DropLater,
        );
        let times: Vec<f64> = demuxed.tracks[&0].samples().iter().map(|s| s.timestamp).collect();
        assert_eq!(times, vec![0.0, 0.1, 0.2]);
        assert!(demuxed.diagnostics.is_empty());
    }

    #[test]
    fn demultiplex_separates_entities() {
        let demuxed = load(
            vec![
                sample(0.0, 3, 0.0),
                sample(0.0, 1, 0.0),
                sample(0.1, 3, 1.0),
                sample(0.1, 1, 1.0),
                sample(0.2, 1, 2.0),
            ],
            DuplicatePolicy::DropLater,
        );
        assert_eq!(demuxed.entity_ids().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(demuxed.tracks[&1].len(), 3);
        assert_eq!(demuxed.tracks[&3].len(), 2);
        assert!(demuxed.tracks[&3].samples().iter().all(|s| s.entity_id == 3));
    }

    #[test]
    fn duplicate_timestamp_drops_later_sample() {
        let demuxed = load(
            vec![sample(0.0, 0, 0.0), sample(0.1, 0, 1.0), sample(0.1, 0, 9.0)],
            DuplicatePolicy::DropLater,
        );
        let track = &demuxed.tracks[&0];
        assert_eq!(track.len(), 2);
        assert_eq!(track.samples()[1].position[0], 1.0);

        assert_eq!(demuxed.diagnostics.len(), 1);
        assert!(demuxed.diagnostics[0].is_warning());
        assert_eq!(
            demuxed.diagnostics[0].issue,
            MetricsError::duplicate_timestamp(0, 0.1)
        );
    }

    #[test]
    fn duplicate_timestamp_kept_on_request() {
        let demuxed = load(
            vec![sample(0.0, 0, 0.0), sample(0.1, 0, 1.0), sample(0.1, 0, 9.0)],
            DuplicatePolicy::Keep,
        );
        let track = &demuxed.tracks[&0];
        assert_eq!(track.len(), 3);
        // Arrival order is preserved among equal timestamps.
        assert_eq!(track.samples()[1].position[0], 1.0);
        assert_eq!(track.samples()[2].position[0], 9.0);
        assert!(demuxed.diagnostics.is_empty());
    }

    #[test]
    fn request_requires_two_samples() {
        let demuxed = load(
            vec![sample(0.0, 0, 0.0), sample(0.0, 1, 0.0), sample(0.1, 1, 0.0)],
            DuplicatePolicy::DropLater,
        );
        assert_eq!(
            demuxed.request(0).unwrap_err(),
            MetricsError::insufficient_samples(0, 1)
        );
        assert_eq!(
            demuxed.request(7).unwrap_err(),
            MetricsError::insufficient_samples(7, 0)
        );
        assert_eq!(demuxed.request(1).unwrap().len(), 2);
    }

    #[test]
    fn parse_records() {
        let headers = ["timestamp", "marker_id", "x", "y", "z", "rx", "ry", "rz"];
        let records = vec![
            vec!["0.0", "0", "0", "0", "0", "0", "0", "0"],
            vec!["0.1", "0", "1", "0", "0", "0", "0", "0"],
        ];
        let store = SampleStore::parse(&headers, &records).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.samples()[1].position[0], 1.0);
    }

    #[test]
    fn parse_fails_fast() {
        let headers = ["timestamp", "marker_id", "x", "y", "z", "rx", "ry", "rz"];
        let records = vec![
            vec!["0.0", "0", "0", "0", "0", "0", "0", "0"],
            vec!["0.1", "0", "oops", "0", "0", "0", "0", "0"],
        ];
        let err = SampleStore::parse(&headers, &records).unwrap_err();
        assert_eq!(err, MetricsError::invalid_value("x", 1, "oops"));

        let err = SampleStore::parse(&headers[..7], &records).unwrap_err();
        assert!(matches!(err, MetricsError::MissingRequiredColumn { .. }));
    }

    #[test]
    fn empty_store() {
        let store = SampleStore::default();
        assert!(store.is_empty());
        assert!(store.entity_ids().is_empty());
        assert!(store.demultiplex(DuplicatePolicy::DropLater).tracks.is_empty());
    }
}
