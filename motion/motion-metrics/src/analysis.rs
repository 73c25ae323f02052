//! End-to-end analysis of a sample store.
//!
//! Runs demultiplexing, differentiation, angular rates, smoothing and
//! aggregation for every selected entity. Entities are independent, so they
//! are processed on the rayon thread pool unless the configuration asks for
//! sequential execution. Results are keyed by entity id and never depend on
//! scheduling order.

use std::collections::BTreeMap;

use motion_types::{DerivedSample, EntityId, EntityTrack, PoseSample, TrackSummary};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregate::{OverallSummary, summarize};
use crate::angular::apply_angular;
use crate::config::{AnalysisConfig, MarkerSelection};
use crate::demux::SampleStore;
use crate::differentiate::{Differentiated, differentiate};
use crate::error::{Diagnostic, Result};
use crate::smooth::Smoother;

/// Derived samples and summary for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackAnalysis {
    /// Marker identifier.
    pub entity_id: EntityId,
    /// One derived sample per pose sample, in timestamp order.
    pub samples: Vec<DerivedSample>,
    /// Aggregate statistics.
    pub summary: TrackSummary,
    /// Warnings raised while processing this track.
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Configuration the run used.
    pub config: AnalysisConfig,
    /// Successfully analysed entities.
    pub tracks: BTreeMap<EntityId, TrackAnalysis>,
    /// Every warning and per-entity failure of the run, in entity order.
    pub diagnostics: Vec<Diagnostic>,
    /// Totals across entities.
    pub overall: OverallSummary,
}

impl Analysis {
    /// Returns the analysis of one entity.
    #[must_use]
    pub fn track(&self, entity_id: EntityId) -> Option<&TrackAnalysis> {
        self.tracks.get(&entity_id)
    }

    /// Diagnostics with error severity.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// Diagnostics with warning severity.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// Runs the metrics pipeline with a fixed configuration.
///
/// # Example
///
/// ```
/// use motion_metrics::{AnalysisConfig, MotionAnalyzer, SampleStore};
/// use motion_types::PoseSample;
///
/// let store: SampleStore = (0..10)
///     .map(|i| {
///         let t = f64::from(i) * 0.1;
///         PoseSample::new(t, i as u64, 0, [t, 0.0, 0.0], [0.0; 3])
///     })
///     .collect();
///
/// let analysis = MotionAnalyzer::new(AnalysisConfig::default()).analyze(&store);
/// let track = analysis.track(0).unwrap();
///
/// assert_eq!(track.samples.len(), 10);
/// assert!((track.summary.total_distance - 0.9).abs() < 1e-9);
/// assert!(analysis.diagnostics.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionAnalyzer {
    config: AnalysisConfig,
}

impl MotionAnalyzer {
    /// Creates an analyzer.
    #[must_use]
    pub const fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyses every selected entity in `store`.
    ///
    /// Per-entity failures are reported in [`Analysis::diagnostics`] and do
    /// not affect other entities.
    #[must_use]
    pub fn analyze(&self, store: &SampleStore) -> Analysis {
        let demuxed = store.demultiplex(self.config.duplicates);

        let requested: Vec<EntityId> = match self.config.marker {
            MarkerSelection::All => store.entity_ids(),
            MarkerSelection::Single(id) => vec![id],
        };

        // One smoother per worker so filters are reused across tracks.
        let smoother = || Smoother::new(self.config.smoothing);
        let run = |smoother: &mut Result<Smoother>, &entity_id: &EntityId| {
            let result = demuxed
                .request(entity_id)
                .and_then(|track| self.process(track, smoother));
            (entity_id, result)
        };
        let results: Vec<(EntityId, Result<TrackAnalysis>)> = if self.config.parallel {
            requested.par_iter().map_init(smoother, run).collect()
        } else {
            let mut smoother = smoother();
            requested.iter().map(|id| run(&mut smoother, id)).collect()
        };

        let mut diagnostics: Vec<Diagnostic> = demuxed
            .diagnostics
            .into_iter()
            .filter(|d| d.entity_id.is_none_or(|id| self.config.marker.includes(id)))
            .collect();

        let mut tracks = BTreeMap::new();
        for (entity_id, result) in results {
            match result {
                Ok(track) => {
                    diagnostics.extend(track.diagnostics.iter().cloned());
                    tracks.insert(entity_id, track);
                }
                Err(err) => {
                    warn!(entity_id, error = %err, "Track analysis failed");
                    diagnostics.push(Diagnostic::for_entity(entity_id, err));
                }
            }
        }
        diagnostics.sort_by_key(|d| d.entity_id);

        let failed = requested.len() - tracks.len();
        let overall = OverallSummary::from_summaries(tracks.values().map(|t| &t.summary), failed);

        info!(
            analyzed = overall.analyzed_tracks,
            failed = overall.failed_tracks,
            samples = overall.sample_count,
            warnings = diagnostics.iter().filter(|d| d.is_warning()).count(),
            "Motion analysis complete"
        );

        Analysis {
            config: self.config,
            tracks,
            diagnostics,
            overall,
        }
    }

    /// Analyses a single demultiplexed track.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InsufficientSamples`](crate::MetricsError::InsufficientSamples)
    /// for tracks shorter than two samples and
    /// [`MetricsError::InvalidSmoothingConfig`](crate::MetricsError::InvalidSmoothingConfig)
    /// for an invalid smoothing configuration.
    pub fn analyze_track(&self, track: &EntityTrack) -> Result<TrackAnalysis> {
        self.process(track, &mut Smoother::new(self.config.smoothing))
    }

    fn process(
        &self,
        track: &EntityTrack,
        smoother: &mut Result<Smoother>,
    ) -> Result<TrackAnalysis> {
        let entity_id = track.entity_id();
        debug!(
            entity_id,
            samples = track.len(),
            duration = track.duration(),
            "Analysing track"
        );

        let Differentiated {
            mut samples,
            diagnostics,
        } = differentiate(track)?;
        apply_angular(&mut samples);
        smoother
            .as_mut()
            .map_err(|err| err.clone())?
            .smooth_track(&mut samples)?;
        let summary = summarize(entity_id, &samples)?;

        Ok(TrackAnalysis {
            entity_id,
            samples,
            summary,
            diagnostics,
        })
    }
}

/// Analyses `samples` with `config` in one call.
#[must_use]
pub fn analyze(samples: Vec<PoseSample>, config: &AnalysisConfig) -> Analysis {
    MotionAnalyzer::new(*config).analyze(&SampleStore::new(samples))
}
