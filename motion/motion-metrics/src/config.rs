//! Analysis configuration.

use motion_types::{AngleUnit, EntityId};
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

/// Which entities an analysis run covers.
///
/// Serialized as the string `"all"` or an integer marker id.
///
/// # Example
///
/// ```
/// use motion_metrics::MarkerSelection;
///
/// assert_eq!("all".parse::<MarkerSelection>(), Ok(MarkerSelection::All));
/// assert_eq!("7".parse::<MarkerSelection>(), Ok(MarkerSelection::Single(7)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "MarkerRepr", into = "MarkerRepr")]
pub enum MarkerSelection {
    /// Every entity present in the input.
    #[default]
    All,
    /// A single entity.
    Single(EntityId),
}

impl MarkerSelection {
    /// Returns true if `entity_id` is covered by this selection.
    #[must_use]
    pub const fn includes(&self, entity_id: EntityId) -> bool {
        match self {
            Self::All => true,
            Self::Single(id) => *id == entity_id,
        }
    }
}

impl std::str::FromStr for MarkerSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<EntityId>()
            .map(Self::Single)
            .map_err(|_| format!("expected \"all\" or a marker id, got '{s}'"))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MarkerRepr {
    Id(EntityId),
    Name(String),
}

impl TryFrom<MarkerRepr> for MarkerSelection {
    type Error = String;

    fn try_from(repr: MarkerRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            MarkerRepr::Id(id) => Ok(Self::Single(id)),
            MarkerRepr::Name(name) => name.parse(),
        }
    }
}

impl From<MarkerSelection> for MarkerRepr {
    fn from(selection: MarkerSelection) -> Self {
        match selection {
            MarkerSelection::All => Self::Name("all".to_string()),
            MarkerSelection::Single(id) => Self::Id(id),
        }
    }
}

/// What to do with repeated timestamps within one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the first-arriving sample, drop later ones and report a warning.
    #[default]
    DropLater,
    /// Keep every sample; derivatives across the zero-length step are not available.
    Keep,
}

/// Savitzky–Golay smoothing parameters.
///
/// # Example
///
/// ```
/// use motion_metrics::SmoothingConfig;
///
/// let config = SmoothingConfig::default();
/// assert_eq!(config.window, 5);
/// assert_eq!(config.polyorder, 2);
/// assert!(config.validate().is_ok());
///
/// assert!(SmoothingConfig::new(4, 2).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmoothingConfig {
    /// Apply the filter. When false, smoothed fields equal the raw values.
    pub enabled: bool,

    /// Window length in samples. Must be odd, ≥ 3 and ≥ `polyorder + 2`.
    pub window: usize,

    /// Order of the local polynomial fit.
    pub polyorder: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window: 5,
            polyorder: 2,
        }
    }
}

impl SmoothingConfig {
    /// Creates an enabled configuration with the given window and order.
    #[must_use]
    pub const fn new(window: usize, polyorder: usize) -> Self {
        Self {
            enabled: true,
            window,
            polyorder,
        }
    }

    /// Creates a configuration that leaves signals unsmoothed.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            window: 5,
            polyorder: 2,
        }
    }

    /// Checks the window/order constraints.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidSmoothingConfig`] if the window is even,
    /// smaller than 3, or smaller than `polyorder + 2`.
    pub fn validate(&self) -> Result<()> {
        validate_window(self.window, self.polyorder)
    }
}

pub(crate) fn validate_window(window: usize, polyorder: usize) -> Result<()> {
    if window % 2 == 0 {
        return Err(MetricsError::invalid_smoothing(format!(
            "window must be odd, got {window}"
        )));
    }
    if window < 3 {
        return Err(MetricsError::invalid_smoothing(format!(
            "window must be at least 3, got {window}"
        )));
    }
    if window < polyorder + 2 {
        return Err(MetricsError::invalid_smoothing(format!(
            "window {window} is too short for polynomial order {polyorder} (need at least {})",
            polyorder + 2
        )));
    }
    Ok(())
}

/// Configuration for an analysis run.
///
/// Every field has a default, so a partial JSON document is enough. The flat
/// keys `marker_id`, `smoothing_window` and `smoothing_polyorder` are read as
/// well and take precedence over the nested `smoothing` table. Unknown keys
/// are rejected.
///
/// ```
/// use motion_metrics::{AnalysisConfig, MarkerSelection};
///
/// let config: AnalysisConfig =
///     serde_json::from_str(r#"{ "marker": 3, "smoothing": { "window": 7 } }"#).unwrap();
/// assert_eq!(config.marker, MarkerSelection::Single(3));
/// assert_eq!(config.smoothing.window, 7);
/// assert_eq!(config.smoothing.polyorder, 2);
///
/// let flat: AnalysisConfig =
///     serde_json::from_str(r#"{ "marker_id": "all", "smoothing_window": 9 }"#).unwrap();
/// assert_eq!(flat.marker, MarkerSelection::All);
/// assert_eq!(flat.smoothing.window, 9);
///
/// assert!(serde_json::from_str::<AnalysisConfig>(r#"{ "smoothing_windw": 9 }"#).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigRepr")]
pub struct AnalysisConfig {
    /// Entities to analyse.
    pub marker: MarkerSelection,

    /// Smoothing applied to speed, acceleration and angular speed.
    pub smoothing: SmoothingConfig,

    /// Unit of exported angular rates.
    pub angle_unit: AngleUnit,

    /// Handling of repeated timestamps.
    pub duplicates: DuplicatePolicy,

    /// Process entities on the rayon thread pool.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            marker: MarkerSelection::All,
            smoothing: SmoothingConfig::default(),
            angle_unit: AngleUnit::Radians,
            duplicates: DuplicatePolicy::DropLater,
            parallel: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigRepr {
    #[serde(alias = "marker_id")]
    marker: MarkerSelection,
    smoothing: SmoothingConfig,
    smoothing_window: Option<usize>,
    smoothing_polyorder: Option<usize>,
    angle_unit: AngleUnit,
    duplicates: DuplicatePolicy,
    parallel: bool,
}

impl Default for ConfigRepr {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        Self {
            marker: config.marker,
            smoothing: config.smoothing,
            smoothing_window: None,
            smoothing_polyorder: None,
            angle_unit: config.angle_unit,
            duplicates: config.duplicates,
            parallel: config.parallel,
        }
    }
}

impl From<ConfigRepr> for AnalysisConfig {
    fn from(repr: ConfigRepr) -> Self {
        let mut smoothing = repr.smoothing;
        if let Some(window) = repr.smoothing_window {
            smoothing.window = window;
        }
        if let Some(polyorder) = repr.smoothing_polyorder {
            smoothing.polyorder = polyorder;
        }
        Self {
            marker: repr.marker,
            smoothing,
            angle_unit: repr.angle_unit,
            duplicates: repr.duplicates,
            parallel: repr.parallel,
        }
    }
}

impl AnalysisConfig {
    /// Restricts the run to one marker.
    #[must_use]
    pub const fn with_marker(mut self, entity_id: EntityId) -> Self {
        self.marker = MarkerSelection::Single(entity_id);
        self
    }

    /// Sets the smoothing window and polynomial order.
    #[must_use]
    pub const fn with_smoothing(mut self, window: usize, polyorder: usize) -> Self {
        self.smoothing = SmoothingConfig::new(window, polyorder);
        self
    }

    /// Disables smoothing.
    #[must_use]
    pub const fn without_smoothing(mut self) -> Self {
        self.smoothing.enabled = false;
        self
    }

    /// Sets the unit of exported angular rates.
    #[must_use]
    pub const fn with_angle_unit(mut self, unit: AngleUnit) -> Self {
        self.angle_unit = unit;
        self
    }

    /// Sets the duplicate timestamp policy.
    #[must_use]
    pub const fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Processes entities one after another on the calling thread.
    #[must_use]
    pub const fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidSmoothingConfig`] if smoothing is
    /// enabled with an invalid window/order pair.
    pub fn validate(&self) -> Result<()> {
        if self.smoothing.enabled {
            self.smoothing.validate()
        } else {
            Ok(())
        }
    }
}
