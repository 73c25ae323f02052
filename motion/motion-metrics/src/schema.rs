//! Input record schema.
//!
//! Maps named columns of an incoming record stream (for example a CSV header)
//! onto [`PoseSample`] fields. Resolution happens once, before any sample is
//! parsed, so a missing column fails the run without partial results.

use motion_types::{EntityId, PoseSample};

use crate::error::{MetricsError, Result};

/// Columns every input must provide.
pub const REQUIRED_COLUMNS: [&str; 8] = ["timestamp", "entity_id", "x", "y", "z", "rx", "ry", "rz"];

/// Accepted alternative name for the `entity_id` column.
pub const ENTITY_ALIAS: &str = "marker_id";

/// Optional passthrough column.
pub const FRAME_COLUMN: &str = "frame";

/// Column positions of a resolved input layout.
///
/// # Example
///
/// ```
/// use motion_metrics::RecordSchema;
///
/// let schema =
///     RecordSchema::resolve(&["timestamp", "frame", "marker_id", "x", "y", "z", "rx", "ry", "rz"])
///         .unwrap();
///
/// let sample = schema
///     .parse_record(&["0.039", "1", "0", "0.01", "0", "0.30", "0", "0", "0"], 0)
///     .unwrap();
/// assert_eq!(sample.frame, 1);
/// assert_eq!(sample.position, [0.01, 0.0, 0.30]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    timestamp: usize,
    frame: Option<usize>,
    entity_id: usize,
    position: [usize; 3],
    orientation: [usize; 3],
}

impl RecordSchema {
    /// Resolves column positions from header names.
    ///
    /// Names are matched after trimming whitespace. `marker_id` is accepted in
    /// place of `entity_id`; `frame` is optional and defaults to 0.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::MissingRequiredColumn`] naming every required
    /// column that is absent.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.as_ref().trim() == name);

        let mut missing = Vec::new();
        let mut require = |name: &'static str, found: Option<usize>| {
            if found.is_none() {
                missing.push(name);
            }
            found.unwrap_or_default()
        };

        let timestamp = require("timestamp", find("timestamp"));
        let entity_id = require("entity_id", find("entity_id").or_else(|| find(ENTITY_ALIAS)));
        let position = [
            require("x", find("x")),
            require("y", find("y")),
            require("z", find("z")),
        ];
        let orientation = [
            require("rx", find("rx")),
            require("ry", find("ry")),
            require("rz", find("rz")),
        ];

        if !missing.is_empty() {
            return Err(MetricsError::missing_columns(missing));
        }

        Ok(Self {
            timestamp,
            frame: find(FRAME_COLUMN),
            entity_id,
            position,
            orientation,
        })
    }

    /// Returns true if the input carries a `frame` column.
    #[must_use]
    pub const fn has_frame(&self) -> bool {
        self.frame.is_some()
    }

    /// Parses one record into a sample.
    ///
    /// `record` is the zero-based record index used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidValue`] if a field is missing, not a
    /// number, not finite, or (for ids, frames and timestamps) negative.
    pub fn parse_record<S: AsRef<str>>(&self, fields: &[S], record: usize) -> Result<PoseSample> {
        let field = |index: usize| fields.get(index).map_or("", |f| f.as_ref().trim());

        let timestamp = parse_float(field(self.timestamp), "timestamp", record)?;
        if timestamp < 0.0 {
            return Err(MetricsError::invalid_value(
                "timestamp",
                record,
                field(self.timestamp),
            ));
        }

        let frame = match self.frame {
            Some(index) => parse_count(field(index), FRAME_COLUMN, record)?,
            None => 0,
        };

        let entity_text = field(self.entity_id);
        let entity_id = EntityId::try_from(parse_count(entity_text, "entity_id", record)?)
            .map_err(|_| MetricsError::invalid_value("entity_id", record, entity_text))?;

        let axes = ["x", "y", "z"];
        let angles = ["rx", "ry", "rz"];
        let mut position = [0.0; 3];
        let mut orientation = [0.0; 3];
        for axis in 0..3 {
            position[axis] = parse_float(field(self.position[axis]), axes[axis], record)?;
            orientation[axis] = parse_float(field(self.orientation[axis]), angles[axis], record)?;
        }

        Ok(PoseSample::new(timestamp, frame, entity_id, position, orientation))
    }
}

fn parse_float(text: &str, column: &str, record: usize) -> Result<f64> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(MetricsError::invalid_value(column, record, text)),
    }
}

/// Parses a non-negative integer, also accepting integral floats such as `"3.0"`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count(text: &str, column: &str, record: usize) -> Result<u64> {
    if let Ok(v) = text.parse::<u64>() {
        return Ok(v);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        _ => Err(MetricsError::invalid_value(column, record, text)),
    }
}
