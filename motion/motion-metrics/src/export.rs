//! Flat tables for external renderers.
//!
//! Column names are stable so plotting and CSV tools can bind to them
//! directly. Not-available values render as [`NOT_AVAILABLE`], never as an
//! empty field or zero.

use std::fmt;

use motion_types::{AngleUnit, AxisRange, DerivedSample, Metric, ScalarStats, TrackSummary};

use crate::analysis::Analysis;

/// Sentinel written for not-available values.
pub const NOT_AVAILABLE: &str = "NA";

/// Per-sample columns, in output order.
pub const SAMPLE_COLUMNS: [&str; 29] = [
    "timestamp",
    "frame",
    "entity_id",
    "x",
    "y",
    "z",
    "rx",
    "ry",
    "rz",
    "vx",
    "vy",
    "vz",
    "speed",
    "speed_raw",
    "ax",
    "ay",
    "az",
    "acceleration",
    "acceleration_raw",
    "distance_step",
    "cumulative_distance",
    "rx_deg",
    "ry_deg",
    "rz_deg",
    "omega_x",
    "omega_y",
    "omega_z",
    "angular_speed",
    "angular_speed_raw",
];

/// Per-entity summary columns, in output order.
pub const SUMMARY_COLUMNS: [&str; 33] = [
    "entity_id",
    "sample_count",
    "start_time",
    "end_time",
    "duration",
    "sample_rate",
    "x_min",
    "x_max",
    "x_range",
    "y_min",
    "y_max",
    "y_range",
    "z_min",
    "z_max",
    "z_range",
    "rx_deg_min",
    "rx_deg_max",
    "ry_deg_min",
    "ry_deg_max",
    "rz_deg_min",
    "rz_deg_max",
    "speed_mean",
    "speed_min",
    "speed_max",
    "speed_std",
    "acceleration_mean",
    "acceleration_min",
    "acceleration_max",
    "angular_speed_mean",
    "angular_speed_min",
    "angular_speed_max",
    "mean_step_distance",
    "total_distance",
];

/// One table value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// A real number.
    Float(f64),
    /// An integer (ids, frame numbers, counts).
    Int(u64),
    /// Undefined at this position.
    NotAvailable,
}

impl Cell {
    /// Text form used in CSV output.
    ///
    /// ```
    /// use motion_metrics::Cell;
    ///
    /// assert_eq!(Cell::Float(0.25).render(), "0.25");
    /// assert_eq!(Cell::Int(7).render(), "7");
    /// assert_eq!(Cell::NotAvailable.render(), "NA");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Numeric value, if any.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(v),
            Self::Int(v) => Some(v as f64),
            Self::NotAvailable => None,
        }
    }

    /// Returns true for the not-available sentinel.
    #[must_use]
    pub const fn is_not_available(&self) -> bool {
        matches!(self, Self::NotAvailable)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Metric<f64>> for Cell {
    fn from(m: Metric<f64>) -> Self {
        match m {
            Metric::Available(v) => Self::Float(v),
            Metric::NotAvailable => Self::NotAvailable,
        }
    }
}

/// A named-column table of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: &'static [&'static str],
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Column names.
    #[must_use]
    pub const fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    /// Rows, each with one cell per column.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == name)
    }

    /// All values of one column, top to bottom.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<Cell>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Rows rendered as text, ready for a CSV writer.
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows
            .iter()
            .map(|row| row.iter().map(Cell::render).collect())
    }
}

fn vector(v: Metric<[f64; 3]>, unit: impl Fn(f64) -> f64) -> [Cell; 3] {
    match v {
        Metric::Available(v) => v.map(|c| Cell::Float(unit(c))),
        Metric::NotAvailable => [Cell::NotAvailable; 3],
    }
}

fn sample_row(s: &DerivedSample, unit: AngleUnit) -> Vec<Cell> {
    let rate = |m: Metric<f64>| Cell::from(m.map(|v| unit.from_radians(v)));
    let p = s.pose;
    let [vx, vy, vz] = vector(s.velocity, |c| c);
    let [ax, ay, az] = vector(s.acceleration, |c| c);
    let [wx, wy, wz] = vector(s.angular_velocity, |c| unit.from_radians(c));

    vec![
        Cell::Float(p.timestamp),
        Cell::Int(p.frame),
        Cell::Int(u64::from(p.entity_id)),
        Cell::Float(p.position[0]),
        Cell::Float(p.position[1]),
        Cell::Float(p.position[2]),
        Cell::Float(p.orientation[0]),
        Cell::Float(p.orientation[1]),
        Cell::Float(p.orientation[2]),
        vx,
        vy,
        vz,
        s.speed.into(),
        s.speed_raw.into(),
        ax,
        ay,
        az,
        s.acceleration_magnitude.into(),
        s.acceleration_raw.into(),
        s.distance_step.into(),
        Cell::Float(s.cumulative_distance),
        Cell::Float(s.orientation_deg[0]),
        Cell::Float(s.orientation_deg[1]),
        Cell::Float(s.orientation_deg[2]),
        wx,
        wy,
        wz,
        rate(s.angular_speed),
        rate(s.angular_speed_raw),
    ]
}

fn summary_row(s: &TrackSummary, unit: AngleUnit) -> Vec<Cell> {
    let range = |r: AxisRange| [Cell::Float(r.min), Cell::Float(r.max), Cell::Float(r.range())];
    let stat = |m: Metric<ScalarStats>, f: fn(&ScalarStats) -> f64| Cell::from(m.map(|s| f(&s)));
    let angular = s.angular_speed.map(|a| a.scaled(unit.from_radians(1.0)));

    let mut row = vec![
        Cell::Int(u64::from(s.entity_id)),
        Cell::Int(s.sample_count as u64),
        Cell::Float(s.time_range.min),
        Cell::Float(s.time_range.max),
        Cell::Float(s.duration),
        s.sample_rate.into(),
    ];
    for axis in s.position {
        row.extend(range(axis));
    }
    for axis in s.orientation_deg {
        row.extend([Cell::Float(axis.min), Cell::Float(axis.max)]);
    }
    row.extend([
        stat(s.speed, |v| v.mean),
        stat(s.speed, |v| v.min),
        stat(s.speed, |v| v.max),
        s.speed.and_then(|v| v.std_dev).into(),
        stat(s.acceleration, |v| v.mean),
        stat(s.acceleration, |v| v.min),
        stat(s.acceleration, |v| v.max),
        stat(angular, |v| v.mean),
        stat(angular, |v| v.min),
        stat(angular, |v| v.max),
        s.mean_step_distance.into(),
        Cell::Float(s.total_distance),
    ]);
    row
}

/// One row per derived sample across all analysed entities.
///
/// Rows are grouped by entity id (ascending) and ordered by timestamp within
/// each entity. Angular rate columns use `unit` per second.
#[must_use]
pub fn sample_table(analysis: &Analysis, unit: AngleUnit) -> Table {
    let rows = analysis
        .tracks
        .values()
        .flat_map(|track| track.samples.iter().map(|s| sample_row(s, unit)))
        .collect();
    Table {
        columns: &SAMPLE_COLUMNS,
        rows,
    }
}

/// One row per analysed entity.
#[must_use]
pub fn summary_table(analysis: &Analysis, unit: AngleUnit) -> Table {
    let rows = analysis
        .tracks
        .values()
        .map(|track| summary_row(&track.summary, unit))
        .collect();
    Table {
        columns: &SUMMARY_COLUMNS,
        rows,
    }
}
