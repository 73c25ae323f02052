//! Trajectory motion-metrics command-line tool.
//!
//! Reads a trajectory CSV (`timestamp, frame, marker_id, x, y, z, rx, ry, rz`),
//! derives per-marker kinematics and prints a summary. Optional outputs:
//!
//! - `--export <FILE>` - per-sample metrics table (CSV)
//! - `--summary-export <FILE>` - per-marker summary table (CSV)
//! - `--json <FILE>` - the complete analysis (JSON)
//! - `--output-dir <DIR>` - all three, with default file names
//!
//! Not-available values are written as `NA`.

mod io;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use motion_metrics::{
    AnalysisConfig, DuplicatePolicy, MarkerSelection, MotionAnalyzer, sample_table, summary_table,
};
use motion_types::AngleUnit;
use tracing::{info, warn};

/// Derive velocity, acceleration, distance and angular rates from marker trajectories.
#[derive(Parser, Debug)]
#[command(name = "motion-metrics", version, about, long_about = None)]
struct Args {
    /// Trajectory CSV file
    #[arg(value_name = "CSV_PATH")]
    csv_path: PathBuf,

    /// JSON analysis configuration; command-line flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Marker to analyse ("all" or an id)
    #[arg(long)]
    marker_id: Option<MarkerSelection>,

    /// Smoothing window length (odd, >= 3)
    #[arg(long)]
    window: Option<usize>,

    /// Smoothing polynomial order
    #[arg(long)]
    polyorder: Option<usize>,

    /// Disable smoothing; smoothed columns equal the raw ones
    #[arg(long)]
    no_smooth: bool,

    /// Unit for angular rates in reports and exports (radians or degrees)
    #[arg(long)]
    angle_unit: Option<AngleUnit>,

    /// Keep samples with repeated timestamps instead of dropping later ones
    #[arg(long)]
    keep_duplicates: bool,

    /// Process markers on a single thread
    #[arg(long)]
    sequential: bool,

    /// Print the text summary even when writing files
    #[arg(long)]
    summary: bool,

    /// Write the per-sample metrics table to this CSV file
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Write the per-marker summary table to this CSV file
    #[arg(long, value_name = "FILE")]
    summary_export: Option<PathBuf>,

    /// Write the full analysis to this JSON file
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Directory for analysis_metrics.csv, track_summary.csv and analysis.json
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Builds the analysis configuration: defaults, then the config file, then flags.
    fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                io::load_config(path)?
            }
            None => AnalysisConfig::default(),
        };

        if let Some(marker) = self.marker_id {
            config.marker = marker;
        }
        if let Some(window) = self.window {
            config.smoothing.window = window;
        }
        if let Some(polyorder) = self.polyorder {
            config.smoothing.polyorder = polyorder;
        }
        if self.no_smooth {
            config.smoothing.enabled = false;
        }
        if let Some(unit) = self.angle_unit {
            config.angle_unit = unit;
        }
        if self.keep_duplicates {
            config.duplicates = DuplicatePolicy::Keep;
        }
        if self.sequential {
            config.parallel = false;
        }

        config.validate().context("Invalid analysis configuration")?;
        Ok(config)
    }

    /// Resolved output paths: explicit flags win over `--output-dir` defaults.
    fn outputs(&self) -> Outputs {
        let in_dir = |name: &str| self.output_dir.as_deref().map(|dir| dir.join(name));
        Outputs {
            metrics: self.export.clone().or_else(|| in_dir("analysis_metrics.csv")),
            summary: self
                .summary_export
                .clone()
                .or_else(|| in_dir("track_summary.csv")),
            json: self.json.clone().or_else(|| in_dir("analysis.json")),
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct Outputs {
    metrics: Option<PathBuf>,
    summary: Option<PathBuf>,
    json: Option<PathBuf>,
}

impl Outputs {
    fn is_empty(&self) -> bool {
        self.metrics.is_none() && self.summary.is_none() && self.json.is_none()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level_filter = args
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(log_level_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let config = args.analysis_config()?;
    let store = io::read_samples(&args.csv_path)?;

    let analysis = MotionAnalyzer::new(config).analyze(&store);
    if analysis.tracks.is_empty() {
        warn!("No marker could be analysed");
    }

    let outputs = args.outputs();
    if args.summary || outputs.is_empty() {
        print!("{}", analysis.to_report(config.angle_unit));
    }

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    if let Some(path) = &outputs.metrics {
        io::write_table(path, &sample_table(&analysis, config.angle_unit))?;
    }
    if let Some(path) = &outputs.summary {
        io::write_table(path, &summary_table(&analysis, config.angle_unit))?;
    }
    if let Some(path) = &outputs.json {
        io::write_json(path, &analysis)?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use motion_metrics::SmoothingConfig;

    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("motion-metrics").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&["track.csv"]);
        assert_eq!(args.csv_path, PathBuf::from("track.csv"));
        assert_eq!(args.analysis_config().unwrap(), AnalysisConfig::default());
        assert!(args.outputs().is_empty());
    }

    #[test]
    fn flags_override_config() {
        let args = parse(&[
            "track.csv",
            "--marker-id",
            "3",
            "--window",
            "7",
            "--polyorder",
            "3",
            "--angle-unit",
            "degrees",
            "--keep-duplicates",
            "--sequential",
        ]);
        let config = args.analysis_config().unwrap();
        assert_eq!(config.marker, MarkerSelection::Single(3));
        assert_eq!(config.smoothing, SmoothingConfig::new(7, 3));
        assert_eq!(config.angle_unit, AngleUnit::Degrees);
        assert_eq!(config.duplicates, DuplicatePolicy::Keep);
        assert!(!config.parallel);
    }

    #[test]
    fn marker_all_is_accepted() {
        let args = parse(&["track.csv", "--marker-id", "all"]);
        assert_eq!(args.marker_id, Some(MarkerSelection::All));
    }

    #[test]
    fn invalid_window_is_rejected() {
        let args = parse(&["track.csv", "--window", "4"]);
        assert!(args.analysis_config().is_err());

        let args = parse(&["track.csv", "--window", "4", "--no-smooth"]);
        assert!(args.analysis_config().is_ok());
    }

    #[test]
    fn bad_angle_unit_fails_to_parse() {
        let result =
            Args::try_parse_from(["motion-metrics", "track.csv", "--angle-unit", "gradians"]);
        assert!(result.is_err());
    }

    #[test]
    fn output_dir_fills_defaults() {
        let args = parse(&["track.csv", "--output-dir", "out", "--export", "custom.csv"]);
        let outputs = args.outputs();
        assert_eq!(outputs.metrics, Some(PathBuf::from("custom.csv")));
        assert_eq!(outputs.summary, Some(PathBuf::from("out/track_summary.csv")));
        assert_eq!(outputs.json, Some(PathBuf::from("out/analysis.json")));
    }

    #[test]
    fn run_writes_requested_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("trajectory.csv");
        std::fs::write(
            &input,
            "timestamp,frame,marker_id,x,y,z,rx,ry,rz\n\
             0.0,0,0,0.00,0,0.3,0,0,0\n\
             0.1,1,0,0.01,0,0.3,0,0,0.1\n\
             0.2,2,0,0.02,0,0.3,0,0,0.2\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        let args = parse(&[input.to_str().unwrap(), "--output-dir", out.to_str().unwrap()]);
        run(&args).unwrap();

        assert!(out.join("analysis_metrics.csv").exists());
        assert!(out.join("track_summary.csv").exists());
        assert!(out.join("analysis.json").exists());
    }
}
