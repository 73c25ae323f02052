//! File input and output for the command-line tool.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use motion_metrics::{Analysis, AnalysisConfig, SampleStore, Table};
use tracing::{debug, info};

/// Reads a trajectory CSV into a sample store.
///
/// The header row names the columns; see [`motion_metrics::RecordSchema`].
pub fn read_samples(path: &Path) -> Result<SampleStore> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let records = reader
        .records()
        .collect::<Result<Vec<csv::StringRecord>, _>>()
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    debug!(records = records.len(), "Read trajectory CSV");

    let store = SampleStore::parse(&headers, records.iter().map(|r| r.iter().collect::<Vec<_>>()))
        .with_context(|| format!("Invalid trajectory data in {}", path.display()))?;

    info!(
        samples = store.len(),
        markers = store.entity_ids().len(),
        "Loaded {}",
        path.display()
    );
    Ok(store)
}

/// Writes a table as CSV with a header row.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(table.columns())?;
    for record in table.records() {
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!(rows = table.len(), "Wrote {}", path.display());
    Ok(())
}

/// Writes the full analysis as pretty-printed JSON.
pub fn write_json(path: &Path, analysis: &Analysis) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), analysis)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {}", path.display());
    Ok(())
}

/// Loads an analysis configuration from a JSON file.
///
/// Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}
