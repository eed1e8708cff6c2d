//! Pipeline stages for the CLI commands.
//!
//! Stage 1 loads the raw file, stage 2 cleans it, stage 3 builds features and
//! stage 4 writes the result. Stages 2-4 are optional per command.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use churn_common::any_to_string;
use churn_features::{FeatureOptions, FeatureReport, add_features_with_options};
use churn_ingest::{CleaningReport, clean_table_with_report, default_raw_path, load_raw};
use polars::prelude::*;
use serde::Serialize;
use tracing::{info, info_span};

/// What a pipeline run should do.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    /// Run the cleaning stage.
    pub clean: bool,
    /// Run the feature stage with these options.
    pub features: Option<FeatureOptions>,
    /// Write the final table as CSV.
    pub output: Option<PathBuf>,
}

/// Result of a pipeline run; the caller owns the final table.
#[derive(Debug)]
pub struct PipelineResult {
    pub input: PathBuf,
    pub raw_rows: usize,
    pub cleaning: Option<CleaningReport>,
    pub features: Option<FeatureReport>,
    pub table: DataFrame,
    pub output: Option<PathBuf>,
}

/// Serializable run summary for `--summary-json`.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub input: &'a Path,
    pub raw_rows: usize,
    pub rows: usize,
    pub columns: Vec<String>,
    pub cleaning: Option<&'a CleaningReport>,
    pub features: Option<&'a FeatureReport>,
    pub output: Option<&'a Path>,
}

impl PipelineResult {
    pub fn summary(&self) -> RunSummary<'_> {
        RunSummary {
            input: &self.input,
            raw_rows: self.raw_rows,
            rows: self.table.height(),
            columns: self
                .table
                .get_column_names()
                .iter()
                .map(|name| name.to_string())
                .collect(),
            cleaning: self.cleaning.as_ref(),
            features: self.features.as_ref(),
            output: self.output.as_deref(),
        }
    }
}

/// Returns the explicit input, or the conventional raw path under `root`.
pub fn resolve_input(input: Option<&Path>, root: &Path) -> PathBuf {
    input.map_or_else(|| default_raw_path(root), Path::to_path_buf)
}

/// Runs the configured stages.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineResult> {
    let span = info_span!("pipeline", input = %config.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    // Stage 1: Load
    let raw = load_raw(&config.input)
        .with_context(|| format!("load {}", config.input.display()))?;
    let raw_rows = raw.height();

    // Stage 2: Clean
    let (table, cleaning) = if config.clean {
        let (cleaned, report) = clean_table_with_report(&raw).context("clean table")?;
        (cleaned, Some(report))
    } else {
        (raw, None)
    };

    // Stage 3: Features
    let (table, features) = match &config.features {
        Some(options) => {
            let (enriched, report) =
                add_features_with_options(&table, options).context("build features")?;
            (enriched, Some(report))
        }
        None => (table, None),
    };

    // Stage 4: Output
    if let Some(path) = &config.output {
        write_csv(&table, path)?;
    }

    info!(
        raw_rows,
        rows = table.height(),
        columns = table.width(),
        duration_ms = start.elapsed().as_millis() as u64,
        "pipeline complete"
    );

    Ok(PipelineResult {
        input: config.input.clone(),
        raw_rows,
        cleaning,
        features,
        table,
        output: config.output.clone(),
    })
}

/// Writes a table as CSV with a header row.
///
/// Nulls are written as empty fields and floats without trailing zeros.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let mut writer =
        ::csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer.write_record(df.get_column_names().iter().map(|name| name.as_str()))?;

    let columns = df.get_columns();
    let mut record = Vec::with_capacity(columns.len());
    for row in 0..df.height() {
        record.clear();
        for column in columns {
            record.push(any_to_string(column.get(row)?));
        }
        writer.write_record(&record)?;
    }
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;

    info!(path = %path.display(), rows = df.height(), "wrote table");
    Ok(())
}

/// Writes the run summary as pretty-printed JSON.
pub fn write_summary_json(result: &PipelineResult, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(file, &result.summary())
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
