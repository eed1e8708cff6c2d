use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use std::path::PathBuf;
use tracing::info;

use churn_cli::pipeline::{
    PipelineConfig, PipelineResult, resolve_input, run_pipeline, write_summary_json,
};
use churn_features::FeatureOptions;
use churn_ingest::{load_raw, read_csv_schema};

use crate::cli::{CleanArgs, InputArgs, RunArgs};

pub fn run_run(args: &RunArgs) -> Result<PipelineResult> {
    let input = resolve_input(args.input.input.as_deref(), &args.input.root);
    let config = PipelineConfig {
        input,
        clean: !args.raw,
        features: Some(FeatureOptions::default().with_one_hot(args.one_hot)),
        output: args.output.clone(),
    };
    let result = run_pipeline(&config)?;
    if let Some(path) = &args.summary_json {
        write_summary_json(&result, path)?;
        info!(path = %path.display(), "wrote run summary");
    }
    Ok(result)
}

pub fn run_clean(args: &CleanArgs) -> Result<PipelineResult> {
    let input = resolve_input(args.input.input.as_deref(), &args.input.root);
    let config = PipelineConfig {
        input,
        clean: true,
        features: None,
        output: args.output.clone(),
    };
    run_pipeline(&config)
}

pub fn run_schema(args: &InputArgs) -> Result<(PathBuf, DataFrame)> {
    let input = resolve_input(args.input.as_deref(), &args.root);
    // Header problems give a clearer error than the full parse.
    read_csv_schema(&input).with_context(|| format!("read header of {}", input.display()))?;
    let df = load_raw(&input).with_context(|| format!("load {}", input.display()))?;
    Ok((input, df))
}
