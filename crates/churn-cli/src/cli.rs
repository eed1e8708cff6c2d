//! CLI argument definitions for churn-prep.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "churn-prep",
    version,
    about = "Clean the Telco customer-churn CSV and derive model features",
    long_about = "Clean the Telco customer-churn CSV and derive model features.\n\n\
                  Loads the raw file, drops the identifier, removes rows with invalid\n\
                  TotalCharges or zero tenure, encodes Churn as 0/1 and appends\n\
                  engineered columns."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean the raw file and build features.
    Run(RunArgs),

    /// Clean the raw file without building features.
    Clean(CleanArgs),

    /// Show the columns and inferred types of the raw file.
    Schema(InputArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Raw CSV file (default: <ROOT>/data/raw/Telco-Customer-Churn.csv).
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Project root used to resolve the default input path.
    #[arg(long = "root", value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Replace string columns with one-hot indicator columns.
    #[arg(long = "one-hot")]
    pub one_hot: bool,

    /// Build features on the raw table, skipping the cleaning stage.
    #[arg(long = "raw")]
    pub raw: bool,

    /// Write the resulting table as CSV.
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Write the cleaning and feature reports as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Args)]
pub struct CleanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the cleaned table as CSV.
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
