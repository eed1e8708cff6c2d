//! Error types for churn data ingestion.

use std::path::PathBuf;

use churn_common::ColumnError;
use thiserror::Error;

/// Errors that can occur while loading or cleaning the raw table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path} (expected UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row is missing or contains an empty column name.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// Header row names the same column twice.
    #[error("duplicate column '{column}' in header of {path}")]
    DuplicateColumn { column: String, path: PathBuf },

    // === DataFrame Errors ===
    /// Column values are incompatible with a cleaning step.
    #[error("column '{column}' expected {expected} values, found {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: String,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<ColumnError> for IngestError {
    fn from(err: ColumnError) -> Self {
        match err {
            ColumnError::TypeMismatch {
                column,
                expected,
                found,
            } => Self::TypeMismatch {
                column,
                expected,
                found,
            },
            ColumnError::DataFrame { message } => Self::DataFrame { message },
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
