//! Churn data ingestion.
//!
//! This crate loads the raw Telco customer-churn CSV into a Polars DataFrame
//! and applies the deterministic cleaning rules the modeling stages expect.
//!
//! # Features
//!
//! - **Raw loading**: [`load_raw`] reads a comma-delimited file with a header
//!   row, inferring column types from the whole file
//! - **Cleaning**: [`clean_table`] drops the customer identifier, coerces
//!   `TotalCharges` to numbers, removes zero-tenure rows and encodes `Churn`
//!   as 0/1; every step is skipped when its column is absent
//! - **Reporting**: the `_with_report` variants return a [`CleaningReport`]
//!   with per-step row counts
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use churn_ingest::{default_raw_path, load_and_clean};
//!
//! let path = default_raw_path(Path::new("."));
//! let df = load_and_clean(&path)?;
//! assert!(df.column("customerID").is_err());
//! ```

mod clean;
mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    CsvHeaders, DEFAULT_RAW_PATH, default_raw_path, load_raw, read_csv_schema, validate_encoding,
};

// === Cleaning ===
pub use clean::{
    CleaningReport, CleaningStep, clean_table, clean_table_with_report, load_and_clean,
    load_and_clean_with_report,
};
