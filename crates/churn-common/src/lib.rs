//! Shared utilities for the churn data-preparation crates.
//!
//! - [`columns`]: well-known column names of the Telco churn dataset
//! - [`polars`]: `AnyValue` formatting and typed column views

pub mod columns;
pub mod polars;

pub use crate::polars::{
    ColumnError, any_to_string, format_numeric, has_column, is_numeric_dtype,
    numeric_values, parse_f64, string_values,
};
