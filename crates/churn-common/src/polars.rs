//! Polars value and column helpers.
//!
//! This module provides conversions from Polars `AnyValue` to plain Rust
//! values, plus typed views over whole columns that the cleaning and feature
//! stages share. The views report incompatible column types as
//! [`ColumnError::TypeMismatch`] instead of silently coercing them.

use polars::prelude::*;
use thiserror::Error;

/// Errors produced when a column cannot be viewed with the requested type.
#[derive(Debug, Error)]
pub enum ColumnError {
    /// Column values are incompatible with the requested view.
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

impl From<PolarsError> for ColumnError {
    fn from(err: PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, properly formats numeric types without
/// unnecessary trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use churn_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int64(42)), "42");
/// assert_eq!(any_to_string(AnyValue::Float64(29.850)), "29.85");
/// assert_eq!(any_to_string(AnyValue::String("Fiber optic")), "Fiber optic");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "1" } else { "0" }.to_string(),
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Formats a floating-point number as a string without trailing zeros after decimal.
///
/// Integer-valued floats like 40.0 are formatted as "40".
///
/// # Examples
///
/// ```
/// use churn_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(108.15), "108.15");
/// assert_eq!(format_numeric(0.0), "0");
/// assert_eq!(format_numeric(1889.50), "1889.5");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Parses a string as f64, returning None for invalid or blank strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Returns true for integer and floating-point dtypes.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Returns true if the DataFrame has a column with exactly this name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Reads a column as floating-point values.
///
/// Numeric columns are cast to `Float64`. String columns are accepted when
/// every non-blank value parses as a number; blank strings become `None`.
///
/// With `coerce = true` nothing fails on content: unparseable strings become
/// `None`, booleans become 1/0 and any other dtype yields only `None`.
pub fn numeric_values(column: &Column, coerce: bool) -> Result<Vec<Option<f64>>, ColumnError> {
    let dtype = column.dtype();
    if is_numeric_dtype(dtype) {
        let cast = column.cast(&DataType::Float64)?;
        let values = cast.f64()?.into_iter().collect();
        return Ok(values);
    }

    match dtype {
        DataType::Null => Ok(vec![None; column.len()]),
        DataType::String => {
            let mut values = Vec::with_capacity(column.len());
            for opt in column.str()?.into_iter() {
                let Some(raw) = opt else {
                    values.push(None);
                    continue;
                };
                match parse_f64(raw) {
                    Some(v) => values.push(Some(v)),
                    None if coerce || raw.trim().is_empty() => values.push(None),
                    None => {
                        return Err(ColumnError::TypeMismatch {
                            column: column.name().to_string(),
                            expected: "numeric",
                            found: format!("'{raw}'"),
                        });
                    }
                }
            }
            Ok(values)
        }
        DataType::Boolean if coerce => Ok(column
            .bool()?
            .into_iter()
            .map(|opt| opt.map(|b| f64::from(u8::from(b))))
            .collect()),
        _ if coerce => Ok(vec![None; column.len()]),
        other => Err(ColumnError::TypeMismatch {
            column: column.name().to_string(),
            expected: "numeric",
            found: other.to_string(),
        }),
    }
}

/// Reads a column as string values.
///
/// All-null columns are accepted and yield only `None`.
pub fn string_values(column: &Column) -> Result<Vec<Option<&str>>, ColumnError> {
    match column.dtype() {
        DataType::String => Ok(column.str()?.into_iter().collect()),
        DataType::Null => Ok(vec![None; column.len()]),
        other => Err(ColumnError::TypeMismatch {
            column: column.name().to_string(),
            expected: "string",
            found: other.to_string(),
        }),
    }
}
