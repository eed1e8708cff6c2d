//! Deterministic cleaning of the raw churn table.
//!
//! Cleaning runs a fixed, ordered list of [`CleaningStep`]s. Each step guards
//! on one column and is skipped, not failed, when that column is absent, so a
//! table that is already clean passes through unchanged.

use std::path::Path;

use churn_common::columns::{CHURN, CUSTOMER_ID, TENURE, TOTAL_CHARGES};
use churn_common::{has_column, is_numeric_dtype, numeric_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use crate::csv::load_raw;
use crate::error::Result;

/// One cleaning step, applied in [`CleaningStep::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CleaningStep {
    /// Drop the customer identifier column.
    DropIdentifier,
    /// Parse `TotalCharges` as numbers and drop rows that fail to parse.
    CoerceTotalCharges,
    /// Drop rows whose tenure is exactly zero.
    DropZeroTenure,
    /// Encode `Churn` "Yes"/"No" as 1/0.
    EncodeChurn,
}

impl CleaningStep {
    /// All steps in execution order.
    pub const ALL: [CleaningStep; 4] = [
        CleaningStep::DropIdentifier,
        CleaningStep::CoerceTotalCharges,
        CleaningStep::DropZeroTenure,
        CleaningStep::EncodeChurn,
    ];

    /// The column this step requires.
    pub fn column(self) -> &'static str {
        match self {
            Self::DropIdentifier => CUSTOMER_ID,
            Self::CoerceTotalCharges => TOTAL_CHARGES,
            Self::DropZeroTenure => TENURE,
            Self::EncodeChurn => CHURN,
        }
    }

    /// Returns a human-readable name for summaries.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::DropIdentifier => "Drop identifier",
            Self::CoerceTotalCharges => "Coerce total charges",
            Self::DropZeroTenure => "Drop zero tenure",
            Self::EncodeChurn => "Encode churn",
        }
    }
}

/// Row and column accounting for one cleaning run.
///
/// Rows removed by an earlier step are not counted again by a later one, so
/// `output_rows == input_rows - unparseable_total_charges - zero_tenure`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub output_rows: usize,
    /// Whether the customer identifier column was present and dropped.
    pub identifier_dropped: bool,
    /// Rows removed because `TotalCharges` was not a number.
    pub unparseable_total_charges: usize,
    /// Rows removed because tenure was zero.
    pub zero_tenure: usize,
    /// Non-null `Churn` values other than "Yes"/"No" that became null.
    pub churn_unmapped: usize,
    /// Steps skipped because their column was absent.
    pub skipped_steps: Vec<CleaningStep>,
}

/// Applies the cleaning steps to an already-loaded table.
///
/// The input is not modified; a new DataFrame is returned.
pub fn clean_table(df: &DataFrame) -> Result<DataFrame> {
    clean_table_with_report(df).map(|(cleaned, _)| cleaned)
}

/// Applies the cleaning steps and reports what each one did.
pub fn clean_table_with_report(df: &DataFrame) -> Result<(DataFrame, CleaningReport)> {
    let span = info_span!("clean", rows = df.height());
    let _guard = span.enter();

    let mut cleaned = df.clone();
    let mut report = CleaningReport {
        input_rows: df.height(),
        ..CleaningReport::default()
    };

    for step in CleaningStep::ALL {
        if !has_column(&cleaned, step.column()) {
            debug!(step = ?step, column = step.column(), "column absent, skipping step");
            report.skipped_steps.push(step);
            continue;
        }
        match step {
            CleaningStep::DropIdentifier => {
                cleaned = cleaned.drop(CUSTOMER_ID)?;
                report.identifier_dropped = true;
            }
            CleaningStep::CoerceTotalCharges => {
                report.unparseable_total_charges = coerce_total_charges(&mut cleaned)?;
            }
            CleaningStep::DropZeroTenure => {
                report.zero_tenure = drop_zero_tenure(&mut cleaned)?;
            }
            CleaningStep::EncodeChurn => {
                report.churn_unmapped = encode_churn(&mut cleaned)?;
            }
        }
    }

    report.output_rows = cleaned.height();
    info!(
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        unparseable_total_charges = report.unparseable_total_charges,
        zero_tenure = report.zero_tenure,
        "cleaned table"
    );

    Ok((cleaned, report))
}

/// Loads the raw file and cleans it.
pub fn load_and_clean(path: &Path) -> Result<DataFrame> {
    load_and_clean_with_report(path).map(|(cleaned, _)| cleaned)
}

/// Loads the raw file, cleans it and reports per-step counts.
pub fn load_and_clean_with_report(path: &Path) -> Result<(DataFrame, CleaningReport)> {
    let raw = load_raw(path)?;
    clean_table_with_report(&raw)
}

/// Makes `TotalCharges` numeric and drops rows without a usable value.
///
/// A column that is already numeric keeps its dtype and only loses null or
/// NaN rows. Any other column is rebuilt as `Float64`, with values that do
/// not parse as numbers counted as missing. Returns the number of rows removed.
fn coerce_total_charges(df: &mut DataFrame) -> Result<usize> {
    let column = df.column(TOTAL_CHARGES)?;
    let already_numeric = is_numeric_dtype(column.dtype());
    let values = numeric_values(column, true)?;
    let keep: Vec<bool> = values
        .iter()
        .map(|v| v.is_some_and(|x| !x.is_nan()))
        .collect();
    let removed = keep.iter().filter(|k| !**k).count();

    if !already_numeric {
        debug!(dtype = %column.dtype(), "converting TotalCharges to Float64");
        df.with_column(Column::new(TOTAL_CHARGES.into(), values))?;
    }
    if removed > 0 {
        let mask = BooleanChunked::from_slice("total_charges_valid".into(), &keep);
        *df = df.filter(&mask)?;
        debug!(removed, "dropped rows with unparseable TotalCharges");
    }

    Ok(removed)
}

/// Drops rows whose tenure equals zero. Null tenure is kept.
///
/// Returns the number of rows removed.
fn drop_zero_tenure(df: &mut DataFrame) -> Result<usize> {
    let values = numeric_values(df.column(TENURE)?, false)?;
    let keep: Vec<bool> = values.iter().map(|v| *v != Some(0.0)).collect();
    let removed = keep.iter().filter(|k| !**k).count();

    if removed > 0 {
        let mask = BooleanChunked::from_slice("tenure_nonzero".into(), &keep);
        *df = df.filter(&mask)?;
        debug!(removed, "dropped rows with zero tenure");
    }

    Ok(removed)
}

/// Encodes a string `Churn` column as `Int64` 1/0.
///
/// Non-string columns are treated as already encoded and left unchanged.
/// Returns the number of non-null values that were neither "Yes" nor "No".
fn encode_churn(df: &mut DataFrame) -> Result<usize> {
    let column = df.column(CHURN)?;
    if column.dtype() != &DataType::String {
        debug!(dtype = %column.dtype(), "Churn is not a string column, leaving unchanged");
        return Ok(0);
    }

    let mut unmapped = 0usize;
    let encoded: Vec<Option<i64>> = column
        .str()?
        .into_iter()
        .map(|value| match value {
            Some("Yes") => Some(1),
            Some("No") => Some(0),
            Some(_) => {
                unmapped += 1;
                None
            }
            None => None,
        })
        .collect();

    if unmapped > 0 {
        warn!(unmapped, "Churn values outside Yes/No mapped to null");
    }
    df.with_column(Column::new(CHURN.into(), encoded))?;

    Ok(unmapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                CUSTOMER_ID.into(),
                vec!["7590-VHVEG", "5575-GNVDE", "4472-LVYGI", "9999-BADTC"],
            ),
            Column::new(TENURE.into(), vec![1i64, 34, 0, 3]),
            Column::new(TOTAL_CHARGES.into(), vec!["29.85", "1889.5", " ", "oops"]),
            Column::new(CHURN.into(), vec!["No", "Yes", "No", "Maybe"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_clean_table_applies_all_steps() {
        let (cleaned, report) = clean_table_with_report(&raw_df()).unwrap();

        assert!(cleaned.column(CUSTOMER_ID).is_err());
        assert_eq!(cleaned.height(), 2);
        let charges = cleaned.column(TOTAL_CHARGES).unwrap().f64().unwrap();
        assert_eq!(charges.get(0), Some(29.85));
        assert_eq!(charges.get(1), Some(1889.5));
        let churn = cleaned.column(CHURN).unwrap().i64().unwrap();
        assert_eq!(churn.get(0), Some(0));
        assert_eq!(churn.get(1), Some(1));

        assert!(report.identifier_dropped);
        assert_eq!(report.input_rows, 4);
        assert_eq!(report.unparseable_total_charges, 2);
        // The zero-tenure row was already removed for its blank TotalCharges.
        assert_eq!(report.zero_tenure, 0);
        assert_eq!(report.output_rows, 2);
        assert!(report.skipped_steps.is_empty());
    }

    #[test]
    fn test_clean_table_does_not_modify_input() {
        let raw = raw_df();
        let _ = clean_table(&raw).unwrap();

        assert_eq!(raw.height(), 4);
        assert!(raw.column(CUSTOMER_ID).is_ok());
        assert_eq!(raw.column(CHURN).unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_clean_table_skips_absent_columns() {
        let df = DataFrame::new(vec![Column::new("gender".into(), vec!["Female", "Male"])])
            .unwrap();
        let (cleaned, report) = clean_table_with_report(&df).unwrap();

        assert_eq!(cleaned, df);
        assert_eq!(report.skipped_steps, CleaningStep::ALL.to_vec());
    }

    #[test]
    fn test_clean_table_is_idempotent() {
        let once = clean_table(&raw_df()).unwrap();
        let (twice, report) = clean_table_with_report(&once).unwrap();

        assert_eq!(once, twice);
        assert_eq!(report.unparseable_total_charges, 0);
        assert_eq!(report.zero_tenure, 0);
        assert_eq!(report.churn_unmapped, 0);
    }

    #[test]
    fn test_zero_tenure_removed_with_numeric_charges() {
        let df = DataFrame::new(vec![
            Column::new(TENURE.into(), vec![0i64, 5, 0]),
            Column::new(TOTAL_CHARGES.into(), vec![10.0f64, 20.0, 30.0]),
        ])
        .unwrap();
        let (cleaned, report) = clean_table_with_report(&df).unwrap();

        assert_eq!(cleaned.height(), 1);
        assert_eq!(report.zero_tenure, 2);
        let tenure = cleaned.column(TENURE).unwrap().i64().unwrap();
        assert_eq!(tenure.get(0), Some(5));
    }

    #[test]
    fn test_null_tenure_is_kept() {
        let df = DataFrame::new(vec![Column::new(TENURE.into(), vec![None, Some(0i64), Some(2)])])
            .unwrap();
        let cleaned = clean_table(&df).unwrap();

        assert_eq!(cleaned.height(), 2);
    }

    #[test]
    fn test_non_numeric_tenure_is_type_mismatch() {
        let df = DataFrame::new(vec![Column::new(TENURE.into(), vec!["one", "two"])]).unwrap();
        let result = clean_table(&df);

        assert!(matches!(
            result,
            Err(crate::IngestError::TypeMismatch { ref column, .. }) if column == TENURE
        ));
    }

    #[test]
    fn test_nan_total_charges_is_dropped() {
        let df = DataFrame::new(vec![Column::new(TOTAL_CHARGES.into(), vec!["NaN", "12"])])
            .unwrap();
        let (cleaned, report) = clean_table_with_report(&df).unwrap();

        assert_eq!(cleaned.height(), 1);
        assert_eq!(report.unparseable_total_charges, 1);
    }

    #[test]
    fn test_churn_unmapped_values_become_null() {
        let df = DataFrame::new(vec![Column::new(
            CHURN.into(),
            vec![Some("Yes"), Some("yes"), None],
        )])
        .unwrap();
        let (cleaned, report) = clean_table_with_report(&df).unwrap();

        let churn = cleaned.column(CHURN).unwrap().i64().unwrap();
        assert_eq!(churn.get(0), Some(1));
        assert_eq!(churn.get(1), None);
        assert_eq!(churn.get(2), None);
        assert_eq!(report.churn_unmapped, 1);
    }

    #[test]
    fn test_numeric_churn_passes_through() {
        let df = DataFrame::new(vec![Column::new(CHURN.into(), vec![0i64, 1, 1])]).unwrap();
        let cleaned = clean_table(&df).unwrap();

        assert_eq!(cleaned, df);
    }

    #[test]
    fn test_integer_total_charges_keeps_dtype() {
        let df = DataFrame::new(vec![Column::new(TOTAL_CHARGES.into(), vec![30i64, 60])])
            .unwrap();
        let cleaned = clean_table(&df).unwrap();

        assert_eq!(cleaned, df);
        assert_eq!(cleaned.column(TOTAL_CHARGES).unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_integer_total_charges_drops_nulls_and_keeps_dtype() {
        let df = DataFrame::new(vec![Column::new(
            TOTAL_CHARGES.into(),
            vec![Some(30i64), None, Some(90)],
        )])
        .unwrap();
        let (cleaned, report) = clean_table_with_report(&df).unwrap();

        assert_eq!(report.unparseable_total_charges, 1);
        let charges = cleaned.column(TOTAL_CHARGES).unwrap().i64().unwrap();
        assert_eq!(charges.into_iter().collect::<Vec<_>>(), vec![Some(30), Some(90)]);
    }

    #[test]
    fn test_float_total_charges_drops_nan() {
        let df = DataFrame::new(vec![Column::new(
            TOTAL_CHARGES.into(),
            vec![29.85f64, f64::NAN],
        )])
        .unwrap();
        let cleaned = clean_table(&df).unwrap();

        assert_eq!(cleaned.height(), 1);
        assert_eq!(cleaned.column(TOTAL_CHARGES).unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_boolean_total_charges_is_not_an_error() {
        let df = DataFrame::new(vec![Column::new(TOTAL_CHARGES.into(), vec![true, false])])
            .unwrap();
        let (cleaned, report) = clean_table_with_report(&df).unwrap();

        assert_eq!(report.unparseable_total_charges, 0);
        let charges = cleaned.column(TOTAL_CHARGES).unwrap().f64().unwrap();
        assert_eq!(charges.get(0), Some(1.0));
        assert_eq!(charges.get(1), Some(0.0));
    }
}
