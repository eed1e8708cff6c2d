//! One-hot expansion of string columns.
//!
//! Each string column is replaced by one `Int64` indicator per distinct
//! non-null value, except the lexicographically first value, which is the
//! reference level. Indicators are appended after the remaining columns in
//! (column name, value) order so the output layout is reproducible. Names
//! must be unique; a clash is an error rather than an overwrite.

use std::collections::{BTreeMap, BTreeSet};

use churn_common::string_values;
use polars::prelude::*;
use tracing::debug;

use crate::error::{FeatureError, Result};
use crate::types::{EncodedColumn, OneHotReport};

/// Name of the indicator column for `value` of `column`.
///
/// # Examples
///
/// ```
/// use churn_features::indicator_name;
///
/// assert_eq!(indicator_name("Contract", "One year"), "Contract_One year");
/// ```
pub fn indicator_name(column: &str, value: &str) -> String {
    format!("{column}_{value}")
}

/// String columns eligible for encoding, sorted by name.
pub fn categorical_columns(df: &DataFrame, exclude: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String)
        .map(|c| c.name().to_string())
        .filter(|name| !exclude.contains(name))
        .collect();
    columns.sort();
    columns
}

/// Replaces every string column (minus `exclude`) with indicator columns.
///
/// Nulls yield 0 in every indicator. A column with fewer than two distinct
/// values is removed without adding indicators.
///
/// # Errors
///
/// [`FeatureError::IndicatorCollision`] when an indicator name is produced
/// twice (e.g. `a` = "b_c" and `a_b` = "c") or matches a column that is kept.
pub fn one_hot_encode(df: &DataFrame, exclude: &[String]) -> Result<(DataFrame, OneHotReport)> {
    let columns = categorical_columns(df, exclude);
    let kept: BTreeSet<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .filter(|name| !columns.contains(name))
        .collect();
    // indicator name -> source column
    let mut claimed: BTreeMap<String, &str> = BTreeMap::new();
    let mut encoded = df.clone();
    let mut indicators: Vec<Column> = Vec::new();
    let mut report = OneHotReport::default();

    for name in &columns {
        let values = string_values(df.column(name)?)?;
        let levels: BTreeSet<&str> = values.iter().flatten().copied().collect();
        let mut levels = levels.into_iter();
        let reference = levels.next().map(str::to_string);

        let mut names = Vec::new();
        for level in levels {
            let indicator = indicator_name(name, level);
            let existing = if kept.contains(&indicator) {
                Some(format!("column '{indicator}'"))
            } else {
                claimed
                    .get(&indicator)
                    .map(|source| format!("an indicator for column '{source}'"))
            };
            if let Some(existing) = existing {
                return Err(FeatureError::IndicatorCollision {
                    indicator,
                    column: name.clone(),
                    existing,
                });
            }
            claimed.insert(indicator.clone(), name);

            let flags: Vec<i64> = values
                .iter()
                .map(|value| i64::from(*value == Some(level)))
                .collect();
            indicators.push(Column::new(indicator.as_str().into(), flags));
            names.push(indicator);
        }

        debug!(
            column = %name,
            reference = reference.as_deref().unwrap_or(""),
            indicators = names.len(),
            "one-hot encoded column"
        );
        encoded = encoded.drop(name)?;
        report.encoded.push(EncodedColumn {
            column: name.clone(),
            reference,
            indicators: names,
        });
    }

    for indicator in indicators {
        encoded.with_column(indicator)?;
    }

    Ok((encoded, report))
}
