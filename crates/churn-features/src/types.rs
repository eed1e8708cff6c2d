//! Core types for the feature builder.
//!
//! Rules are plain data: which columns they need, which column they write and
//! how the value is derived. The executor decides whether a rule runs by
//! checking its [`Requirement`] against the table.

use churn_common::columns::CUSTOMER_ID;
use churn_common::has_column;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Input columns a rule needs before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Every listed column must be present.
    AllOf(&'static [&'static str]),
    /// At least one listed column must be present; absent ones are ignored.
    AnyOf(&'static [&'static str]),
}

impl Requirement {
    /// All columns named by the requirement.
    pub fn columns(&self) -> &'static [&'static str] {
        match *self {
            Self::AllOf(columns) | Self::AnyOf(columns) => columns,
        }
    }

    /// Returns the missing columns when the requirement is not met.
    pub fn unmet(&self, df: &DataFrame) -> Option<Vec<String>> {
        let missing: Vec<String> = self
            .columns()
            .iter()
            .filter(|name| !has_column(df, name))
            .map(|name| (*name).to_string())
            .collect();
        let satisfied = match self {
            Self::AllOf(_) => missing.is_empty(),
            Self::AnyOf(columns) => missing.len() < columns.len(),
        };
        if satisfied { None } else { Some(missing) }
    }
}

/// How a rule derives its output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Count of present service columns equal to "Yes" (`Int64`).
    ServiceCount,
    /// Tenure assigned to a right-closed bin label (`String`).
    TenureBucket,
    /// `TotalCharges / tenure`, with zero tenure treated as one (`Float64`).
    ChargesPerMonth,
    /// 1 when `source` equals `equals`, else 0 (`Int64`).
    Flag {
        source: &'static str,
        equals: &'static str,
    },
}

/// A single declared feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRule {
    /// Column written by this rule.
    pub output: &'static str,
    pub requires: Requirement,
    pub kind: FeatureKind,
    pub description: &'static str,
}

/// Options for [`crate::add_features_with_options`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureOptions {
    /// Replace string columns with indicator columns after the rules run.
    pub one_hot: bool,
    /// String columns left untouched by one-hot encoding.
    pub one_hot_exclude: Vec<String>,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            one_hot: false,
            one_hot_exclude: vec![CUSTOMER_ID.to_string()],
        }
    }
}

impl FeatureOptions {
    /// Enable or disable one-hot encoding.
    #[must_use]
    pub fn with_one_hot(mut self, enable: bool) -> Self {
        self.one_hot = enable;
        self
    }
}

/// Whether a rule ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RuleStatus {
    Applied,
    Skipped { missing: Vec<String> },
}

/// Outcome of one rule in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub output: String,
    #[serde(flatten)]
    pub status: RuleStatus,
}

/// One string column replaced by indicator columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedColumn {
    pub column: String,
    /// Level dropped as the reference; `None` when the column was all null.
    pub reference: Option<String>,
    pub indicators: Vec<String>,
}

/// Summary of a one-hot expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotReport {
    pub encoded: Vec<EncodedColumn>,
}

impl OneHotReport {
    /// Total number of indicator columns added.
    pub fn indicator_count(&self) -> usize {
        self.encoded.iter().map(|c| c.indicators.len()).sum()
    }
}

/// Summary of a feature-building run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureReport {
    pub rows: usize,
    pub rules: Vec<RuleOutcome>,
    pub one_hot: Option<OneHotReport>,
}

impl FeatureReport {
    /// Output columns of rules that ran.
    pub fn applied(&self) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|r| r.status == RuleStatus::Applied)
            .map(|r| r.output.as_str())
            .collect()
    }

    /// Output columns of rules that were skipped.
    pub fn skipped(&self) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|r| r.status != RuleStatus::Applied)
            .map(|r| r.output.as_str())
            .collect()
    }
}
