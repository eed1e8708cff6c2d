//! Churn feature engineering crate.
//!
//! Appends derived columns to a churn table. Every feature is a declared
//! [`FeatureRule`] naming the columns it needs and the column it produces;
//! a rule whose inputs are absent is skipped rather than failed, so the
//! builder works on raw and cleaned tables alike.
//!
//! # Overview
//!
//! - **Rules**: `num_services`, `tenure_bucket`, `charges_per_month_lifetime`
//!   and the `has_fiber_optic` / `is_electronic_check` / `is_paperless` flags
//! - **One-hot encoding**: optional expansion of string columns into 0/1
//!   indicator columns with the first level dropped
//! - **Reporting**: [`FeatureReport`] records which rules ran and why others
//!   were skipped
//!
//! # Example
//!
//! ```ignore
//! use churn_features::add_features;
//!
//! let enriched = add_features(&cleaned, false)?;
//! assert_eq!(enriched.height(), cleaned.height());
//! ```

mod error;
mod executor;
mod one_hot;
mod rules;
mod types;

// Core types
pub use types::{
    EncodedColumn, FeatureKind, FeatureOptions, FeatureReport, FeatureRule, OneHotReport,
    Requirement, RuleOutcome, RuleStatus,
};

// Error type
pub use error::{FeatureError, Result};

// Rule set
pub use rules::{TENURE_BINS, default_rules, tenure_bucket};

// Execution
pub use executor::{add_features, add_features_with_options, apply_rules};

// One-hot encoding
pub use one_hot::{categorical_columns, indicator_name, one_hot_encode};
