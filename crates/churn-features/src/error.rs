//! Error types for feature building.

use churn_common::ColumnError;
use thiserror::Error;

/// Errors that can occur while deriving features.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// A rule's input column holds values of the wrong type.
    #[error("column '{column}' expected {expected} values, found {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: String,
    },

    /// Two one-hot indicators, or an indicator and a kept column, share a name.
    #[error("one-hot indicator '{indicator}' for column '{column}' collides with {existing}")]
    IndicatorCollision {
        indicator: String,
        column: String,
        /// Description of the column already holding the name.
        existing: String,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for FeatureError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<ColumnError> for FeatureError {
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

/// Result type for feature operations.
pub type Result<T> = std::result::Result<T, FeatureError>;
