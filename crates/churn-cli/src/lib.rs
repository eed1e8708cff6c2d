//! Library components of the churn-prep CLI.

pub mod logging;
pub mod pipeline;
