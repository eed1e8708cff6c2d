//! The feature rule set and the per-rule column derivations.

use churn_common::columns::{
    CHARGES_PER_MONTH_LIFETIME, HAS_FIBER_OPTIC, INTERNET_SERVICE, IS_ELECTRONIC_CHECK,
    IS_PAPERLESS, NUM_SERVICES, PAPERLESS_BILLING, PAYMENT_METHOD, SERVICE_COLUMNS, TENURE,
    TENURE_BUCKET, TOTAL_CHARGES,
};
use churn_common::{has_column, numeric_values, string_values};
use polars::prelude::*;

use crate::error::Result;
use crate::types::{FeatureKind, FeatureRule, Requirement};

/// Upper (inclusive) bin edges and labels for `tenure_bucket`.
///
/// The lowest bin is open at zero, so a tenure of 0 gets no bucket.
pub const TENURE_BINS: [(f64, &str); 5] = [
    (12.0, "0-1y"),
    (24.0, "1-2y"),
    (48.0, "2-4y"),
    (72.0, "4-6y"),
    (f64::INFINITY, "6y+"),
];

static DEFAULT_RULES: [FeatureRule; 6] = [
    FeatureRule {
        output: NUM_SERVICES,
        requires: Requirement::AnyOf(&SERVICE_COLUMNS),
        kind: FeatureKind::ServiceCount,
        description: "Number of service columns equal to \"Yes\"",
    },
    FeatureRule {
        output: TENURE_BUCKET,
        requires: Requirement::AllOf(&[TENURE]),
        kind: FeatureKind::TenureBucket,
        description: "Tenure in right-closed year bins",
    },
    FeatureRule {
        output: CHARGES_PER_MONTH_LIFETIME,
        requires: Requirement::AllOf(&[TOTAL_CHARGES, TENURE]),
        kind: FeatureKind::ChargesPerMonth,
        description: "TotalCharges divided by tenure (zero tenure counts as one)",
    },
    FeatureRule {
        output: HAS_FIBER_OPTIC,
        requires: Requirement::AllOf(&[INTERNET_SERVICE]),
        kind: FeatureKind::Flag {
            source: INTERNET_SERVICE,
            equals: "Fiber optic",
        },
        description: "InternetService is fiber optic",
    },
    FeatureRule {
        output: IS_ELECTRONIC_CHECK,
        requires: Requirement::AllOf(&[PAYMENT_METHOD]),
        kind: FeatureKind::Flag {
            source: PAYMENT_METHOD,
            equals: "Electronic check",
        },
        description: "PaymentMethod is electronic check",
    },
    FeatureRule {
        output: IS_PAPERLESS,
        requires: Requirement::AllOf(&[PAPERLESS_BILLING]),
        kind: FeatureKind::Flag {
            source: PAPERLESS_BILLING,
            equals: "Yes",
        },
        description: "Paperless billing enabled",
    },
];

/// The standard churn feature rules.
pub fn default_rules() -> &'static [FeatureRule] {
    &DEFAULT_RULES
}

/// Assigns a tenure value to its bucket label.
///
/// # Examples
///
/// ```
/// use churn_features::tenure_bucket;
///
/// assert_eq!(tenure_bucket(5.0), Some("0-1y"));
/// assert_eq!(tenure_bucket(12.0), Some("0-1y"));
/// assert_eq!(tenure_bucket(13.0), Some("1-2y"));
/// assert_eq!(tenure_bucket(73.0), Some("6y+"));
/// assert_eq!(tenure_bucket(0.0), None);
/// ```
pub fn tenure_bucket(tenure: f64) -> Option<&'static str> {
    if tenure.is_nan() || tenure <= 0.0 {
        return None;
    }
    TENURE_BINS
        .iter()
        .find(|(upper, _)| tenure <= *upper)
        .map(|(_, label)| *label)
}

/// Computes the rule's output column and writes it into `df`.
///
/// An existing column with the same name is replaced in place.
pub(crate) fn apply_rule(df: &mut DataFrame, rule: &FeatureRule) -> Result<()> {
    let column = match rule.kind {
        FeatureKind::ServiceCount => service_count(df, rule.output)?,
        FeatureKind::TenureBucket => tenure_buckets(df, rule.output)?,
        FeatureKind::ChargesPerMonth => charges_per_month(df, rule.output)?,
        FeatureKind::Flag { source, equals } => flag(df, rule.output, source, equals)?,
    };
    df.with_column(column)?;
    Ok(())
}

fn service_count(df: &DataFrame, output: &str) -> Result<Column> {
    let mut counts = vec![0i64; df.height()];
    for name in SERVICE_COLUMNS.iter().filter(|name| has_column(df, name)) {
        let values = string_values(df.column(name)?)?;
        for (count, value) in counts.iter_mut().zip(values) {
            if value == Some("Yes") {
                *count += 1;
            }
        }
    }
    Ok(Column::new(output.into(), counts))
}

fn tenure_buckets(df: &DataFrame, output: &str) -> Result<Column> {
    let labels: Vec<Option<&str>> = numeric_values(df.column(TENURE)?, false)?
        .into_iter()
        .map(|tenure| tenure.and_then(tenure_bucket))
        .collect();
    Ok(Column::new(output.into(), labels))
}

fn charges_per_month(df: &DataFrame, output: &str) -> Result<Column> {
    let charges = numeric_values(df.column(TOTAL_CHARGES)?, false)?;
    let tenure = numeric_values(df.column(TENURE)?, false)?;
    let ratios: Vec<Option<f64>> = charges
        .into_iter()
        .zip(tenure)
        .map(|(charges, tenure)| match (charges, tenure) {
            (Some(c), Some(t)) => Some(c / if t == 0.0 { 1.0 } else { t }),
            _ => None,
        })
        .collect();
    Ok(Column::new(output.into(), ratios))
}

fn flag(df: &DataFrame, output: &str, source: &str, equals: &str) -> Result<Column> {
    let flags: Vec<i64> = string_values(df.column(source)?)?
        .into_iter()
        .map(|value| i64::from(value == Some(equals)))
        .collect();
    Ok(Column::new(output.into(), flags))
}
