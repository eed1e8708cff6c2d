//! Feature rule execution.

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::error::Result;
use crate::one_hot::one_hot_encode;
use crate::rules::{apply_rule, default_rules};
use crate::types::{FeatureOptions, FeatureReport, FeatureRule, RuleOutcome, RuleStatus};

/// Appends the standard churn features.
///
/// With `one_hot = true`, string columns other than `customerID` are then
/// replaced by indicator columns. The row count never changes.
pub fn add_features(df: &DataFrame, one_hot: bool) -> Result<DataFrame> {
    let options = FeatureOptions::default().with_one_hot(one_hot);
    add_features_with_options(df, &options).map(|(enriched, _)| enriched)
}

/// Appends the standard churn features and reports what ran.
pub fn add_features_with_options(
    df: &DataFrame,
    options: &FeatureOptions,
) -> Result<(DataFrame, FeatureReport)> {
    let span = info_span!("features", rows = df.height(), one_hot = options.one_hot);
    let _guard = span.enter();

    let (mut enriched, rules) = apply_rules(df, default_rules())?;
    let mut report = FeatureReport {
        rows: enriched.height(),
        rules,
        one_hot: None,
    };

    if options.one_hot {
        let (encoded, one_hot) = one_hot_encode(&enriched, &options.one_hot_exclude)?;
        enriched = encoded;
        report.one_hot = Some(one_hot);
    }

    info!(
        applied = report.applied().len(),
        skipped = report.skipped().len(),
        columns = enriched.width(),
        "built features"
    );

    Ok((enriched, report))
}

/// Runs each rule whose requirement is met against a copy of `df`.
///
/// Rules write distinct columns and never read each other's outputs, so the
/// order of `rules` does not affect the result.
pub fn apply_rules(
    df: &DataFrame,
    rules: &[FeatureRule],
) -> Result<(DataFrame, Vec<RuleOutcome>)> {
    let mut enriched = df.clone();
    let mut outcomes = Vec::with_capacity(rules.len());

    for rule in rules {
        let status = match rule.requires.unmet(df) {
            Some(missing) => {
                debug!(feature = rule.output, ?missing, "inputs absent, skipping rule");
                RuleStatus::Skipped { missing }
            }
            None => {
                apply_rule(&mut enriched, rule)?;
                debug!(feature = rule.output, "applied rule");
                RuleStatus::Applied
            }
        };
        outcomes.push(RuleOutcome {
            output: rule.output.to_string(),
            status,
        });
    }

    Ok((enriched, outcomes))
}
