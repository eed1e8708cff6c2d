//! Integration tests for the churn feature builder.

use churn_features::{
    FeatureError, FeatureOptions, RuleStatus, add_features, add_features_with_options,
};
use polars::prelude::*;
use proptest::prelude::*;

fn fiber_customer_row() -> DataFrame {
    DataFrame::new(vec![
        Column::new("tenure".into(), vec![5i64]),
        Column::new("InternetService".into(), vec!["Fiber optic"]),
        Column::new("PaymentMethod".into(), vec!["Electronic check"]),
        Column::new("PaperlessBilling".into(), vec!["Yes"]),
        Column::new("TotalCharges".into(), vec!["29.85"]),
        Column::new("PhoneService".into(), vec!["Yes"]),
    ])
    .unwrap()
}

fn i64_at(df: &DataFrame, name: &str, idx: usize) -> Option<i64> {
    df.column(name).unwrap().i64().unwrap().get(idx)
}

#[test]
fn test_fiber_customer_gets_every_feature() {
    let df = add_features(&fiber_customer_row(), false).unwrap();

    let bucket = df.column("tenure_bucket").unwrap().str().unwrap();
    assert_eq!(bucket.get(0), Some("0-1y"));
    assert_eq!(i64_at(&df, "has_fiber_optic", 0), Some(1));
    assert_eq!(i64_at(&df, "is_electronic_check", 0), Some(1));
    assert_eq!(i64_at(&df, "is_paperless", 0), Some(1));
    assert_eq!(i64_at(&df, "num_services", 0), Some(1));

    let ratio = df
        .column("charges_per_month_lifetime")
        .unwrap()
        .f64()
        .unwrap()
        .get(0)
        .unwrap();
    assert!((ratio - 5.97).abs() < 1e-9);
}

#[test]
fn test_input_columns_are_retained_unmodified() {
    let input = fiber_customer_row();
    let df = add_features(&input, false).unwrap();

    assert_eq!(df.width(), input.width() + 6);
    for column in input.get_columns() {
        let retained = df.column(column.name()).unwrap();
        assert!(
            retained
                .as_materialized_series()
                .equals_missing(column.as_materialized_series())
        );
    }
    // The caller's table is untouched.
    assert_eq!(input.width(), 6);
}

#[test]
fn test_absent_inputs_skip_rules() {
    let df = DataFrame::new(vec![Column::new("tenure".into(), vec![0i64, 13])]).unwrap();
    let (enriched, report) = add_features_with_options(&df, &FeatureOptions::default()).unwrap();

    assert_eq!(report.applied(), vec!["tenure_bucket"]);
    assert_eq!(report.skipped().len(), 5);
    assert!(enriched.column("num_services").is_err());
    assert!(enriched.column("charges_per_month_lifetime").is_err());

    let bucket = enriched.column("tenure_bucket").unwrap().str().unwrap();
    assert_eq!(bucket.get(0), None);
    assert_eq!(bucket.get(1), Some("1-2y"));

    let charges_rule = report
        .rules
        .iter()
        .find(|r| r.output == "charges_per_month_lifetime")
        .unwrap();
    assert_eq!(
        charges_rule.status,
        RuleStatus::Skipped {
            missing: vec!["TotalCharges".to_string()]
        }
    );
}

#[test]
fn test_raw_blank_total_charges_yield_null_ratio() {
    let df = DataFrame::new(vec![
        Column::new("tenure".into(), vec![0i64, 2]),
        Column::new("TotalCharges".into(), vec![" ", "108.15"]),
    ])
    .unwrap();
    let enriched = add_features(&df, false).unwrap();

    let ratio = enriched
        .column("charges_per_month_lifetime")
        .unwrap()
        .f64()
        .unwrap();
    assert_eq!(ratio.get(0), None);
    assert_eq!(ratio.get(1), Some(108.15 / 2.0));
}

#[test]
fn test_non_numeric_tenure_is_type_mismatch() {
    let df = DataFrame::new(vec![Column::new("tenure".into(), vec!["five"])]).unwrap();
    let result = add_features(&df, false);

    assert!(matches!(
        result,
        Err(FeatureError::TypeMismatch { ref column, expected: "numeric", .. }) if column == "tenure"
    ));
}

#[test]
fn test_numeric_flag_source_is_type_mismatch() {
    let df = DataFrame::new(vec![Column::new("PaymentMethod".into(), vec![1i64])]).unwrap();
    let result = add_features(&df, false);

    assert!(matches!(
        result,
        Err(FeatureError::TypeMismatch { expected: "string", .. })
    ));
}

#[test]
fn test_one_hot_contract_adds_two_indicators() {
    let df = DataFrame::new(vec![Column::new(
        "Contract".into(),
        vec!["Month-to-month", "One year", "Two year"],
    )])
    .unwrap();
    let (enriched, report) =
        add_features_with_options(&df, &FeatureOptions::default().with_one_hot(true)).unwrap();

    assert!(enriched.column("Contract").is_err());
    assert_eq!(enriched.width(), 2);
    assert_eq!(report.one_hot.unwrap().indicator_count(), 2);
    assert_eq!(i64_at(&enriched, "Contract_One year", 1), Some(1));
    assert_eq!(i64_at(&enriched, "Contract_Two year", 2), Some(1));
}

#[test]
fn test_one_hot_twice_reports_indicator_collision() {
    let df = DataFrame::new(vec![
        Column::new("tenure".into(), vec![5i64, 30]),
        Column::new("Contract".into(), vec!["Month-to-month", "One year"]),
    ])
    .unwrap();
    let once = add_features(&df, true).unwrap();
    // tenure_bucket is rebuilt from tenure and clashes with its own indicators.
    let result = add_features(&once, true);

    assert!(matches!(
        result,
        Err(FeatureError::IndicatorCollision { ref indicator, .. }) if indicator == "tenure_bucket_2-4y"
    ));
}

#[test]
fn test_one_hot_column_order_is_deterministic() {
    let df = DataFrame::new(vec![
        Column::new("customerID".into(), vec!["A", "B", "C"]),
        Column::new("gender".into(), vec!["Female", "Male", "Female"]),
        Column::new("tenure".into(), vec![5i64, 30, 80]),
        Column::new(
            "Contract".into(),
            vec!["Month-to-month", "One year", "Two year"],
        ),
        Column::new("PaperlessBilling".into(), vec!["Yes", "No", "Yes"]),
    ])
    .unwrap();
    let enriched = add_features(&df, true).unwrap();

    let names: Vec<&str> = enriched
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();
    insta::assert_snapshot!(
        names.join(", "),
        @"customerID, tenure, is_paperless, Contract_One year, Contract_Two year, PaperlessBilling_Yes, gender_Male, tenure_bucket_2-4y, tenure_bucket_6y+"
    );
}

fn churn_table(rows: &[(Option<i64>, Option<f64>, &str, &str, &str)]) -> DataFrame {
    DataFrame::new(vec![
        Column::new(
            "tenure".into(),
            rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        ),
        Column::new(
            "TotalCharges".into(),
            rows.iter().map(|r| r.1).collect::<Vec<_>>(),
        ),
        Column::new(
            "InternetService".into(),
            rows.iter().map(|r| r.2).collect::<Vec<_>>(),
        ),
        Column::new(
            "PaymentMethod".into(),
            rows.iter().map(|r| r.3).collect::<Vec<_>>(),
        ),
        Column::new(
            "PaperlessBilling".into(),
            rows.iter().map(|r| r.4).collect::<Vec<_>>(),
        ),
    ])
    .unwrap()
}

fn row_strategy() -> impl Strategy<Value = (Option<i64>, Option<f64>, &'static str, &'static str, &'static str)>
{
    (
        prop::option::of(0i64..100),
        prop::option::of(0.0f64..9000.0),
        prop::sample::select(vec!["DSL", "Fiber optic", "No"]),
        prop::sample::select(vec![
            "Electronic check",
            "Mailed check",
            "Bank transfer (automatic)",
            "Credit card (automatic)",
        ]),
        prop::sample::select(vec!["Yes", "No"]),
    )
}

const FLAGS: [&str; 3] = ["has_fiber_optic", "is_electronic_check", "is_paperless"];

proptest! {
    #[test]
    fn test_add_features_preserves_row_count(
        rows in prop::collection::vec(row_strategy(), 0..30),
        one_hot in any::<bool>(),
    ) {
        let df = churn_table(&rows);
        let enriched = add_features(&df, one_hot).unwrap();
        prop_assert_eq!(enriched.height(), df.height());
    }

    #[test]
    fn test_flags_are_idempotent(
        rows in prop::collection::vec(row_strategy(), 1..30),
    ) {
        let once = add_features(&churn_table(&rows), false).unwrap();
        let twice = add_features(&once, false).unwrap();
        for flag in FLAGS {
            let first = once.column(flag).unwrap().as_materialized_series();
            let second = twice.column(flag).unwrap().as_materialized_series();
            prop_assert!(first.equals_missing(second));
        }
    }
}
