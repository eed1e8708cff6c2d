//! Column names recognized by the pipeline.
//!
//! Every other column in the source file is passed through unmodified.

/// Customer identifier, dropped during cleaning.
pub const CUSTOMER_ID: &str = "customerID";
pub const TOTAL_CHARGES: &str = "TotalCharges";
pub const TENURE: &str = "tenure";
pub const CHURN: &str = "Churn";
pub const INTERNET_SERVICE: &str = "InternetService";
pub const PAYMENT_METHOD: &str = "PaymentMethod";
pub const PAPERLESS_BILLING: &str = "PaperlessBilling";

/// Service subscription columns counted by `num_services`.
pub const SERVICE_COLUMNS: [&str; 9] = [
    "PhoneService",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
];

// Derived columns
pub const NUM_SERVICES: &str = "num_services";
pub const TENURE_BUCKET: &str = "tenure_bucket";
pub const CHARGES_PER_MONTH_LIFETIME: &str = "charges_per_month_lifetime";
pub const HAS_FIBER_OPTIC: &str = "has_fiber_optic";
pub const IS_ELECTRONIC_CHECK: &str = "is_electronic_check";
pub const IS_PAPERLESS: &str = "is_paperless";
