//! # System Constants
//!
//! Endpoint paths, header names, and the clinical thresholds that drive
//! data-quality and risk classification.

/// Remote assessment API endpoints, relative to the configured base URL
pub mod endpoints {
    pub const PATIENTS: &str = "/patients";
    pub const SUBMIT_ASSESSMENT: &str = "/submit-assessment";
}

/// HTTP header names used on outbound requests and read from responses
pub mod headers {
    pub const API_KEY: &str = "x-api-key";
    pub const RETRY_AFTER: &str = "retry-after";
}

/// HTTP status codes the retry policy treats specially
pub mod status {
    pub const TOO_MANY_REQUESTS: u16 = 429;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
    pub const SERVICE_UNAVAILABLE: u16 = 503;

    /// Server errors that are retried while attempts remain
    pub const TRANSIENT_SERVER_ERRORS: &[u16] = &[INTERNAL_SERVER_ERROR, SERVICE_UNAVAILABLE];
}

/// Blood pressure values the source uses to mean "no reading"
pub const BLOOD_PRESSURE_SENTINELS: &[&str] = &["N/A", "INVALID"];

/// Vitals thresholds for risk scoring
pub mod thresholds {
    /// Stage 2 hypertension: systolic at or above
    pub const SYSTOLIC_STAGE_2: f64 = 140.0;
    /// Stage 2 hypertension: diastolic at or above
    pub const DIASTOLIC_STAGE_2: f64 = 90.0;
    /// Stage 1 hypertension: systolic at or above
    pub const SYSTOLIC_STAGE_1: f64 = 130.0;
    /// Stage 1 hypertension: diastolic at or above
    pub const DIASTOLIC_STAGE_1: f64 = 80.0;
    /// Elevated: systolic lower bound (inclusive)
    pub const SYSTOLIC_ELEVATED_MIN: f64 = 120.0;
    /// Elevated: systolic upper bound (inclusive)
    pub const SYSTOLIC_ELEVATED_MAX: f64 = 129.0;

    /// Fever, in degrees Fahrenheit (inclusive)
    pub const FEVER: f64 = 99.6;
    /// High fever, in degrees Fahrenheit (inclusive)
    pub const HIGH_FEVER: f64 = 101.0;

    /// Age strictly above which the age factor is 2
    pub const SENIOR_AGE: f64 = 65.0;
    /// Age at or above which the age factor is at least 1
    pub const MIDDLE_AGE: f64 = 40.0;

    /// Total risk score at or above which a patient is high risk
    pub const HIGH_RISK_TOTAL: u32 = 4;
}
