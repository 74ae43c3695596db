//! # Quality & Risk Evaluation
//!
//! Pure functions over a single patient record:
//!
//! - [`parser`] - turns raw vitals into optional numbers
//! - [`quality`] - flags records whose vitals cannot be read
//! - [`risk`] - per-factor and total risk scores, high-risk and fever checks
//!
//! ```rust
//! use patient_triage::evaluation::{calculate_risk_scores, has_data_quality_issue, has_fever};
//! use patient_triage::models::Patient;
//! use serde_json::json;
//!
//! let patient = Patient::from_value(json!({
//!     "patient_id": "DEMO001",
//!     "age": 70,
//!     "blood_pressure": "145/92",
//!     "temperature": "100.1"
//! }));
//!
//! assert!(!has_data_quality_issue(&patient));
//! assert!(has_fever(&patient));
//! assert_eq!(calculate_risk_scores(&patient).total, 6);
//! ```

pub mod parser;
pub mod quality;
pub mod risk;

pub use parser::{
    parse_age, parse_blood_pressure, parse_decimal_prefix, parse_temperature,
    BloodPressureReading,
};
pub use quality::has_data_quality_issue;
pub use risk::{
    calculate_age_risk, calculate_blood_pressure_risk, calculate_risk_scores,
    calculate_temperature_risk, has_fever, is_high_risk,
};

use crate::models::Patient;

/// All three vitals of one record, parsed once
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParsedVitals {
    pub blood_pressure: BloodPressureReading,
    pub temperature: Option<f64>,
    pub age: Option<f64>,
}

impl ParsedVitals {
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            blood_pressure: parse_blood_pressure(patient.blood_pressure.as_ref()),
            temperature: parse_temperature(patient.temperature.as_ref()),
            age: parse_age(patient.age.as_ref()),
        }
    }

    /// Every vital readable
    pub fn is_complete(&self) -> bool {
        self.blood_pressure.is_complete() && self.temperature.is_some() && self.age.is_some()
    }
}
