//! Data-quality check: a record has an issue when any vital fails to parse.

use super::parser::{parse_age, parse_blood_pressure, parse_temperature};
use crate::models::Patient;

/// True iff blood pressure, temperature, or age is unreadable
///
/// This is a parse check, not a range check: an age of 200 is readable.
pub fn has_data_quality_issue(patient: &Patient) -> bool {
    !parse_blood_pressure(patient.blood_pressure.as_ref()).is_complete()
        || parse_temperature(patient.temperature.as_ref()).is_none()
        || parse_age(patient.age.as_ref()).is_none()
}
