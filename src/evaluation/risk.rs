//! # Risk Scoring
//!
//! Per-factor risk scores computed from parsed vitals. Each factor re-parses
//! the raw field it needs; the parser is pure so the factors are independent.
//! An unreadable vital contributes zero.

use super::parser::{parse_age, parse_blood_pressure, parse_temperature};
use crate::constants::thresholds::{
    DIASTOLIC_STAGE_1, DIASTOLIC_STAGE_2, FEVER, HIGH_FEVER, HIGH_RISK_TOTAL, MIDDLE_AGE,
    SENIOR_AGE, SYSTOLIC_ELEVATED_MAX, SYSTOLIC_ELEVATED_MIN, SYSTOLIC_STAGE_1, SYSTOLIC_STAGE_2,
};
use crate::models::{Patient, RiskScores};

/// Blood-pressure factor, first matching band wins:
///
/// | band      | rule                             | score |
/// |-----------|----------------------------------|-------|
/// | stage 2   | systolic >= 140 or diastolic >= 90 | 3   |
/// | stage 1   | systolic >= 130 or diastolic >= 80 | 2   |
/// | elevated  | systolic 120..=129 and diastolic < 80 | 1 |
/// | otherwise |                                  | 0     |
pub fn calculate_blood_pressure_risk(patient: &Patient) -> u32 {
    let Some((systolic, diastolic)) = parse_blood_pressure(patient.blood_pressure.as_ref()).values()
    else {
        return 0;
    };

    if systolic >= SYSTOLIC_STAGE_2 || diastolic >= DIASTOLIC_STAGE_2 {
        3
    } else if systolic >= SYSTOLIC_STAGE_1 || diastolic >= DIASTOLIC_STAGE_1 {
        2
    } else if (SYSTOLIC_ELEVATED_MIN..=SYSTOLIC_ELEVATED_MAX).contains(&systolic)
        && diastolic < DIASTOLIC_STAGE_1
    {
        1
    } else {
        0
    }
}

pub fn calculate_temperature_risk(patient: &Patient) -> u32 {
    match parse_temperature(patient.temperature.as_ref()) {
        Some(temp) if temp >= HIGH_FEVER => 2,
        Some(temp) if temp >= FEVER => 1,
        _ => 0,
    }
}

/// Age factor: over 65 scores 2, 40 through 65 scores 1
pub fn calculate_age_risk(patient: &Patient) -> u32 {
    match parse_age(patient.age.as_ref()) {
        Some(age) if age > SENIOR_AGE => 2,
        Some(age) if age >= MIDDLE_AGE => 1,
        _ => 0,
    }
}

pub fn calculate_risk_scores(patient: &Patient) -> RiskScores {
    RiskScores::new(
        calculate_blood_pressure_risk(patient),
        calculate_temperature_risk(patient),
        calculate_age_risk(patient),
    )
}

/// Total risk of at least 4
pub fn is_high_risk(patient: &Patient) -> bool {
    calculate_risk_scores(patient).total >= HIGH_RISK_TOTAL
}

/// Parsed temperature of at least 99.6, read directly rather than from the
/// temperature score
pub fn has_fever(patient: &Patient) -> bool {
    parse_temperature(patient.temperature.as_ref()).is_some_and(|temp| temp >= FEVER)
}
