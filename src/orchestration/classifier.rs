//! # Classifier
//!
//! Drives the fetched patient list through the evaluator and collects the
//! three category sets. The sets are independent: one patient may land in any
//! combination of them. Ids keep first-encounter order and are not
//! deduplicated.

use tracing::debug;

use crate::constants::thresholds::HIGH_RISK_TOTAL;
use crate::evaluation::{calculate_risk_scores, has_data_quality_issue, has_fever, ParsedVitals};
use crate::models::{Patient, PatientAssessment, PatientCategories};

/// Evaluate one patient, or `None` if it has no usable identifier
pub fn assess_patient(patient: &Patient) -> Option<PatientAssessment> {
    let patient_id = patient.identifier()?;
    let scores = calculate_risk_scores(patient);
    let assessment = PatientAssessment {
        patient_id: patient_id.to_string(),
        scores,
        data_quality_issue: has_data_quality_issue(patient),
        high_risk: scores.total >= HIGH_RISK_TOTAL,
        fever: has_fever(patient),
    };

    debug!(
        patient_id,
        vitals = ?ParsedVitals::from_patient(patient),
        total = scores.total,
        high_risk = assessment.high_risk,
        fever = assessment.fever,
        data_quality = assessment.data_quality_issue,
        "Assessed patient"
    );

    Some(assessment)
}

/// Single pass over `patients`, skipping records without an identifier
pub fn categorize_patients(patients: &[Patient]) -> PatientCategories {
    let mut categories = PatientCategories::default();
    let mut skipped = 0usize;

    for patient in patients {
        let Some(assessment) = assess_patient(patient) else {
            skipped += 1;
            continue;
        };

        if assessment.high_risk {
            categories
                .high_risk_patients
                .push(assessment.patient_id.clone());
        }
        if assessment.fever {
            categories.fever_patients.push(assessment.patient_id.clone());
        }
        if assessment.data_quality_issue {
            categories.data_quality_issues.push(assessment.patient_id);
        }
    }

    debug!(
        patients = patients.len(),
        skipped,
        high_risk = categories.high_risk_patients.len(),
        fever = categories.fever_patients.len(),
        data_quality = categories.data_quality_issues.len(),
        "Categorized patients"
    );

    categories
}
