//! # Assessment Types
//!
//! Risk scores, category sets, the submission payload, the scoring service's
//! result, and the pipeline's aggregate output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-factor and total risk scores for one patient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScores {
    pub blood_pressure: u32,
    pub temperature: u32,
    pub age: u32,
    pub total: u32,
}

impl RiskScores {
    pub fn new(blood_pressure: u32, temperature: u32, age: u32) -> Self {
        Self {
            blood_pressure,
            temperature,
            age,
            total: blood_pressure + temperature + age,
        }
    }
}

/// Verdict for one identifiable patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientAssessment {
    pub patient_id: String,
    pub scores: RiskScores,
    pub data_quality_issue: bool,
    pub high_risk: bool,
    pub fever: bool,
}

/// The three independent id sets, each in first-encounter order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCategories {
    pub high_risk_patients: Vec<String>,
    pub fever_patients: Vec<String>,
    pub data_quality_issues: Vec<String>,
}

/// Body posted to the scoring endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub high_risk_patients: Vec<String>,
    pub fever_patients: Vec<String>,
    pub data_quality_issues: Vec<String>,
}

impl From<&PatientCategories> for SubmissionPayload {
    fn from(categories: &PatientCategories) -> Self {
        Self {
            high_risk_patients: categories.high_risk_patients.clone(),
            fever_patients: categories.fever_patients.clone(),
            data_quality_issues: categories.data_quality_issues.clone(),
        }
    }
}

/// Scoring service response, passed through without interpretation
///
/// The decoded body is stored as-is, whatever its shape, so re-serializing
/// reproduces exactly what the service sent. The accessors only read from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentResult(Value);

impl Default for AssessmentResult {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl From<Value> for AssessmentResult {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl AssessmentResult {
    /// Top-level `success` flag; anything other than JSON `true` reads as false
    pub fn success(&self) -> bool {
        self.0.get("success").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// Overall score reported by the service, if any
    pub fn score(&self) -> Option<f64> {
        self.0
            .get("results")
            .and_then(|results| results.get("score"))
            .and_then(Value::as_f64)
    }

    /// Look up any top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Summary counts for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    /// Every fetched record, including ones skipped for lack of an identifier
    pub total_patients: usize,
    pub high_risk_count: usize,
    pub fever_count: usize,
    pub data_quality_issues_count: usize,
}

impl PipelineStats {
    pub fn from_run(total_patients: usize, categories: &PatientCategories) -> Self {
        Self {
            total_patients,
            high_risk_count: categories.high_risk_patients.len(),
            fever_count: categories.fever_patients.len(),
            data_quality_issues_count: categories.data_quality_issues.len(),
        }
    }
}

/// Everything a successful pipeline run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutcome {
    pub categories: PatientCategories,
    pub assessment_result: AssessmentResult,
    pub stats: PipelineStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_risk_scores_total_and_wire_names() {
        let scores = RiskScores::new(3, 1, 2);
        assert_eq!(scores.total, 6);
        assert_eq!(
            serde_json::to_value(scores).unwrap(),
            json!({"bloodPressure": 3, "temperature": 1, "age": 2, "total": 6})
        );
    }

    #[test]
    fn test_submission_payload_keys() {
        let categories = PatientCategories {
            high_risk_patients: vec!["DEMO002".into()],
            fever_patients: vec!["DEMO005".into()],
            data_quality_issues: vec!["DEMO004".into(), "DEMO007".into()],
        };
        let payload = SubmissionPayload::from(&categories);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "high_risk_patients": ["DEMO002"],
                "fever_patients": ["DEMO005"],
                "data_quality_issues": ["DEMO004", "DEMO007"]
            })
        );
    }

    #[test]
    fn test_assessment_result_passes_through_unknown_fields() {
        let body = json!({
            "success": true,
            "message": "Assessment submitted successfully",
            "results": {
                "score": 91.94,
                "percentage": 92,
                "status": "PASS",
                "breakdown": {
                    "high_risk": {"score": 48, "max": 50, "correct": 20, "submitted": 21, "matches": 20},
                    "fever": {"score": 19, "max": 25}
                },
                "attempt_number": 1
            },
            "remaining_attempts": 2
        });

        let result: AssessmentResult = serde_json::from_value(body.clone()).unwrap();
        assert!(result.success());
        assert_eq!(result.message(), Some("Assessment submitted successfully"));
        assert_eq!(result.score(), Some(91.94));
        assert_eq!(result.get("remaining_attempts"), Some(&json!(2)));

        assert_eq!(serde_json::to_value(&result).unwrap(), body);
    }

    #[test]
    fn test_assessment_result_keeps_nulls_and_odd_types() {
        let body = json!({"success": true, "message": null, "results": null, "extra": 1});
        let result: AssessmentResult = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), body);
        assert_eq!(result.message(), None);
        assert_eq!(result.score(), None);

        let body = json!({"success": "true", "score": 90, "results": [1, 2]});
        let result: AssessmentResult = serde_json::from_value(body.clone()).unwrap();
        assert!(!result.success());
        assert_eq!(result.score(), None);
        assert_eq!(result.into_value(), body);

        let body = json!(["not", "an", "object"]);
        let result: AssessmentResult = serde_json::from_value(body.clone()).unwrap();
        assert!(!result.success());
        assert_eq!(result.as_value(), &body);
    }

    #[test]
    fn test_stats_from_run() {
        let categories = PatientCategories {
            high_risk_patients: vec!["a".into(), "b".into()],
            fever_patients: vec![],
            data_quality_issues: vec!["c".into()],
        };
        let stats = PipelineStats::from_run(5, &categories);
        assert_eq!(
            serde_json::to_value(stats).unwrap(),
            json!({
                "totalPatients": 5,
                "highRiskCount": 2,
                "feverCount": 0,
                "dataQualityIssuesCount": 1
            })
        );
    }
}
