//! # Assessment Submitter
//!
//! Posts the three category lists to the scoring endpoint and hands back the
//! decoded response without interpreting it.

use std::sync::Arc;
use tracing::{info, instrument};

use super::transport::{ApiRequest, Transport};
use crate::config::TriageConfig;
use crate::constants::endpoints;
use crate::error::{Result, TriageError};
use crate::models::{AssessmentResult, SubmissionPayload};
use crate::resilience::RetryPolicy;

pub struct AssessmentSubmitter<T: Transport> {
    transport: Arc<T>,
    retry: RetryPolicy,
}

impl<T: Transport> std::fmt::Debug for AssessmentSubmitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentSubmitter")
            .field("retry", &self.retry)
            .finish()
    }
}

impl<T: Transport> AssessmentSubmitter<T> {
    pub fn new(transport: Arc<T>, config: &TriageConfig) -> Self {
        Self {
            transport,
            retry: config.retry.policy(),
        }
    }

    #[instrument(skip_all, fields(
        high_risk = payload.high_risk_patients.len(),
        fever = payload.fever_patients.len(),
        data_quality = payload.data_quality_issues.len(),
    ))]
    pub async fn submit_assessment(&self, payload: &SubmissionPayload) -> Result<AssessmentResult> {
        let request = ApiRequest::post_json(
            endpoints::SUBMIT_ASSESSMENT,
            serde_json::to_value(payload)?,
        );
        let operation = request.describe();

        let response = self
            .retry
            .execute(&operation, || self.transport.send(&request))
            .await?;

        if !response.is_success() {
            return Err(TriageError::api_error(
                response.status,
                format!("Failed to submit assessment: {}", response.status_text()),
            ));
        }

        let result: AssessmentResult = response
            .json()
            .map_err(|e| TriageError::invalid_response(operation, e.to_string()))?;

        info!(
            success = result.success(),
            score = ?result.score(),
            "Assessment submitted"
        );

        Ok(result)
    }
}
