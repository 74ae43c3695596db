//! # Web API Response Types
//!
//! Response bodies for the submission trigger and the error conversion that
//! turns a failed pipeline run into an HTTP 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::error::TriageError;
use crate::models::{AssessmentResult, PipelineOutcome, PipelineStats, SubmissionPayload};

/// Successful submission run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub submission: SubmissionPayload,
    pub assessment_result: AssessmentResult,
    pub stats: PipelineStats,
}

impl From<PipelineOutcome> for SubmissionResponse {
    fn from(outcome: PipelineOutcome) -> Self {
        Self {
            success: true,
            submission: SubmissionPayload::from(&outcome.categories),
            assessment_result: outcome.assessment_result,
            stats: outcome.stats,
        }
    }
}

/// Web API errors with HTTP status code mappings
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] TriageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": self.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
