//! # Submission Trigger
//!
//! `POST /api/submission` runs the pipeline once and reports the outcome.

use axum::extract::State;
use axum::Json;
use tracing::{error, info};

use crate::client::Transport;
use crate::web::response_types::{ApiError, SubmissionResponse};
use crate::web::state::AppState;

pub async fn run_submission<T: Transport + 'static>(
    State(state): State<AppState<T>>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    info!("Submission run requested");

    match state.pipeline.process_and_submit_assessment().await {
        Ok(outcome) => Ok(Json(SubmissionResponse::from(outcome))),
        Err(e) => {
            error!(error = %e, recoverable = e.is_recoverable(), "Submission run failed");
            Err(ApiError::from(e))
        }
    }
}
