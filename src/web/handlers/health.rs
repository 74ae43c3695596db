//! # Health Check Handlers

use axum::Json;
use serde::{Deserialize, Serialize};

/// Basic health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Basic health check endpoint: GET /health
///
/// Returns OK whenever the process is serving; it does not probe the remote API.
pub async fn basic_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
