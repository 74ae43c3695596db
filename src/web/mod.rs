//! # Web API
//!
//! Thin HTTP surface over the pipeline:
//!
//! - `POST /api/submission` - run fetch, classify, submit once
//! - `GET /health` - liveness

pub mod handlers;
pub mod response_types;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::client::Transport;
use crate::config::TriageConfig;

pub use response_types::{ApiError, SubmissionResponse};
pub use state::AppState;

/// Build the application router
pub fn router<T: Transport + 'static>(state: AppState<T>) -> Router {
    Router::new()
        .route(
            "/api/submission",
            post(handlers::submission::run_submission::<T>),
        )
        .route("/health", get(handlers::health::basic_health))
        .with_state(state)
}

/// Bind `bind_address` and serve until Ctrl-C
pub async fn serve(config: &TriageConfig, bind_address: &str) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!(addr = %listener.local_addr()?, "Triage web server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Triage web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
