//! # Triage Error Types
//!
//! Unified error handling for the fetch, classify, and submit pipeline.
//!
//! Malformed patient fields are never errors: the field parser downgrades them
//! to absent values. Everything in this module describes a failure that aborts
//! the whole pipeline invocation.

use thiserror::Error;

use crate::client::transport::TransportError;

/// Pipeline operation result type
pub type Result<T> = std::result::Result<T, TriageError>;

/// Errors surfaced by the fetcher, submitter, and orchestrator
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("{operation}: Max retries exceeded after {attempts} attempts")]
    MaxRetriesExceeded { operation: String, attempts: u32 },

    #[error("Invalid response from {operation}: {reason}")]
    InvalidResponse { operation: String, reason: String },

    #[error("JSON serialization/deserialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TriageError {
    /// Create an API error from a non-success HTTP status
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an invalid response error for bodies that cannot be decoded
    pub fn invalid_response(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Check if error is recoverable (worth re-running the pipeline later)
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            TriageError::Transport(_) => true,
            TriageError::MaxRetriesExceeded { .. } => true,
            TriageError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<config::ConfigError> for TriageError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
