//! # Resilience Module
//!
//! Retry discipline for every outbound request to the assessment API:
//! rate-limit handling, transient server error retries, network failure
//! retries, and per-attempt timeouts, all bounded by one retry budget.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use patient_triage::client::transport::{ApiRequest, ReqwestTransport, Transport};
//! use patient_triage::config::TriageConfig;
//! use patient_triage::resilience::RetryPolicy;
//! use std::time::Duration;
//!
//! # async fn example() -> patient_triage::Result<()> {
//! let config = TriageConfig::default();
//! let transport = ReqwestTransport::new(&config.api)?;
//! let policy = RetryPolicy::new(3, Duration::from_millis(1000));
//!
//! let request = ApiRequest::get("/patients").with_query("page", 1);
//! let response = policy
//!     .execute(&request.describe(), || transport.send(&request))
//!     .await?;
//! println!("status {}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod retry;

pub use retry::{AttemptOutcome, RetryPolicy};
