#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Patient Triage
//!
//! Risk triage pipeline over a remote, paginated patient collection.
//!
//! ## Overview
//!
//! A run fetches every patient page with rate-limit aware retries, scores each
//! record for data quality and clinical risk, and submits three id lists
//! (high risk, fever, data-quality issue) to a scoring endpoint.
//!
//! ## Architecture
//!
//! Leaf first:
//!
//! - **Field Parser** ([`evaluation::parser`]): raw vitals to optional numbers
//! - **Quality & Risk Evaluator** ([`evaluation`]): pure per-patient checks
//! - **Retry Policy** ([`resilience`]): shared by every outbound request
//! - **Paginated Fetcher** ([`client::fetcher`]): the whole collection, in order
//! - **Classifier** ([`orchestration::classifier`]): the three category sets
//! - **Submitter** ([`client::submitter`]): posts the category sets
//! - **Pipeline** ([`orchestration::pipeline`]): fetch, classify, submit
//!
//! ## Module Organization
//!
//! - [`config`] - Layered configuration (defaults, TOML, environment)
//! - [`constants`] - Endpoints, header names, clinical thresholds
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//! - [`models`] - Patient, pagination, and assessment types
//! - [`web`] - HTTP trigger for a pipeline run
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use patient_triage::config::TriageConfig;
//! use patient_triage::orchestration::AssessmentPipeline;
//!
//! # async fn example() -> patient_triage::Result<()> {
//! let config = TriageConfig::load(None)?;
//! let pipeline = AssessmentPipeline::from_config(&config)?;
//!
//! let outcome = pipeline.process_and_submit_assessment().await?;
//! println!(
//!     "{} patients, {} high risk",
//!     outcome.stats.total_patients, outcome.stats.high_risk_count
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Outbound HTTP sits behind the [`client::Transport`] trait, so the retry,
//! pagination, and pipeline behaviour is tested against scripted responses
//! under paused tokio time.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod resilience;
pub mod web;

pub use client::{ApiRequest, ApiResponse, ReqwestTransport, Transport, TransportError};
pub use config::TriageConfig;
pub use error::{Result, TriageError};
pub use models::{PatientCategories, PipelineOutcome, PipelineStats, SubmissionPayload};
pub use orchestration::AssessmentPipeline;
pub use resilience::RetryPolicy;
