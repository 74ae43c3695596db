//! # Orchestration
//!
//! Composes the fetcher, classifier, and submitter into one pipeline run.
//!
//! - [`classifier`] - turns a patient list into the three category sets
//! - [`pipeline`] - [`AssessmentPipeline`], the single public entry point

pub mod classifier;
pub mod pipeline;

pub use classifier::{assess_patient, categorize_patients};
pub use pipeline::AssessmentPipeline;
