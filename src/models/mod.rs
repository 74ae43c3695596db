//! # Data Models
//!
//! Wire and domain types for the triage pipeline:
//!
//! - [`patient`] - loosely-typed patient records and identifier resolution
//! - [`pagination`] - the paginated listing response
//! - [`assessment`] - risk scores, category sets, submission payload, results

pub mod assessment;
pub mod pagination;
pub mod patient;

pub use assessment::{
    AssessmentResult, PatientAssessment, PatientCategories, PipelineOutcome,
    PipelineStats, RiskScores, SubmissionPayload,
};
pub use pagination::{PaginatedResponse, PaginationInfo, ResponseMetadata};
pub use patient::{Patient, RawField};
