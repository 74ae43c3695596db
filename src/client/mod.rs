//! # Assessment API Client
//!
//! Outbound side of the pipeline. Every request goes through a [`Transport`]
//! under the shared [`RetryPolicy`](crate::resilience::RetryPolicy).
//!
//! - [`transport`] - request/response types and the `reqwest` transport
//! - [`fetcher`] - walks every page of the patient collection
//! - [`submitter`] - posts the category lists to the scoring endpoint

pub mod fetcher;
pub mod submitter;
pub mod transport;

pub use fetcher::PatientFetcher;
pub use submitter::AssessmentSubmitter;
pub use transport::{
    ApiRequest, ApiResponse, HttpMethod, ReqwestTransport, Transport, TransportError,
};
