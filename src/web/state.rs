//! # Web API Application State
//!
//! Shared state handed to every handler: the pipeline, behind an `Arc`.

use std::sync::Arc;

use crate::client::{ReqwestTransport, Transport};
use crate::config::TriageConfig;
use crate::error::Result;
use crate::orchestration::AssessmentPipeline;

pub struct AppState<T: Transport = ReqwestTransport> {
    pub pipeline: Arc<AssessmentPipeline<T>>,
}

// Manual impl: cloning the Arc never requires `T: Clone`
impl<T: Transport> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

impl<T: Transport> AppState<T> {
    pub fn new(pipeline: AssessmentPipeline<T>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

impl AppState<ReqwestTransport> {
    /// State wired to the configured remote API
    pub fn from_config(config: &TriageConfig) -> Result<Self> {
        Ok(Self::new(AssessmentPipeline::from_config(config)?))
    }
}
