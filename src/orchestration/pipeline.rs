//! # Assessment Pipeline
//!
//! Fetch, classify, submit. Any stage failure aborts the run and is returned
//! unchanged; a failed run exposes no partial categories.

use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::classifier::categorize_patients;
use crate::client::{AssessmentSubmitter, PatientFetcher, ReqwestTransport, Transport};
use crate::config::TriageConfig;
use crate::error::Result;
use crate::logging::{log_error, log_pipeline_operation};
use crate::models::{PipelineOutcome, PipelineStats, SubmissionPayload};

pub struct AssessmentPipeline<T: Transport> {
    fetcher: PatientFetcher<T>,
    submitter: AssessmentSubmitter<T>,
}

impl<T: Transport> std::fmt::Debug for AssessmentPipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentPipeline")
            .field("fetcher", &self.fetcher)
            .field("submitter", &self.submitter)
            .finish()
    }
}

impl AssessmentPipeline<ReqwestTransport> {
    /// Build a pipeline that talks to the configured remote API
    pub fn from_config(config: &TriageConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.api)?);
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> AssessmentPipeline<T> {
    pub fn new(transport: Arc<T>, config: &TriageConfig) -> Self {
        Self {
            fetcher: PatientFetcher::new(Arc::clone(&transport), config),
            submitter: AssessmentSubmitter::new(transport, config),
        }
    }

    /// Run the whole pipeline once
    #[instrument(skip(self), fields(run_id = %Uuid::new_v4()))]
    pub async fn process_and_submit_assessment(&self) -> Result<PipelineOutcome> {
        let patients = self
            .fetcher
            .fetch_all_patients()
            .await
            .inspect_err(|e| log_error("pipeline", "fetch", &e.to_string(), None))?;
        log_pipeline_operation("assessment", "fetch", "completed", Some(patients.len()), None);

        let categories = categorize_patients(&patients);
        log_pipeline_operation(
            "assessment",
            "classify",
            "completed",
            Some(patients.len()),
            None,
        );

        let payload = SubmissionPayload::from(&categories);
        let assessment_result = self
            .submitter
            .submit_assessment(&payload)
            .await
            .inspect_err(|e| log_error("pipeline", "submit", &e.to_string(), None))?;
        log_pipeline_operation("assessment", "submit", "completed", None, None);

        let stats = PipelineStats::from_run(patients.len(), &categories);
        info!(
            total_patients = stats.total_patients,
            high_risk = stats.high_risk_count,
            fever = stats.fever_count,
            data_quality = stats.data_quality_issues_count,
            "Assessment pipeline finished"
        );

        Ok(PipelineOutcome {
            categories,
            assessment_result,
            stats,
        })
    }
}
