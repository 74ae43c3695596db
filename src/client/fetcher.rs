//! # Paginated Fetcher
//!
//! Retrieves the entire patient collection, one page at a time, in page order.
//!
//! Pages are requested strictly sequentially starting at page 1 with the
//! source's maximum page size. Fetching stops after the first of:
//!
//! 1. a page with no records
//! 2. the echoed page number reaching a known (positive) total page count
//! 3. with no known total, a page whose `hasNext` is false or absent
//!
//! A fixed courtesy delay separates successive page requests. Any page that
//! ends in an error discards everything accumulated so far.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::transport::{ApiRequest, Transport};
use crate::config::TriageConfig;
use crate::constants::endpoints;
use crate::error::{Result, TriageError};
use crate::models::{PaginatedResponse, Patient};
use crate::resilience::RetryPolicy;

pub struct PatientFetcher<T: Transport> {
    transport: Arc<T>,
    retry: RetryPolicy,
    page_limit: u32,
    page_delay: Duration,
}

impl<T: Transport> std::fmt::Debug for PatientFetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientFetcher")
            .field("retry", &self.retry)
            .field("page_limit", &self.page_limit)
            .field("page_delay", &self.page_delay)
            .finish()
    }
}

impl<T: Transport> PatientFetcher<T> {
    pub fn new(transport: Arc<T>, config: &TriageConfig) -> Self {
        Self {
            transport,
            retry: config.retry.policy(),
            page_limit: config.pagination.max_limit,
            page_delay: config.retry.page_delay(),
        }
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// Fetch and decode a single page under the retry policy
    pub async fn fetch_page(&self, page: u64) -> Result<PaginatedResponse> {
        let request = ApiRequest::get(endpoints::PATIENTS)
            .with_query("page", page)
            .with_query("limit", self.page_limit);
        let operation = request.describe();

        let response = self
            .retry
            .execute(&operation, || self.transport.send(&request))
            .await?;

        if !response.is_success() {
            return Err(TriageError::api_error(
                response.status,
                format!("Failed to fetch patients: {}", response.status_text()),
            ));
        }

        response
            .json::<PaginatedResponse>()
            .map_err(|e| TriageError::invalid_response(operation, format!("page {page}: {e}")))
    }

    /// Fetch every page and return all records in page order
    #[instrument(skip(self), fields(page_limit = self.page_limit))]
    pub async fn fetch_all_patients(&self) -> Result<Vec<Patient>> {
        let mut patients = Vec::new();
        let mut page: u64 = 1;
        let mut total_pages: Option<u64> = None;

        loop {
            debug!(page, "Fetching patient page");
            let response = self.fetch_page(page).await?;

            if page == 1 {
                info!(
                    total_records = ?response.total_records(),
                    total_pages = ?response.total_pages(),
                    "Patient collection size reported"
                );
            }

            if let Some(reported) = response.total_pages() {
                total_pages = Some(reported);
            }

            if response.data.is_empty() {
                debug!(page, "Empty page, stopping");
                break;
            }

            let current_page = response.page().unwrap_or(page);
            let has_next = response.has_next().unwrap_or(false);
            let received = response.data.len();
            patients.extend(response.data);

            debug!(
                page = current_page,
                received,
                accumulated = patients.len(),
                total_pages = ?total_pages,
                has_next,
                "Fetched patient page"
            );

            let finished = match total_pages {
                Some(total) => current_page >= total,
                None => !has_next,
            };
            if finished {
                break;
            }

            page += 1;
            tokio::time::sleep(self.page_delay).await;
        }

        info!(
            total_patients = patients.len(),
            pages = page,
            "Fetched all patients"
        );

        Ok(patients)
    }
}
