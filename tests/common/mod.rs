//! Scripted transport for integration tests
//!
//! Responses are queued per request path and handed out in order. Every
//! request is recorded with the (tokio) instant it was sent so tests can
//! assert pacing under paused time.

#![allow(dead_code)]

use async_trait::async_trait;
use patient_triage::client::{ApiRequest, ApiResponse, Transport, TransportError};
use patient_triage::config::TriageConfig;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::time::Instant;

pub const PATIENTS: &str = "/patients";
pub const SUBMIT: &str = "/submit-assessment";

type Scripted = Result<ApiResponse, TransportError>;

/// A request as the transport saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request: ApiRequest,
    pub sent_at: Instant,
}

impl RecordedRequest {
    pub fn page(&self) -> Option<u64> {
        self.request.query_param("page").and_then(|p| p.parse().ok())
    }
}

#[derive(Debug, Default)]
struct ScriptState {
    responses: HashMap<String, VecDeque<Scripted>>,
    requests: Vec<RecordedRequest>,
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    state: Mutex<ScriptState>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `path`
    pub fn respond(self, path: &str, response: ApiResponse) -> Self {
        self.push(path, Ok(response));
        self
    }

    /// Queue a network failure for `path`
    pub fn fail(self, path: &str, error: TransportError) -> Self {
        self.push(path, Err(error));
        self
    }

    fn push(&self, path: &str, scripted: Scripted) {
        self.state
            .lock()
            .unwrap()
            .responses
            .entry(path.to_string())
            .or_default()
            .push_back(scripted);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.request.path == path)
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            request: request.clone(),
            sent_at: Instant::now(),
        });

        state
            .responses
            .get_mut(&request.path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(TransportError::Connection(format!(
                    "no scripted response for {}",
                    request.describe()
                )))
            })
    }
}

/// Default configuration with a test credential
pub fn test_config() -> TriageConfig {
    let mut config = TriageConfig::default();
    config.api.api_key = "test-key".to_string();
    config
}

pub fn json_response(status: u16, body: Value) -> ApiResponse {
    ApiResponse::new(status, body.to_string())
}

pub fn rate_limited(retry_after: Option<&str>) -> ApiResponse {
    let response = json_response(429, json!({"error": "Rate limit exceeded"}));
    match retry_after {
        Some(value) => response.with_retry_after(value),
        None => response,
    }
}

/// One listing page; `None` leaves the pagination field out entirely
pub fn page(
    records: Vec<Value>,
    page: u64,
    total_pages: Option<u64>,
    has_next: Option<bool>,
) -> ApiResponse {
    let mut pagination = json!({"page": page, "limit": 20});
    if let Some(total_pages) = total_pages {
        pagination["totalPages"] = json!(total_pages);
    }
    if let Some(has_next) = has_next {
        pagination["hasNext"] = json!(has_next);
    }

    json_response(200, json!({"data": records, "pagination": pagination}))
}

pub fn patient(id: &str, age: Value, blood_pressure: Value, temperature: Value) -> Value {
    json!({
        "patient_id": id,
        "name": format!("Patient {id}"),
        "age": age,
        "blood_pressure": blood_pressure,
        "temperature": temperature
    })
}

/// A healthy record that lands in no category
pub fn healthy(id: &str) -> Value {
    patient(id, json!(30), json!("110/70"), json!(98.2))
}

pub fn assessment_accepted() -> ApiResponse {
    json_response(
        200,
        json!({
            "success": true,
            "message": "Assessment submitted successfully",
            "results": {"score": 100, "percentage": 100, "status": "PASS"}
        }),
    )
}
