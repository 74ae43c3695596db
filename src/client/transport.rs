//! # HTTP Transport
//!
//! One HTTP exchange against the remote assessment API. The retry policy, the
//! fetcher, and the submitter only see [`ApiRequest`] and [`ApiResponse`], so
//! the `reqwest` client can be swapped for a scripted transport in tests.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::constants::headers;
use crate::error::{Result, TriageError};

/// Failures below the HTTP status level
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_timeout(),
            TransportError::Timeout { .. } => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// An outbound request, relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post_json(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Look up a query parameter by name
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Short label used in logs and retry errors, e.g. `GET /patients`
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// A received response with the body fully buffered
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Raw `Retry-After` header value, if the server sent one
    pub retry_after: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after: None,
            body: body.into(),
        }
    }

    pub fn with_retry_after(mut self, value: impl Into<String>) -> Self {
        self.retry_after = Some(value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Canonical reason phrase for the status, e.g. `Not Found`
    pub fn status_text(&self) -> String {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Performs a single HTTP exchange
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> std::result::Result<ApiResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &ApiRequest) -> std::result::Result<ApiResponse, TransportError> {
        (**self).send(request).await
    }
}

/// `reqwest`-backed transport with the API credential attached to every request
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ReqwestTransport {
    /// Build the HTTP client with timeout, user agent, and credential headers
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| TriageError::config_error(format!("Invalid base URL: {e}")))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if config.api_key.is_empty() {
            warn!("API key not configured; requests will be unauthenticated");
        } else {
            let header_name = if config.api_key_header.is_empty() {
                headers::API_KEY
            } else {
                config.api_key_header.as_str()
            };

            default_headers.insert(
                HeaderName::from_bytes(header_name.as_bytes()).map_err(|e| {
                    TriageError::config_error(format!("Invalid API key header name: {e}"))
                })?,
                HeaderValue::from_str(&config.api_key)
                    .map_err(|e| TriageError::config_error(format!("Invalid API key: {e}")))?,
            );

            debug!(header = %header_name, "Configured API key authentication");
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(format!("patient-triage/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(default_headers)
            .build()
            .map_err(|e| TriageError::config_error(format!("Failed to create HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            timeout_ms = config.request_timeout_ms,
            auth_enabled = !config.api_key.is_empty(),
            "Created assessment API transport"
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a request against the base URL
    ///
    /// Paths are appended to the base URL rather than joined, so a base URL
    /// with a path prefix (`.../api`) keeps it.
    pub fn url_for(&self, request: &ApiRequest) -> std::result::Result<Url, TransportError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path)).map_err(|e| {
            TransportError::InvalidRequest(format!("Failed to construct URL: {e}"))
        })?;

        if !request.query.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                query_pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> std::result::Result<ApiResponse, TransportError> {
        let url = self.url_for(request)?;

        let builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(headers::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        debug!(request = %request.describe(), status, "Received response");

        Ok(ApiResponse {
            status,
            retry_after,
            body,
        })
    }
}
