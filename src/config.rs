//! # Triage Configuration
//!
//! Deployment-time settings for the remote assessment API, pagination, retry
//! behaviour, and the inbound web surface.
//!
//! Sources are layered in order, later sources winning:
//!
//! 1. compiled-in defaults ([`TriageConfig::default`])
//! 2. an optional TOML file (`config/triage.toml` unless a path is given)
//! 3. environment variables prefixed with `TRIAGE_`, nested with `__`
//!    (e.g. `TRIAGE_API__API_KEY`, `TRIAGE_RETRY__MAX_RETRIES`)
//!
//! ```rust,no_run
//! use patient_triage::config::TriageConfig;
//!
//! # fn main() -> patient_triage::Result<()> {
//! let config = TriageConfig::load(None)?;
//! let policy = config.retry.policy();
//! assert_eq!(policy.max_retries(), config.retry.max_retries);
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, TriageError};
use crate::resilience::RetryPolicy;
use config::{Config, Environment, File, FileFormat};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_CONFIG_FILE: &str = "config/triage.toml";
const ENV_PREFIX: &str = "TRIAGE";

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Remote assessment API connection settings
    pub api: ApiConfig,
    /// Page size settings for the patient listing
    pub pagination: PaginationConfig,
    /// Retry and spacing settings shared by every outbound request
    pub retry: RetryConfig,
    /// Inbound web surface settings
    pub server: ServerConfig,
}

/// Remote assessment API connection settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Pre-issued credential attached to every request
    pub api_key: String,
    pub api_key_header: String,
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://assessment.ksensetech.com/api".to_string(),
            api_key: String::new(),
            api_key_header: crate::constants::headers::API_KEY.to_string(),
            request_timeout_ms: 30000,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("api_key_header", &self.api_key_header)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Page size settings for the patient listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Largest page size the source accepts; the fetcher always requests this
    pub max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_limit: 20,
        }
    }
}

/// Retry and spacing settings shared by every outbound request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    /// Base delay for linear backoff (`initial_delay_ms * attempt_number`)
    pub initial_delay_ms: u64,
    /// Mandatory spacing between successive page fetches
    pub page_delay_ms: u64,
    /// Upper bound on a single attempt before it counts as a network failure
    pub attempt_timeout_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            page_delay_ms: 200,
            attempt_timeout_ms: 30000,
        }
    }
}

impl RetryConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    /// Build the retry policy described by this configuration
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.initial_delay())
            .with_attempt_timeout(self.attempt_timeout())
    }
}

/// Inbound web surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

impl TriageConfig {
    /// Load configuration from defaults, an optional TOML file, and the environment
    ///
    /// When `path` is `None` the default file is used if it exists. An explicit
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load configuration from defaults and the environment only
    pub fn from_env() -> Result<Self> {
        Self::from_sources(None, None)
    }

    /// Load with an explicit environment map instead of the process environment
    ///
    /// Lets tests exercise environment overrides without mutating global state.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let file = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        Self::from_sources(Some(file), env)
    }

    fn from_sources(
        file: Option<(PathBuf, bool)>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let config = Self::build(file, env)?;
        config.validate()?;

        debug!(config = ?config, "Configuration loaded successfully");
        Ok(config)
    }

    fn build(
        file: Option<(PathBuf, bool)>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some((path, required)) = file {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(TriageError::config_error("api.base_url must not be empty"));
        }
        Url::parse(&self.api.base_url)
            .map_err(|e| TriageError::config_error(format!("Invalid base URL: {e}")))?;

        if self.api.api_key_header.trim().is_empty() {
            return Err(TriageError::config_error(
                "api.api_key_header must not be empty",
            ));
        }
        if self.pagination.max_limit == 0 {
            return Err(TriageError::config_error(
                "pagination.max_limit must be at least 1",
            ));
        }
        if self.retry.max_retries == 0 {
            return Err(TriageError::config_error(
                "retry.max_retries must be at least 1",
            ));
        }

        if self.api.api_key.is_empty() {
            warn!("No API key configured; requests will be sent without a credential");
        }
        Ok(())
    }
}
