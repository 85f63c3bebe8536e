//! HTTP client for the analysis backend.
//!
//! Each panel submits its parsed values to a panel-specific endpoint and
//! receives a JSON array of interpretation records. The trait seam keeps the
//! session logic testable without a running backend.

use std::collections::BTreeMap;

use crate::config;
use crate::models::{InterpretationRecord, PanelType};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Cannot connect to analysis service at {0}")]
    Connection(String),

    #[error("Analysis request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Transport(String),

    #[error("Analysis service returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

/// Seam to the analysis backend. `values` carries the parsed floating-point
/// form fields, keyed exactly by the panel's field keys.
pub trait AnalysisApi {
    fn analyze(
        &self,
        panel: PanelType,
        values: &BTreeMap<String, f64>,
    ) -> Result<Vec<InterpretationRecord>, ClientError>;
}

/// Blocking reqwest client against the real analysis service.
pub struct HttpAnalysisClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpAnalysisClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client for the configured (or default local) analysis service.
    pub fn from_config() -> Self {
        Self::new(&config::api_base_url(), config::DEFAULT_TIMEOUT_SECS)
    }
}

impl AnalysisApi for HttpAnalysisClient {
    fn analyze(
        &self,
        panel: PanelType,
        values: &BTreeMap<String, f64>,
    ) -> Result<Vec<InterpretationRecord>, ClientError> {
        let url = format!("{}{}", self.base_url, panel.endpoint_path());

        let response = self.client.post(&url).json(values).send().map_err(|e| {
            if e.is_connect() {
                ClientError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                ClientError::Timeout(self.timeout_secs)
            } else {
                ClientError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Service {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<InterpretationRecord>>()
            .map_err(|e| ClientError::ResponseParsing(e.to_string()))
    }
}

/// Mock analysis client for testing — returns configured records or a
/// transport failure.
pub struct MockAnalysisClient {
    records: Vec<InterpretationRecord>,
    fail_with: Option<String>,
}

impl MockAnalysisClient {
    pub fn new(records: Vec<InterpretationRecord>) -> Self {
        Self {
            records,
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            records: Vec::new(),
            fail_with: Some(message.to_string()),
        }
    }
}

impl AnalysisApi for MockAnalysisClient {
    fn analyze(
        &self,
        _panel: PanelType,
        _values: &BTreeMap<String, f64>,
    ) -> Result<Vec<InterpretationRecord>, ClientError> {
        match &self.fail_with {
            Some(message) => Err(ClientError::Transport(message.clone())),
            None => Ok(self.records.clone()),
        }
    }
}
