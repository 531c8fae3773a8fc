use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Keyword arguments of a Slack Web API call
pub type CallArgs = Map<String, Value>;

/// Error code Slack returns when the caller exceeded its request quota
pub const RATE_LIMITED_ERROR: &str = "ratelimited";

const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Raw response of a Slack Web API call
///
/// The body is kept as JSON so wrappers stay agnostic of the method being called.
#[derive(Debug, Clone)]
pub struct SlackResponse {
    method: String,
    status: u16,
    headers: HeaderMap,
    data: Value,
}

impl SlackResponse {
    pub fn new(method: impl Into<String>, data: Value) -> Self {
        Self {
            method: method.into(),
            status: 200,
            headers: HeaderMap::new(),
            data,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    /// Top-level field of the body
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Check Slack's `ok` flag, returning the body on success
    pub fn validate(&self) -> std::result::Result<&Value, SlackApiError> {
        if self.data.get("ok").and_then(Value::as_bool) == Some(true) {
            return Ok(&self.data);
        }

        Err(SlackApiError {
            method: self.method.clone(),
            error: self
                .data
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            headers: self.headers.clone(),
            body: self.data.clone(),
        })
    }

    /// Continuation cursor from `response_metadata.next_cursor`, empty when absent
    pub fn next_cursor(&self) -> &str {
        self.data
            .get("response_metadata")
            .and_then(|m| m.get("next_cursor"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

impl fmt::Display for SlackResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

/// Failure reported by the Slack API (`ok: false`)
#[derive(Debug, Clone, Error)]
#[error("Slack API call '{method}' failed: {error}")]
pub struct SlackApiError {
    pub method: String,
    pub error: String,
    pub headers: HeaderMap,
    pub body: Value,
}

impl SlackApiError {
    pub fn is_rate_limited(&self) -> bool {
        self.error == RATE_LIMITED_ERROR
    }

    /// Delay requested by the `Retry-After` header, 1 second if missing or invalid
    pub fn retry_after(&self) -> Duration {
        self.headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map_or(DEFAULT_RETRY_AFTER, Duration::from_secs)
    }
}
