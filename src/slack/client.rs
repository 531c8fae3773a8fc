use crate::config::SlackSettings;
use crate::error::Result;
use crate::slack::{CallArgs, RATE_LIMITED_ERROR, SlackResponse};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::Duration;

/// Transport seam for the Slack Web API
///
/// Implementations return the response even when Slack reports `ok: false`;
/// callers decide how to validate.
pub trait SlackApi: Send + Sync {
    fn api_call(&self, method: &str, args: &CallArgs) -> Result<SlackResponse>;
}

/// Blocking Slack Web API client
pub struct WebClient {
    http: reqwest::blocking::Client,
    token: String,
    base_url: String,
}

impl WebClient {
    pub fn new(settings: &SlackSettings) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            token: settings.bot_token.clone(),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }
}

impl SlackApi for WebClient {
    fn api_call(&self, method: &str, args: &CallArgs) -> Result<SlackResponse> {
        let response = self
            .http
            .post(self.method_url(method))
            .bearer_auth(&self.token)
            .form(&form_fields(args))
            .send()?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text()?;

        let data = match serde_json::from_str::<Value>(&body) {
            Ok(data) => data,
            // 429 bodies are not guaranteed to be JSON
            Err(_) if status == StatusCode::TOO_MANY_REQUESTS => {
                json!({"ok": false, "error": RATE_LIMITED_ERROR})
            }
            Err(e) => return Err(e.into()),
        };

        tracing::trace!(
            method = %method,
            status = status.as_u16(),
            "Slack API responded"
        );

        Ok(SlackResponse::new(method, data)
            .with_status(status.as_u16())
            .with_headers(headers))
    }
}

/// Flatten call arguments into form fields; strings go verbatim, `null` is dropped
fn form_fields(args: &CallArgs) -> Vec<(String, String)> {
    args.iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key.clone(), s.clone())),
            other => Some((key.clone(), other.to_string())),
        })
        .collect()
}
