use crate::slack::SlackApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackUtilsError {
    #[error("Missing field in event: {0}")]
    MissingField(String),

    #[error("Invalid message timestamp: {0}")]
    InvalidTimestamp(String),

    #[error(transparent)]
    Api(#[from] SlackApiError),

    #[error("Max retries ({attempts}) exceeded for Slack call '{method}'")]
    RetriesExhausted { method: String, attempts: u32 },

    #[error("Failed to look up user {user_id}: {source}")]
    UserLookup {
        user_id: String,
        #[source]
        source: Box<SlackUtilsError>,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SlackUtilsError {
    /// Slack error code carried by this error, if it came from the API
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            SlackUtilsError::Api(e) => Some(e.error.as_str()),
            SlackUtilsError::UserLookup { source, .. } => source.api_error_code(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SlackUtilsError>;
