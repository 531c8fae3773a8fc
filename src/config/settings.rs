use crate::error::{Result, SlackUtilsError};
use crate::slack::{DEFAULT_MAX_RETRIES, SLACK_PAGE_LIMIT};

pub const DEFAULT_API_BASE_URL: &str = "https://slack.com/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct SlackSettings {
    pub bot_token: String,
    /// Workspace subdomain used for message links (e.g. "acme")
    pub workspace: Option<String>,
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Items requested per page by paginated calls
    pub page_limit: u32,
}

impl SlackSettings {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            workspace: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            page_limit: SLACK_PAGE_LIMIT,
        }
    }

    pub fn workspace(&self) -> Result<&str> {
        self.workspace
            .as_deref()
            .ok_or_else(|| SlackUtilsError::Config("SLACK_WORKSPACE not set".to_string()))
    }
}

pub fn load_settings() -> Result<SlackSettings> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    settings_from_lookup(|key| std::env::var(key).ok())
}

/// Build settings from an arbitrary key lookup (environment, test fixtures)
pub fn settings_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<SlackSettings> {
    let bot_token = lookup("SLACK_BOT_TOKEN")
        .ok_or_else(|| SlackUtilsError::Config("SLACK_BOT_TOKEN not set".to_string()))?;

    let mut settings = SlackSettings::new(bot_token);
    settings.workspace = lookup("SLACK_WORKSPACE");

    if let Some(url) = lookup("SLACK_API_BASE_URL") {
        settings.api_base_url = url;
    }

    if let Some(timeout) = lookup("SLACK_TIMEOUT_SECS") {
        settings.timeout_secs = timeout
            .parse()
            .map_err(|_| SlackUtilsError::Config("Invalid SLACK_TIMEOUT_SECS".to_string()))?;
    }

    if let Some(retries) = lookup("SLACK_MAX_RETRIES") {
        settings.max_retries = retries
            .parse()
            .map_err(|_| SlackUtilsError::Config("Invalid SLACK_MAX_RETRIES".to_string()))?;
    }

    if let Some(limit) = lookup("SLACK_PAGE_LIMIT") {
        settings.page_limit = limit
            .parse()
            .map_err(|_| SlackUtilsError::Config("Invalid SLACK_PAGE_LIMIT".to_string()))?;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let settings =
            settings_from_lookup(lookup_from(&[("SLACK_BOT_TOKEN", "xoxb-test")])).unwrap();

        assert_eq!(settings.bot_token, "xoxb-test");
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.max_retries, 3);
        assert_eq!(settings.page_limit, 900);
        assert!(settings.workspace.is_none());
        assert!(matches!(settings.workspace(), Err(SlackUtilsError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let settings = settings_from_lookup(lookup_from(&[
            ("SLACK_BOT_TOKEN", "xoxb-test"),
            ("SLACK_WORKSPACE", "acme"),
            ("SLACK_API_BASE_URL", "http://localhost:1234/api"),
            ("SLACK_TIMEOUT_SECS", "5"),
            ("SLACK_MAX_RETRIES", "7"),
            ("SLACK_PAGE_LIMIT", "200"),
        ]))
        .unwrap();

        assert_eq!(settings.workspace().unwrap(), "acme");
        assert_eq!(settings.api_base_url, "http://localhost:1234/api");
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.max_retries, 7);
        assert_eq!(settings.page_limit, 200);
    }

    #[test]
    fn test_missing_token() {
        let result = settings_from_lookup(lookup_from(&[]));
        assert!(
            matches!(result, Err(SlackUtilsError::Config(msg)) if msg.contains("SLACK_BOT_TOKEN"))
        );
    }

    #[test]
    fn test_invalid_page_limit() {
        let result = settings_from_lookup(lookup_from(&[
            ("SLACK_BOT_TOKEN", "xoxb-test"),
            ("SLACK_PAGE_LIMIT", "-5"),
        ]));
        assert!(
            matches!(result, Err(SlackUtilsError::Config(msg)) if msg.contains("SLACK_PAGE_LIMIT"))
        );
    }

    #[test]
    fn test_invalid_number() {
        let result = settings_from_lookup(lookup_from(&[
            ("SLACK_BOT_TOKEN", "xoxb-test"),
            ("SLACK_MAX_RETRIES", "lots"),
        ]));
        assert!(
            matches!(result, Err(SlackUtilsError::Config(msg)) if msg.contains("SLACK_MAX_RETRIES"))
        );
    }
}
