use crate::error::Result;
use crate::slack::SlackResponse;
use slack_morphism::prelude::SlackApiUsersInfoResponse;

/// Name fields of a `users.info` response
#[derive(Debug, Clone)]
pub struct UserNames {
    /// User ID (e.g., U09JDBT2MCM)
    pub id: String,

    /// Username/handle (e.g., "john.doe")
    pub name: Option<String>,

    /// Real name (e.g., "John Doe")
    pub real_name: Option<String>,

    /// Display name (what shows in Slack)
    pub display_name: Option<String>,
}

impl UserNames {
    pub fn from_users_info(response: &SlackResponse) -> Result<Self> {
        let parsed: SlackApiUsersInfoResponse = serde_json::from_value(response.data().clone())?;
        let user = parsed.user;
        let profile = user.profile.as_ref();

        Ok(Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            real_name: profile
                .and_then(|p| p.real_name.clone())
                .or_else(|| user.real_name.clone()),
            display_name: profile.and_then(|p| p.display_name.clone()),
        })
    }

    /// Display name if set, else real name, else the raw user ID
    pub fn best_name(&self) -> &str {
        non_empty(self.display_name.as_deref())
            .or(non_empty(self.real_name.as_deref()))
            .unwrap_or(&self.id)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Cache statistics for monitoring
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub api_calls: u64,
    pub api_errors: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(user: serde_json::Value) -> UserNames {
        let response = SlackResponse::new("users.info", json!({"ok": true, "user": user}));
        UserNames::from_users_info(&response).unwrap()
    }

    #[test]
    fn test_prefers_display_name() {
        let user = names(json!({
            "id": "U123",
            "name": "john.doe",
            "real_name": "John Doe",
            "profile": {"display_name": "Johnny", "real_name": "John Doe"}
        }));

        assert_eq!(user.id, "U123");
        assert_eq!(user.name.as_deref(), Some("john.doe"));
        assert_eq!(user.best_name(), "Johnny");
    }

    #[test]
    fn test_empty_display_name_falls_back_to_real_name() {
        let user = names(json!({
            "id": "U123",
            "profile": {"display_name": "", "real_name": "John Doe"}
        }));

        assert_eq!(user.best_name(), "John Doe");
    }

    #[test]
    fn test_top_level_real_name() {
        let user = names(json!({"id": "U123", "real_name": "John Doe"}));
        assert_eq!(user.best_name(), "John Doe");
    }

    #[test]
    fn test_no_names_falls_back_to_id() {
        let user = names(json!({
            "id": "U123",
            "name": "john.doe",
            "profile": {"display_name": "", "real_name": ""}
        }));

        assert_eq!(user.name.as_deref(), Some("john.doe"));
        assert_eq!(user.best_name(), "U123");
    }

    #[test]
    fn test_missing_user_is_error() {
        let response = SlackResponse::new("users.info", json!({"ok": true}));
        assert!(matches!(
            UserNames::from_users_info(&response),
            Err(crate::SlackUtilsError::Serde(_))
        ));
    }
}
