use crate::error::{Result, SlackUtilsError};
use crate::logging::log_error;
use crate::slack::{ApiCall, CallArgs, DEFAULT_MAX_RETRIES, MethodCall, RateLimited, SlackApi};
use crate::users::types::{CacheStats, UserNames};
use dashmap::DashMap;
use regex::Regex;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

static USER_MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@(.*?)>").expect("user mention pattern is valid"));

#[derive(Default)]
struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    api_calls: AtomicU64,
    api_errors: AtomicU64,
}

/// Replaces `<@USERID>` mentions in message text with `@DisplayName`
///
/// Resolved names are cached for the lifetime of the replacer and never evicted.
pub struct UserIdReplacer {
    users_info: RateLimited<MethodCall>,

    /// User ID -> display name (lazy-populated)
    names: DashMap<String, String>,

    stats: StatsCounters,
}

impl UserIdReplacer {
    pub fn new(client: Arc<dyn SlackApi>) -> Self {
        Self::with_max_retries(client, DEFAULT_MAX_RETRIES)
    }

    pub fn with_max_retries(client: Arc<dyn SlackApi>, max_retries: u32) -> Self {
        Self {
            users_info: RateLimited::new(MethodCall::new(client, "users.info"), max_retries),
            names: DashMap::new(),
            stats: StatsCounters::default(),
        }
    }

    /// Substitute every resolvable mention; unresolvable ones are left as is
    pub fn replace_user_ids_with_names(&self, message: &str) -> String {
        let user_ids: Vec<&str> = USER_MENTION_RE
            .captures_iter(message)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect();

        let mut result = message.to_string();
        for user_id in user_ids {
            match self.resolve_user_name(user_id) {
                Ok(user_name) => {
                    result = result.replace(&format!("<@{}>", user_id), &format!("@{}", user_name));
                }
                Err(e) => {
                    tracing::warn!(
                        user_id = %user_id,
                        "Unable to replace user ID with username"
                    );
                    log_error("replace_user_ids_with_names", &e);
                }
            }
        }

        result
    }

    fn resolve_user_name(&self, user_id: &str) -> Result<String> {
        if let Some(name) = self.names.get(user_id) {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(user_id = %user_id, user = %name.value(), "User cache hit");
            return Ok(name.clone());
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        self.stats.api_calls.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(user_id = %user_id, "User cache miss, fetching from Slack API");

        let mut args = CallArgs::new();
        args.insert("user".to_string(), Value::String(user_id.to_string()));

        let fetched = self
            .users_info
            .call(&args)
            .and_then(|response| UserNames::from_users_info(&response));

        match fetched {
            Ok(user) => {
                let name = user.best_name().to_string();
                tracing::info!(user_id = %user_id, user = %name, "Fetched and cached user name");
                self.names.insert(user_id.to_string(), name.clone());
                Ok(name)
            }
            Err(e) => {
                self.stats.api_errors.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    user_id = %user_id,
                    error_code = e.api_error_code().unwrap_or("none"),
                    error = %e,
                    "Error fetching data for user"
                );
                Err(SlackUtilsError::UserLookup {
                    user_id: user_id.to_string(),
                    source: Box::new(e),
                })
            }
        }
    }

    pub fn cache_size(&self) -> usize {
        self.names.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            api_calls: self.stats.api_calls.load(Ordering::Relaxed),
            api_errors: self.stats.api_errors.load(Ordering::Relaxed),
        }
    }

    /// Log cache statistics (for periodic monitoring)
    pub fn log_stats(&self) {
        let stats = self.stats();
        let hit_rate = if stats.hits + stats.misses > 0 {
            (stats.hits as f32 / (stats.hits + stats.misses) as f32 * 100.0) as u32
        } else {
            0
        };

        tracing::info!(
            users_cached = self.cache_size(),
            hit_rate = hit_rate,
            api_calls = stats.api_calls,
            api_errors = stats.api_errors,
            "User name cache statistics"
        );
    }
}
