//! Resolution of `<@USERID>` mentions into display names
//!
//! Lookups go through `users.info` with rate-limit retry and are cached for the
//! lifetime of the replacer. Failed lookups are never cached.

mod resolver;
mod types;

pub use resolver::UserIdReplacer;
pub use types::{CacheStats, UserNames};
