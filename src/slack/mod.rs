mod call;
mod client;
mod links;
mod logged;
mod pagination;
mod rate_limit;
mod types;

pub use call::{ApiCall, ApiCallExt, FnCall, MethodCall, call_fn};
pub use client::{SlackApi, WebClient};
pub use links::{build_message_link, parse_message_ts};
pub use logged::{Logged, with_logging};
pub use pagination::{Pages, Paginated, SLACK_PAGE_LIMIT, with_pagination};
pub use rate_limit::{
    DEFAULT_MAX_RETRIES, RateLimited, Sleeper, ThreadSleeper, with_rate_limit_retry,
};
pub use types::{CallArgs, RATE_LIMITED_ERROR, SlackApiError, SlackResponse};
