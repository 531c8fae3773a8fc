use crate::error::{Result, SlackUtilsError};
use crate::slack::{ApiCall, CallArgs, SlackResponse};
use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Blocking wait between rate-limited attempts
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Retries calls Slack rejected with `ratelimited`, waiting for `Retry-After`
///
/// Every attempt is validated. Any other failure is returned as is.
pub struct RateLimited<C, S = ThreadSleeper> {
    inner: C,
    max_retries: u32,
    sleeper: S,
}

impl<C: ApiCall> RateLimited<C> {
    pub fn new(inner: C, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            sleeper: ThreadSleeper,
        }
    }
}

impl<C, S> RateLimited<C, S> {
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> RateLimited<C, T> {
        RateLimited {
            inner: self.inner,
            max_retries: self.max_retries,
            sleeper,
        }
    }
}

pub fn with_rate_limit_retry<C: ApiCall>(call: C, max_retries: u32) -> RateLimited<C> {
    RateLimited::new(call, max_retries)
}

impl<C: ApiCall, S: Sleeper> ApiCall for RateLimited<C, S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn call(&self, args: &CallArgs) -> Result<SlackResponse> {
        for attempt in 1..=self.max_retries {
            let outcome = self.inner.call(args).and_then(|response| {
                response.validate()?;
                Ok(response)
            });

            match outcome {
                Ok(response) => return Ok(response),
                Err(SlackUtilsError::Api(e)) if e.is_rate_limited() => {
                    if attempt == self.max_retries {
                        break;
                    }
                    let retry_after = e.retry_after();
                    tracing::info!(
                        method = %self.name(),
                        attempt = attempt,
                        max_retries = self.max_retries,
                        retry_after_secs = retry_after.as_secs(),
                        "Slack call rate limited, retrying after {} seconds",
                        retry_after.as_secs()
                    );
                    self.sleeper.sleep(retry_after);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(
            method = %self.name(),
            max_retries = self.max_retries,
            "Slack call still rate limited, giving up"
        );
        Err(SlackUtilsError::RetriesExhausted {
            method: self.name().to_string(),
            attempts: self.max_retries,
        })
    }
}
