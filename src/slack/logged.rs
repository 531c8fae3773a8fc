use crate::error::Result;
use crate::logging::Timer;
use crate::slack::{ApiCall, CallArgs, SlackResponse};
use serde_json::Value;

/// Logs the arguments and result of every call at debug level
pub struct Logged<C> {
    inner: C,
}

impl<C: ApiCall> Logged<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

pub fn with_logging<C: ApiCall>(call: C) -> Logged<C> {
    Logged::new(call)
}

impl<C: ApiCall> ApiCall for Logged<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn call(&self, args: &CallArgs) -> Result<SlackResponse> {
        let method = self.name();
        let args_json = Value::Object(args.clone());
        tracing::debug!(
            method = %method,
            args = %args_json,
            "Making call to Slack API"
        );

        let result = {
            let _timer = Timer::new(format!("slack_api:{}", method));
            self.inner.call(args)
        };

        match &result {
            Ok(response) => tracing::debug!(
                method = %method,
                result = %response,
                "Call to Slack API returned"
            ),
            Err(e) => tracing::debug!(
                method = %method,
                error = %e,
                "Call to Slack API failed"
            ),
        }

        result
    }
}
