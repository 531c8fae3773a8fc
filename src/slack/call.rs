//! The call signature every wrapper consumes and produces

use crate::error::Result;
use crate::slack::{CallArgs, Logged, Paginated, RateLimited, SlackApi, SlackResponse};
use std::sync::Arc;

/// A single Slack Web API call bound to its method
///
/// Wrappers (`Logged`, `RateLimited`) take an `ApiCall` and are themselves an
/// `ApiCall`, so they compose in any order.
pub trait ApiCall {
    /// Name used in logs and errors (usually the Slack method, e.g. `users.info`)
    fn name(&self) -> &str;

    fn call(&self, args: &CallArgs) -> Result<SlackResponse>;
}

impl<T: ApiCall + ?Sized> ApiCall for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn call(&self, args: &CallArgs) -> Result<SlackResponse> {
        (**self).call(args)
    }
}

impl<T: ApiCall + ?Sized> ApiCall for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn call(&self, args: &CallArgs) -> Result<SlackResponse> {
        (**self).call(args)
    }
}

/// Binds a Slack method name to a shared client
#[derive(Clone)]
pub struct MethodCall {
    client: Arc<dyn SlackApi>,
    method: String,
}

impl MethodCall {
    pub fn new(client: Arc<dyn SlackApi>, method: impl Into<String>) -> Self {
        Self {
            client,
            method: method.into(),
        }
    }
}

impl ApiCall for MethodCall {
    fn name(&self) -> &str {
        &self.method
    }

    fn call(&self, args: &CallArgs) -> Result<SlackResponse> {
        self.client.api_call(&self.method, args)
    }
}

/// Adapts a closure into an `ApiCall`
pub struct FnCall<F> {
    name: String,
    f: F,
}

pub fn call_fn<F>(name: impl Into<String>, f: F) -> FnCall<F>
where
    F: Fn(&CallArgs) -> Result<SlackResponse>,
{
    FnCall {
        name: name.into(),
        f,
    }
}

impl<F> ApiCall for FnCall<F>
where
    F: Fn(&CallArgs) -> Result<SlackResponse>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, args: &CallArgs) -> Result<SlackResponse> {
        (self.f)(args)
    }
}

/// Builder-style composition of the call wrappers
pub trait ApiCallExt: ApiCall + Sized {
    fn logged(self) -> Logged<Self> {
        Logged::new(self)
    }

    fn rate_limited(self, max_retries: u32) -> RateLimited<Self> {
        RateLimited::new(self, max_retries)
    }

    fn paginated(self) -> Paginated<Self> {
        Paginated::new(self)
    }
}

impl<T: ApiCall> ApiCallExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    struct RecordingApi {
        calls: Mutex<Vec<(String, CallArgs)>>,
    }

    impl SlackApi for RecordingApi {
        fn api_call(&self, method: &str, args: &CallArgs) -> Result<SlackResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), args.clone()));
            Ok(SlackResponse::new(method, json!({"ok": true})))
        }
    }

    #[test]
    fn test_method_call_forwards_to_client() {
        let api = Arc::new(RecordingApi {
            calls: Mutex::new(Vec::new()),
        });
        let call = MethodCall::new(api.clone(), "users.info");

        let mut args = CallArgs::new();
        args.insert("user".to_string(), Value::String("U1".to_string()));
        let response = call.call(&args).unwrap();

        assert_eq!(call.name(), "users.info");
        assert_eq!(response.method(), "users.info");
        let calls = api.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "users.info");
        assert_eq!(calls[0].1["user"], "U1");
    }

    #[test]
    fn test_wrappers_compose() {
        let call = call_fn("auth.test", |_args: &CallArgs| {
            Ok(SlackResponse::new("auth.test", json!({"ok": true, "team": "acme"})))
        })
        .rate_limited(3)
        .logged();

        assert_eq!(call.name(), "auth.test");
        let response = call.call(&CallArgs::new()).unwrap();
        assert_eq!(response.get("team"), Some(&json!("acme")));
    }
}
