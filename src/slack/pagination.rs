use crate::error::Result;
use crate::slack::{ApiCall, CallArgs};
use serde_json::Value;
use std::iter::FusedIterator;

/// Number of items requested per page when walking paginated Slack methods
pub const SLACK_PAGE_LIMIT: u32 = 900;

/// Turns a single-page call into a lazy walk over all pages
pub struct Paginated<C> {
    inner: C,
    limit: u32,
}

impl<C: ApiCall> Paginated<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            limit: SLACK_PAGE_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Start a fresh walk; nothing is fetched until the iterator is polled
    pub fn pages(&self, args: CallArgs) -> Pages<'_, C> {
        Pages {
            call: &self.inner,
            args,
            limit: self.limit,
            cursor: None,
            done: false,
        }
    }
}

pub fn with_pagination<C: ApiCall>(call: C) -> Paginated<C> {
    Paginated::new(call)
}

/// Validated page payloads, one fetch per `next()`
///
/// A failed fetch is yielded once and ends the walk.
pub struct Pages<'a, C> {
    call: &'a C,
    args: CallArgs,
    limit: u32,
    cursor: Option<String>,
    done: bool,
}

impl<C: ApiCall> Iterator for Pages<'_, C> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut args = self.args.clone();
        args.insert("limit".to_string(), Value::from(self.limit));
        match &self.cursor {
            Some(cursor) => args.insert("cursor".to_string(), Value::String(cursor.clone())),
            None => args.remove("cursor"),
        };

        let response = match self.call.call(&args) {
            Ok(response) => response,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        if let Err(e) = response.validate() {
            self.done = true;
            return Some(Err(e.into()));
        }

        let next_cursor = response.next_cursor();
        if next_cursor.is_empty() {
            self.done = true;
            self.cursor = None;
        } else {
            self.cursor = Some(next_cursor.to_string());
        }

        tracing::trace!(
            method = %self.call.name(),
            has_more = !self.done,
            "Fetched page"
        );

        Some(Ok(response.into_data()))
    }
}

impl<C: ApiCall> FusedIterator for Pages<'_, C> {}
