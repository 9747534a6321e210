//! Request-scoped failure marker threaded through every pipeline stage.
//!
//! A [`Context`] is passed by value into each stage and returned from it.
//! A stage that fails returns a context produced by [`Context::fail`]; there
//! is no operation that turns a failed context back into a successful one.

use std::time::{Duration, Instant};

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    request_id: Uuid,
    started: Instant,
    failure: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::now_v7(),
            started: Instant::now(),
            failure: None,
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Time since the request entered the pipeline
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Mark the context failed. A later failure replaces the message but the
    /// context stays failed.
    #[must_use]
    pub fn fail(self, message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..self
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
