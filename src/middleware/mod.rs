//! Cross-cutting middleware run around doctype handling.
//!
//! Middleware declare the phases they take part in when registered. The
//! [`dispatch`] module runs one phase at a time, in registration order,
//! stopping at the first failure.
//!
//! ## Built-in middleware
//!
//! - [`AccessLog`] (`access_log`) - logs each request and its outcome
//! - [`HiddenPaths`] (`hidden_paths`) - answers 404 for hidden path segments

mod access_log;
pub mod dispatch;
mod hidden_paths;

use std::fmt;
use std::sync::Arc;

use crate::config::{MiddlewareConfig, RequestSettings};
use crate::context::Context;
use crate::registry::Registry;
use crate::request::Request;
use crate::response::Response;

pub use access_log::AccessLog;
pub use dispatch::run_phase;
pub use hidden_paths::HiddenPaths;

pub type MiddlewareRegistry = Registry<dyn Middleware>;

/// Point in the pipeline at which a middleware runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the doctype engine handles the request
    Pre,
    /// After the doctype engine served the page or its error page
    Post,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Pre => f.write_str("PRE"),
            Phase::Post => f.write_str("POST"),
        }
    }
}

pub trait Middleware: Send + Sync {
    fn name(&self) -> &str;

    /// Run for `phase`; return the context unchanged to continue, or a
    /// failed context to stop the chain.
    fn action(
        &self,
        ctx: Context,
        resp: &mut Response,
        req: &Request,
        cfg: &RequestSettings,
        phase: Phase,
    ) -> Context;
}

/// Registry with the built-in middleware registered (none enabled)
pub fn builtin(config: &MiddlewareConfig) -> MiddlewareRegistry {
    let registry = MiddlewareRegistry::new();

    let hidden = HiddenPaths::new(config.hidden_prefix.clone());
    registry.register(hidden.name().to_string(), Arc::new(hidden), &[Phase::Pre]);

    let access_log = AccessLog;
    registry.register(
        access_log.name().to_string(),
        Arc::new(access_log),
        &[Phase::Pre, Phase::Post],
    );

    registry
}
