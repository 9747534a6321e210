use axum::http::StatusCode;
use tracing::debug;

use super::{Middleware, Phase};
use crate::config::RequestSettings;
use crate::context::Context;
use crate::request::Request;
use crate::response::Response;

/// Rejects requests whose path has a segment starting with `prefix`
///
/// Keeps dotfiles and private partials in the docroot from being served as
/// views. The rejection looks like any other missing page.
#[derive(Debug, Clone)]
pub struct HiddenPaths {
    prefix: String,
}

impl HiddenPaths {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn is_hidden(&self, path: &str) -> bool {
        !self.prefix.is_empty()
            && path
                .split('/')
                .any(|segment| segment.starts_with(self.prefix.as_str()))
    }
}

impl Middleware for HiddenPaths {
    fn name(&self) -> &str {
        "hidden_paths"
    }

    fn action(
        &self,
        ctx: Context,
        resp: &mut Response,
        req: &Request,
        _cfg: &RequestSettings,
        _phase: Phase,
    ) -> Context {
        if self.is_hidden(req.path()) {
            debug!(request_id = %ctx.request_id(), path = req.path(), "hidden path rejected");
            return resp.set_error(ctx, StatusCode::NOT_FOUND, "not found");
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::sync::Arc;

    fn run(mw: &HiddenPaths, path: &str) -> (Context, Response) {
        let cfg = RequestSettings::new(Arc::new(Config::default()));
        let req = Request::builder().path(path).build();
        let mut resp = Response::new();
        let ctx = mw.action(Context::new(), &mut resp, &req, &cfg, Phase::Pre);
        (ctx, resp)
    }

    #[test]
    fn test_visible_path_passes() {
        let (ctx, resp) = run(&HiddenPaths::new("."), "/blog/post");
        assert!(!ctx.is_failed());
        assert!(!resp.is_error());
    }

    #[test]
    fn test_hidden_segment_rejected() {
        let (ctx, resp) = run(&HiddenPaths::new("."), "/blog/.drafts/post");
        assert!(ctx.is_failed());
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.error(), Some("not found"));
    }

    #[test]
    fn test_custom_prefix() {
        let (ctx, _) = run(&HiddenPaths::new("_"), "/_partials/nav");
        assert!(ctx.is_failed());

        let (ctx, _) = run(&HiddenPaths::new("_"), "/.well-known/x");
        assert!(!ctx.is_failed());
    }

    #[test]
    fn test_empty_prefix_disables() {
        let (ctx, _) = run(&HiddenPaths::new(""), "/.env");
        assert!(!ctx.is_failed());
    }
}
