//! Phase dispatcher: runs the enabled middleware for one phase, in order.

use tracing::debug;

use super::{MiddlewareRegistry, Phase};
use crate::config::RequestSettings;
use crate::context::Context;
use crate::request::Request;
use crate::response::Response;

/// Run every enabled middleware registered for `phase`.
///
/// The active entry's name is recorded on `cfg` for the duration of its call.
/// Iteration stops at the first entry that returns a failed context, which is
/// returned as-is; later entries are never invoked. A context that arrives
/// already failed (POST over an error page) is shown to every entry.
pub fn run_phase(
    registry: &MiddlewareRegistry,
    mut ctx: Context,
    resp: &mut Response,
    req: &Request,
    cfg: &mut RequestSettings,
    phase: Phase,
) -> Context {
    let failed_on_entry = ctx.is_failed();
    for (name, mw) in registry.get_all(phase) {
        debug!(request_id = %ctx.request_id(), %phase, middleware = %name, "running middleware");

        cfg.set_middleware(&name);
        ctx = mw.action(ctx, resp, req, cfg, phase);
        cfg.reset();

        if !failed_on_entry && ctx.is_failed() {
            debug!(
                request_id = %ctx.request_id(),
                %phase,
                middleware = %name,
                failure = ctx.failure(),
                "middleware failed, stopping phase"
            );
            return ctx;
        }
    }
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::middleware::Middleware;
    use axum::http::StatusCode;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Records every call, optionally failing
    struct Recorder {
        name: &'static str,
        fail: bool,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn action(
            &self,
            ctx: Context,
            resp: &mut Response,
            _req: &Request,
            cfg: &RequestSettings,
            phase: Phase,
        ) -> Context {
            self.calls.lock().push(format!(
                "{}:{}:{}",
                phase,
                self.name,
                cfg.middleware().unwrap_or("-")
            ));
            if self.fail {
                return resp.set_error(ctx, StatusCode::FORBIDDEN, format!("{} failed", self.name));
            }
            ctx
        }
    }

    fn setup(failing: &[&'static str]) -> (MiddlewareRegistry, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let registry = MiddlewareRegistry::new();
        for name in ["one", "two", "three", "four"] {
            registry.register(
                name,
                Arc::new(Recorder {
                    name,
                    fail: failing.contains(&name),
                    calls: Arc::clone(&calls),
                }),
                &[Phase::Pre, Phase::Post],
            );
        }
        registry.enable(["one", "two", "three", "four"]).unwrap();
        (registry, calls)
    }

    fn settings() -> RequestSettings {
        RequestSettings::new(Arc::new(Config::default()))
    }

    #[test]
    fn test_runs_all_in_registration_order() {
        let (registry, calls) = setup(&[]);
        let mut cfg = settings();
        let mut resp = Response::new();
        let req = Request::builder().build();

        let ctx = run_phase(&registry, Context::new(), &mut resp, &req, &mut cfg, Phase::Pre);

        assert!(!ctx.is_failed());
        assert_eq!(
            *calls.lock(),
            vec!["PRE:one:one", "PRE:two:two", "PRE:three:three", "PRE:four:four"]
        );
        assert!(cfg.middleware().is_none());
    }

    #[test]
    fn test_stops_at_first_failure() {
        let (registry, calls) = setup(&["two", "four"]);
        let mut cfg = settings();
        let mut resp = Response::new();
        let req = Request::builder().build();

        let ctx = run_phase(&registry, Context::new(), &mut resp, &req, &mut cfg, Phase::Post);

        assert!(ctx.is_failed());
        assert_eq!(ctx.failure(), Some("two failed"));
        assert_eq!(*calls.lock(), vec!["POST:one:one", "POST:two:two"]);
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        // cleared even though the entry failed
        assert!(cfg.middleware().is_none());
    }

    #[test]
    fn test_prefix_property_for_every_failure_position() {
        let names = ["one", "two", "three", "four"];
        for (idx, failing) in names.iter().enumerate() {
            let (registry, calls) = setup(&[*failing]);
            let mut cfg = settings();
            let mut resp = Response::new();
            let req = Request::builder().build();

            let ctx = run_phase(&registry, Context::new(), &mut resp, &req, &mut cfg, Phase::Pre);

            assert!(ctx.is_failed());
            let invoked: Vec<String> = calls
                .lock()
                .iter()
                .map(|c| c.split(':').nth(1).unwrap().to_string())
                .collect();
            assert_eq!(invoked, names[..=idx].to_vec());
        }
    }

    #[test]
    fn test_only_enabled_entries_run() {
        let (registry, calls) = setup(&[]);
        registry.enable(["three", "one"]).unwrap();
        let mut cfg = settings();
        let mut resp = Response::new();
        let req = Request::builder().build();

        run_phase(&registry, Context::new(), &mut resp, &req, &mut cfg, Phase::Pre);

        assert_eq!(*calls.lock(), vec!["PRE:one:one", "PRE:three:three"]);
    }

    #[test]
    fn test_failed_context_visits_every_entry() {
        let (registry, calls) = setup(&["two"]);
        let mut cfg = settings();
        let mut resp = Response::new();
        let req = Request::builder().build();
        let ctx = resp.set_error(Context::new(), StatusCode::NOT_FOUND, "not found");

        let ctx = run_phase(&registry, ctx, &mut resp, &req, &mut cfg, Phase::Post);

        assert!(ctx.is_failed());
        assert_eq!(
            *calls.lock(),
            vec!["POST:one:one", "POST:two:two", "POST:three:three", "POST:four:four"]
        );
    }

    #[test]
    fn test_empty_phase_returns_context_unchanged() {
        let registry = MiddlewareRegistry::new();
        let mut cfg = settings();
        let mut resp = Response::new();
        let req = Request::builder().build();
        let ctx = Context::new();
        let id = ctx.request_id();

        let ctx = run_phase(&registry, ctx, &mut resp, &req, &mut cfg, Phase::Pre);

        assert!(!ctx.is_failed());
        assert_eq!(ctx.request_id(), id);
    }
}
