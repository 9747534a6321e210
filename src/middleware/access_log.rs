use tracing::{debug, info};

use super::{Middleware, Phase};
use crate::config::RequestSettings;
use crate::context::Context;
use crate::request::Request;
use crate::response::Response;

/// Logs the request on PRE and the served response on POST
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLog;

impl Middleware for AccessLog {
    fn name(&self) -> &str {
        "access_log"
    }

    fn action(
        &self,
        ctx: Context,
        resp: &mut Response,
        req: &Request,
        cfg: &RequestSettings,
        phase: Phase,
    ) -> Context {
        match phase {
            Phase::Pre => debug!(
                request_id = %ctx.request_id(),
                method = %req.method(),
                path = req.path(),
                middleware = cfg.middleware(),
                "request received"
            ),
            Phase::Post => info!(
                request_id = %ctx.request_id(),
                method = %req.method(),
                path = req.path(),
                status = resp.status().as_u16(),
                bytes = resp.size(),
                layout = resp.layout(),
                view = resp.view(),
                elapsed_ms = ctx.elapsed().as_millis() as u64,
                "request served"
            ),
        }
        ctx
    }
}
