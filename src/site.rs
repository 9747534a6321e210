//! Request pipeline for one site.
//!
//! Each request flows through the PRE middleware phase, the configured
//! doctype engine, then the POST phase. A failure before POST skips the
//! remaining handling and hands the response to the engine's error path; POST
//! then runs on whatever was served. A POST failure on a clean response also
//! renders the error path.

use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::{Config, RequestSettings};
use crate::context::Context;
use crate::doctype::{self, EngineRegistry};
use crate::middleware::{self, run_phase, MiddlewareRegistry, Phase};
use crate::registry::RegistryError;
use crate::request::Request;
use crate::response::Response;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("middleware: {0}")]
    Middleware(#[from] RegistryError),
}

pub struct Site {
    config: Arc<Config>,
    engines: EngineRegistry,
    middleware: MiddlewareRegistry,
}

impl Site {
    /// Site with the built-in engines and middleware, enabling the
    /// middleware named in the configuration.
    pub fn new(config: Arc<Config>) -> Result<Self, SiteError> {
        let engines = doctype::builtin();
        let middleware = middleware::builtin(&config.middleware);
        middleware.enable(&config.middleware.enabled)?;
        Ok(Self::with_registries(config, engines, middleware))
    }

    /// Site over caller-provided registries, used as-is
    pub fn with_registries(
        config: Arc<Config>,
        engines: EngineRegistry,
        middleware: MiddlewareRegistry,
    ) -> Self {
        Self {
            config,
            engines,
            middleware,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engines(&self) -> &EngineRegistry {
        &self.engines
    }

    pub fn middleware(&self) -> &MiddlewareRegistry {
        &self.middleware
    }

    /// Run the full pipeline for `req`.
    pub fn serve(&self, req: &Request) -> (Context, Response) {
        let mut resp = Response::new();
        let mut cfg = RequestSettings::new(Arc::clone(&self.config));
        let docroot = self.config.site.docroot.as_path();

        let ctx = Context::new();
        debug!(request_id = %ctx.request_id(), method = %req.method(), path = %req.path(), "serving request");

        let mut ctx = run_phase(&self.middleware, ctx, &mut resp, req, &mut cfg, Phase::Pre);

        let engine = match self.engines.resolve(&self.config.site.doctype) {
            Ok(engine) => engine,
            Err(err) => {
                error!(
                    request_id = %ctx.request_id(),
                    doctype = %self.config.site.doctype,
                    error = %err,
                    "doctype engine not found"
                );
                resp.reset_body();
                let ctx = resp.set_error(
                    ctx,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "doctype engine not found",
                );
                let ctx = run_phase(&self.middleware, ctx, &mut resp, req, &mut cfg, Phase::Post);
                return (ctx, resp);
            }
        };

        if !ctx.is_failed() {
            ctx = engine.handle(ctx, &mut resp, req, &cfg, docroot);
        }
        if ctx.is_failed() {
            ctx = engine.handle_error(ctx, &mut resp, req, &cfg, docroot);
        }

        // POST sees every outcome, error pages included.
        let served_clean = !ctx.is_failed();
        ctx = run_phase(&self.middleware, ctx, &mut resp, req, &mut cfg, Phase::Post);
        if served_clean && ctx.is_failed() {
            ctx = engine.handle_error(ctx, &mut resp, req, &cfg, docroot);
        }

        (ctx, resp)
    }
}
