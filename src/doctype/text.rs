use std::fs;
use std::io::Write;
use std::path::Path;

use axum::http::StatusCode;
use tracing::{debug, error};

use super::{resolve_view_path, DoctypeEngine, Document};
use crate::config::RequestSettings;
use crate::context::Context;
use crate::request::Request;
use crate::response::Response;

const DOCTYPE: &str = "text";
const TEXT_EXT: &str = "txt";

/// Serves `<path>.txt` from the docroot as plain text, unprocessed
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEngine;

impl DoctypeEngine for TextEngine {
    fn doctype(&self) -> &str {
        DOCTYPE
    }

    fn handle(
        &self,
        ctx: Context,
        resp: &mut Response,
        req: &Request,
        cfg: &RequestSettings,
        docroot: &Path,
    ) -> Context {
        resp.set_content_type(mime::TEXT_PLAIN_UTF_8);

        let doc = Document::locate(docroot, &resolve_view_path(req, cfg), TEXT_EXT);
        let content = match fs::read(doc.path()) {
            Ok(content) => content,
            Err(err) => {
                debug!(
                    request_id = %ctx.request_id(),
                    file = %doc.path().display(),
                    error = %err,
                    "text document not readable"
                );
                return resp.set_error(ctx, StatusCode::NOT_FOUND, "file not found");
            }
        };

        resp.set_view(doc.name());
        if let Err(err) = resp.write_all(&content) {
            error!(request_id = %ctx.request_id(), error = %err, "write response");
            return resp.set_error(ctx, StatusCode::INTERNAL_SERVER_ERROR, "write response");
        }

        resp.set_status(StatusCode::OK);
        ctx
    }

    fn handle_error(
        &self,
        ctx: Context,
        resp: &mut Response,
        _req: &Request,
        _cfg: &RequestSettings,
        _docroot: &Path,
    ) -> Context {
        resp.set_content_type(mime::TEXT_PLAIN_UTF_8);

        let line = format!(
            "{} {}\n",
            resp.status().as_u16(),
            resp.error().unwrap_or("error")
        );
        resp.reset_body();
        if let Err(err) = resp.write_all(line.as_bytes()) {
            error!(request_id = %ctx.request_id(), error = %err, "write response");
            return resp.set_error(ctx, StatusCode::INTERNAL_SERVER_ERROR, "write response");
        }
        ctx
    }
}
