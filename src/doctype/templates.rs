use std::path::Path;

use axum::http::StatusCode;
use serde::Serialize;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::{resolve_view_path, DoctypeEngine, Document, ErrorData, PageData};
use crate::config::RequestSettings;
use crate::context::Context;
use crate::request::Request;
use crate::response::Response;
use crate::template::{Layout, TemplateError, View};

const DOCTYPE: &str = "templates";
const MAIN_LAYOUT: &str = "main";
const ERROR_LAYOUT: &str = "error";
const LAYOUT_EXT: &str = "tpl";
const VIEW_EXT: &str = "html";

/// Renders `main.tpl` followed by the request's `.html` view
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplatesEngine;

impl DoctypeEngine for TemplatesEngine {
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
        debug!(request_id = %ctx.request_id(), docroot = %docroot.display(), "templates handle");
        resp.set_content_type(mime::TEXT_HTML_UTF_8);

        let layout = Document::locate(docroot, MAIN_LAYOUT, LAYOUT_EXT);
        if !layout.exists() {
            error!(
                request_id = %ctx.request_id(),
                file = %layout.path().display(),
                "main template not found"
            );
            return resp.set_error(
                ctx,
                StatusCode::INTERNAL_SERVER_ERROR,
                "main template not found",
            );
        }

        let view_path = resolve_view_path(req, cfg);
        let view = Document::locate(docroot, &view_path, VIEW_EXT);
        if !view.exists() {
            warn!(
                request_id = %ctx.request_id(),
                file = %view.path().display(),
                "view template not found"
            );
            return resp.set_error(ctx, StatusCode::NOT_FOUND, "not found");
        }

        let data = PageData::new(cfg, req, &view_path);
        match compose(ctx.request_id(), resp, &layout, Some(&view), &data) {
            Ok(()) => {
                resp.set_status(StatusCode::OK);
                ctx
            }
            Err(failure) => resp.set_error(
                ctx,
                StatusCode::INTERNAL_SERVER_ERROR,
                failure.message(),
            ),
        }
    }

    fn handle_error(
        &self,
        ctx: Context,
        resp: &mut Response,
        req: &Request,
        cfg: &RequestSettings,
        docroot: &Path,
    ) -> Context {
        debug!(
            request_id = %ctx.request_id(),
            status = resp.status().as_u16(),
            failure = ctx.failure(),
            "templates handle error"
        );
        resp.set_content_type(mime::TEXT_HTML_UTF_8);
        resp.reset_body();

        let layout = Document::locate(docroot, ERROR_LAYOUT, LAYOUT_EXT);
        if !layout.exists() {
            error!(
                request_id = %ctx.request_id(),
                file = %layout.path().display(),
                "error template not found"
            );
            return resp.set_error(
                ctx,
                StatusCode::INTERNAL_SERVER_ERROR,
                "error template not found",
            );
        }

        // The error page keeps the status of the failure it reports.
        let data = ErrorData::new(cfg, req, resp);
        match compose(ctx.request_id(), resp, &layout, None, &data) {
            Ok(()) => ctx,
            Err(failure) => resp.set_error(
                ctx,
                StatusCode::INTERNAL_SERVER_ERROR,
                failure.message(),
            ),
        }
    }
}

/// Composition step that failed; its message is all the client sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    ParseMain,
    ParseView,
    ExecMain,
    ExecView,
}

impl Failure {
    fn message(self) -> &'static str {
        match self {
            Failure::ParseMain => "parse main template",
            Failure::ParseView => "parse view template",
            Failure::ExecMain => "exec main template",
            Failure::ExecView => "exec view template",
        }
    }

    fn log(self, request_id: Uuid, err: &TemplateError) -> Self {
        error!(%request_id, error = %err, "{}", self.message());
        self
    }
}

/// Parse the layout (and view, if any), then execute both into `resp`.
fn compose<S: Serialize>(
    request_id: Uuid,
    resp: &mut Response,
    layout_doc: &Document,
    view_doc: Option<&Document>,
    data: &S,
) -> Result<(), Failure> {
    let layout = parse_layout(layout_doc).map_err(|err| Failure::ParseMain.log(request_id, &err))?;

    let view = view_doc
        .map(|doc| parse_view(&layout, doc))
        .transpose()
        .map_err(|err| Failure::ParseView.log(request_id, &err))?;

    resp.set_layout(layout.name());
    debug!(%request_id, template = layout.name(), "exec main");
    let rendered = layout
        .execute(&mut *resp, data)
        .map_err(|err| Failure::ExecMain.log(request_id, &err))?;

    if let Some(view) = view {
        resp.set_view(view.name());
        debug!(%request_id, template = view.name(), "exec view");
        view.execute(rendered, &mut *resp, data)
            .map_err(|err| Failure::ExecView.log(request_id, &err))?;
    }

    Ok(())
}

fn parse_layout(doc: &Document) -> Result<Layout, TemplateError> {
    let source = read(doc)?;
    Layout::parse(doc.name(), source)
}

fn parse_view(layout: &Layout, doc: &Document) -> Result<View, TemplateError> {
    let source = read(doc)?;
    layout.parse_view(doc.name(), source)
}

fn read(doc: &Document) -> Result<String, TemplateError> {
    doc.read_to_string().map_err(|source| TemplateError::Read {
        name: doc.name().to_string(),
        source,
    })
}
