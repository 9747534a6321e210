//! Fixtures for engine tests: a temporary docroot and a one-shot runner.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use super::DoctypeEngine;
use crate::config::{Config, RequestSettings};
use crate::context::Context;
use crate::request::Request;
use crate::response::Response;

/// Docroot populated with `(relative path, content)` pairs
pub fn docroot(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

pub fn settings(view_path: &str) -> RequestSettings {
    let mut config = Config::default();
    config.view.path = view_path.to_string();
    RequestSettings::new(Arc::new(config))
}

/// Run `handle`, and `handle_error` if the context came back failed
pub fn serve(engine: &dyn DoctypeEngine, dir: &TempDir, path: &str) -> (Context, Response) {
    let cfg = settings("");
    let req = Request::builder().path(path).build();
    let mut resp = Response::new();

    let mut ctx = engine.handle(Context::new(), &mut resp, &req, &cfg, dir.path());
    if ctx.is_failed() {
        ctx = engine.handle_error(ctx, &mut resp, &req, &cfg, dir.path());
    }
    (ctx, resp)
}

pub fn body(resp: &Response) -> String {
    String::from_utf8(resp.body().to_vec()).unwrap()
}
