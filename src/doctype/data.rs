use serde::Serialize;

use crate::config::RequestSettings;
use crate::request::Request;
use crate::response::Response;

/// Payload bound to the layout and view on the normal path
#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub site: String,
    pub path: String,
    pub view: String,
}

impl PageData {
    pub fn new(cfg: &RequestSettings, req: &Request, view: &str) -> Self {
        Self {
            site: cfg.config().site.name.clone(),
            path: req.path().to_string(),
            view: view.to_string(),
        }
    }
}

/// Payload bound to the error layout
#[derive(Debug, Clone, Serialize)]
pub struct ErrorData {
    pub site: String,
    pub path: String,
    pub status: u16,
    pub message: String,
}

impl ErrorData {
    pub fn new(cfg: &RequestSettings, req: &Request, resp: &Response) -> Self {
        let status = resp.status();
        let message = resp
            .error()
            .or(status.canonical_reason())
            .unwrap_or("error")
            .to_string();

        Self {
            site: cfg.config().site.name.clone(),
            path: req.path().to_string(),
            status: status.as_u16(),
            message,
        }
    }
}
