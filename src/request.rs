//! Incoming request as seen by middleware and doctype engines.

use axum::http::Method;

#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
}

#[bon::bon]
impl Request {
    /// Build a request; the path is cleaned on construction.
    #[builder]
    pub fn new(
        #[builder(default = Method::GET)] method: Method,
        #[builder(into, default = String::from("/"))] path: String,
        #[builder(into)] query: Option<String>,
    ) -> Self {
        Self {
            method,
            path: clean_path(&path),
            query,
        }
    }
}

impl Request {
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Cleaned, rooted URL path
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.path == "/"
    }
}

/// Normalize a URL path to a rooted form without `.`/`..` segments or
/// repeated slashes. `..` never climbs above the root.
pub fn clean_path(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
}
