//! Document-type engines.
//!
//! A site is served by exactly one engine, picked by its doctype name from an
//! [`EngineRegistry`]. Every engine has a primary path ([`DoctypeEngine::handle`])
//! and an error path ([`DoctypeEngine::handle_error`]) that runs whenever the
//! request context ends up failed.
//!
//! ## Built-in engines
//!
//! - [`TemplatesEngine`] (`templates`) - `main.tpl` layout + `<path>.html` view
//! - [`TextEngine`] (`text`) - `<path>.txt` served verbatim

mod data;
mod templates;
mod text;

#[cfg(test)]
pub(crate) mod testing;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::RequestSettings;
use crate::context::Context;
use crate::registry::Registry;
use crate::request::{clean_path, Request};
use crate::response::Response;

pub use data::{ErrorData, PageData};
pub use templates::TemplatesEngine;
pub use text::TextEngine;

pub type EngineRegistry = Registry<dyn DoctypeEngine>;

const DEFAULT_VIEW: &str = "index";

pub trait DoctypeEngine: Send + Sync {
    /// Name the engine is registered and resolved under
    fn doctype(&self) -> &str;

    /// Primary rendering path
    fn handle(
        &self,
        ctx: Context,
        resp: &mut Response,
        req: &Request,
        cfg: &RequestSettings,
        docroot: &Path,
    ) -> Context;

    /// Error rendering path, entered with a failed context
    fn handle_error(
        &self,
        ctx: Context,
        resp: &mut Response,
        req: &Request,
        cfg: &RequestSettings,
        docroot: &Path,
    ) -> Context;
}

/// Registry with every built-in engine
pub fn builtin() -> EngineRegistry {
    let registry = EngineRegistry::new();

    let templates = TemplatesEngine;
    registry.register(templates.doctype().to_string(), Arc::new(templates), &[]);

    let text = TextEngine;
    registry.register(text.doctype().to_string(), Arc::new(text), &[]);

    registry
}

/// View path for a request, without leading slash or extension.
///
/// The request path wins; the root falls back to the configured view path,
/// then to `index`.
pub fn resolve_view_path(req: &Request, cfg: &RequestSettings) -> String {
    let mut path = req.path().to_string();
    if path == "/" {
        path = clean_path(cfg.view_path());
    }
    if path == "/" {
        return DEFAULT_VIEW.to_string();
    }
    path.trim_start_matches('/').to_string()
}

/// File under a docroot, named relative to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    path: PathBuf,
}

impl Document {
    /// `<docroot>/<stem>.<ext>`; `stem` may contain `/`.
    pub fn locate(docroot: &Path, stem: &str, ext: &str) -> Self {
        let name = format!("{stem}.{ext}");
        Self {
            path: docroot.join(&name),
            name,
        }
    }

    /// Name relative to the docroot (also the template name)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn read_to_string(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}
