//! Layout + view template composition.
//!
//! A [`Layout`] is parsed standalone with the shared helper functions
//! registered. A [`View`] can only be produced from a layout: the layout's
//! environment is cloned and the view is parsed into the clone, so the view
//! sees every helper and can import macros from the layout by name.
//!
//! Executing a layout yields a [`LayoutRendered`] token which a view requires
//! to execute, so a view never renders ahead of its layout.
//!
//! ```rust
//! use tplserve::template::Layout;
//! use minijinja::context;
//!
//! let layout = Layout::parse("main.tpl", "{% macro page(body) %}<p>{{ body }}</p>{% endmacro %}")?;
//! let view = layout.parse_view(
//!     "index.html",
//!     r#"{% from "main.tpl" import page %}{{ page(title) }}"#,
//! )?;
//!
//! let mut out = Vec::new();
//! let rendered = layout.execute(&mut out, context! { title => "hi" })?;
//! view.execute(rendered, &mut out, context! { title => "hi" })?;
//! assert_eq!(out, b"<p>hi</p>");
//! # Ok::<(), tplserve::template::TemplateError>(())
//! ```

mod compositor;
mod funcs;

pub use compositor::{Layout, LayoutRendered, View};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: minijinja::Error,
    },
    #[error("exec {name}: {source}")]
    Exec {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}
