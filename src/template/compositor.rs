use std::io;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use super::{funcs, TemplateError};

/// Outer template, parsed standalone
#[derive(Debug)]
pub struct Layout {
    env: Environment<'static>,
    name: String,
}

/// Inner template, parsed into a clone of its layout's environment
#[derive(Debug)]
pub struct View {
    env: Environment<'static>,
    name: String,
}

/// Proof that a layout has been executed
#[derive(Debug)]
#[must_use]
pub struct LayoutRendered {
    _private: (),
}

impl Layout {
    /// Parse layout source under `name` with the shared helpers registered.
    pub fn parse(
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let name = name.into();

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        funcs::register(&mut env);

        env.add_template_owned(name.clone(), source.into())
            .map_err(|source| TemplateError::Parse {
                name: name.clone(),
                source,
            })?;

        Ok(Self { env, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `name` is defined in this layout's namespace
    pub fn contains(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Clone this layout's namespace and parse the view into the clone.
    ///
    /// The layout itself is left untouched.
    pub fn parse_view(
        &self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<View, TemplateError> {
        let name = name.into();

        let mut env = self.env.clone();
        env.add_template_owned(name.clone(), source.into())
            .map_err(|source| TemplateError::Parse {
                name: name.clone(),
                source,
            })?;

        Ok(View { env, name })
    }

    /// Render the layout into `writer`.
    pub fn execute<W, S>(&self, writer: W, data: S) -> Result<LayoutRendered, TemplateError>
    where
        W: io::Write,
        S: Serialize,
    {
        render(&self.env, &self.name, writer, data)?;
        Ok(LayoutRendered { _private: () })
    }
}

impl View {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the view into `writer`, after its layout.
    pub fn execute<W, S>(
        &self,
        _rendered: LayoutRendered,
        writer: W,
        data: S,
    ) -> Result<(), TemplateError>
    where
        W: io::Write,
        S: Serialize,
    {
        render(&self.env, &self.name, writer, data)
    }
}

fn render<W, S>(
    env: &Environment<'static>,
    name: &str,
    writer: W,
    data: S,
) -> Result<(), TemplateError>
where
    W: io::Write,
    S: Serialize,
{
    let exec = |source| TemplateError::Exec {
        name: name.to_string(),
        source,
    };

    let template = env.get_template(name).map_err(exec)?;
    template.render_captured_to(data, writer).map_err(exec)?;
    Ok(())
}
