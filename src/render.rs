//! Strict template rendering for reference documents.
//!
//! Templates use Jinja syntax (via minijinja). Undefined variables and
//! attributes are hard errors in every position, including `if` tests and
//! `for` loops, so a typo in a template can never blank out a section of the
//! generated document. Block trimming matches the Jinja `trim_blocks` and
//! `lstrip_blocks` switches so control lines leave no stray blank lines.

use crate::error::{DocgenError, Result};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior, Value};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

const DEFAULT_TEMPLATE_NAME: &str = "document";

/// Whitespace handling applied when compiling a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Drop the first newline after a block tag.
    pub trim_blocks: bool,
    /// Strip leading whitespace on lines that start with a block tag.
    pub lstrip_blocks: bool,
    /// Keep a single trailing newline at the end of the template.
    pub keep_trailing_newline: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            trim_blocks: true,
            lstrip_blocks: true,
            keep_trailing_newline: false,
        }
    }
}

/// Named values visible to a template.
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    values: BTreeMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to any serializable value, replacing an earlier binding.
    pub fn insert<T: Serialize + ?Sized>(&mut self, name: impl Into<String>, value: &T) {
        self.values.insert(name.into(), Value::from_serialize(value));
    }

    pub fn with<T: Serialize + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
        self.insert(name, value);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Compiles a template and evaluates it against a set of bindings.
#[derive(Clone, Debug, Default)]
pub struct DocumentRenderer {
    options: RenderOptions,
}

impl DocumentRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render `template_text` with `bindings`.
    pub fn render(&self, template_text: &str, bindings: &Bindings) -> Result<String> {
        self.render_named(DEFAULT_TEMPLATE_NAME, template_text, bindings)
    }

    /// Render with a template name that appears in error locations
    /// (usually the template's file name).
    ///
    /// The template is parsed once; the full text is only returned when
    /// evaluation finishes, so a failure never yields partial output.
    pub fn render_named(
        &self,
        name: &str,
        template_text: &str,
        bindings: &Bindings,
    ) -> Result<String> {
        let env = self.environment();
        let template = env
            .template_from_named_str(name, template_text)
            .map_err(|err| DocgenError::TemplateSyntax(err.to_string()))?;
        debug!(
            template = name,
            bindings = ?bindings.names().collect::<Vec<_>>(),
            "rendering template"
        );
        template.render(&bindings.values).map_err(classify)
    }

    fn environment<'source>(&self) -> Environment<'source> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(self.options.trim_blocks);
        env.set_lstrip_blocks(self.options.lstrip_blocks);
        env.set_keep_trailing_newline(self.options.keep_trailing_newline);
        // Output is Markdown or plain text; never HTML-escape.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env
    }
}

fn classify(err: minijinja::Error) -> DocgenError {
    let message = err.to_string();
    match err.kind() {
        ErrorKind::SyntaxError | ErrorKind::BadEscape => DocgenError::TemplateSyntax(message),
        ErrorKind::UndefinedError
        | ErrorKind::UnknownFilter
        | ErrorKind::UnknownTest
        | ErrorKind::UnknownFunction
        | ErrorKind::UnknownMethod => DocgenError::UndefinedReference(message),
        _ => DocgenError::Render(message),
    }
}
