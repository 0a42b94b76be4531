//! Error taxonomy shared by the catalogue, renderer, and pipeline.
//!
//! Every variant is fatal: the generator runs load, render, and write as one
//! pass and never produces a partial document. Messages name the offending
//! group, field, or template line so the binary can print them verbatim.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocgenError {
    /// An input file could not be read.
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The catalogue is not a JSON array of named objects.
    #[error("malformed catalogue: {0}")]
    CatalogueFormat(String),

    /// A requested group has no top-level record.
    #[error("unknown group '{0}'")]
    UnknownGroup(String),

    /// A group's `fields` are missing or contain a record that is not a symbol.
    #[error("group '{group}': {detail}")]
    Schema { group: String, detail: String },

    #[error("template syntax error: {0}")]
    TemplateSyntax(String),

    /// The template touched a variable, attribute, filter, or test that is not bound.
    #[error("undefined reference in template: {0}")]
    UndefinedReference(String),

    /// Any other evaluation failure (bad operand types, filter errors).
    #[error("template evaluation failed: {0}")]
    Render(String),

    #[error("config {}: {detail}", .path.display())]
    Config { path: PathBuf, detail: String },

    /// The rendered document could not be persisted.
    #[error("writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DocgenError {
    pub(crate) fn schema(group: &str, detail: impl Into<String>) -> Self {
        DocgenError::Schema {
            group: group.to_string(),
            detail: detail.into(),
        }
    }
}

pub type Result<T, E = DocgenError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_item() {
        let err = DocgenError::UnknownGroup("Commands".to_string());
        assert_eq!(err.to_string(), "unknown group 'Commands'");

        let err = DocgenError::schema("Config", "field #2 ('timeout') has no extends.view");
        assert_eq!(
            err.to_string(),
            "group 'Config': field #2 ('timeout') has no extends.view"
        );
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = DocgenError::Io {
            path: PathBuf::from("_build/doc.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().starts_with("reading _build/doc.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
