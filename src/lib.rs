//! Shared library for the symdoc reference generator.
//!
//! The crate turns a JSON symbol catalogue into a reference document. The
//! catalogue is an array of named groups; the `Config` and `Commands` groups
//! are extracted as sorted symbol views and bound into a Jinja template that
//! is rendered with strict undefined handling. Public functions here form the
//! contract the `symdoc` binary depends on: catalogue loading and lookup,
//! template rendering, configuration discovery, and the load/render/write
//! pipeline.

pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;

pub use catalog::{
    COMMANDS_GROUP, CONFIG_GROUP, CatalogueEntry, CatalogueStore, Symbol, SymbolDefect,
};
pub use config::{CONFIG_FILENAME, DocgenConfig};
pub use error::{DocgenError, Result};
pub use output::{Freshness, compare_existing, write_atomically};
pub use pipeline::{
    COMMANDS_BINDING, CONFIGS_BINDING, GenerateReport, Outcome, WriteMode, generate,
    render_document,
};
pub use render::{Bindings, DocumentRenderer, RenderOptions};
