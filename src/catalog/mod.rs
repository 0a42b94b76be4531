//! Symbol catalogue wiring.
//!
//! This module wraps the JSON catalogue (an array of named groups) so the
//! renderer receives typed, sorted symbol views. Use `CatalogueStore` for
//! loading and lookup; `Symbol` is the per-field view bound into templates.

pub mod index;
pub mod model;

pub use index::CatalogueStore;
pub use model::{COMMANDS_GROUP, CONFIG_GROUP, CatalogueEntry, Symbol, SymbolDefect};
