//! Record types for the symbol catalogue (`_build/doc.json` by default).
//!
//! Top-level records stay as raw JSON objects because the catalogue carries
//! arbitrary role-specific fields. Symbols are the typed view the templates
//! consume; each one keeps its full source record in `origin` so templates
//! can reach fields the view does not lift out.

use serde::Serialize;
use serde_json::{Map, Value};

/// Group holding command symbols.
pub const COMMANDS_GROUP: &str = "Commands";
/// Group holding configuration symbols.
pub const CONFIG_GROUP: &str = "Config";

#[derive(Clone, Debug, PartialEq)]
/// One top-level catalogue record: a required `name` plus free-form fields.
pub struct CatalogueEntry {
    name: String,
    record: Map<String, Value>,
}

impl CatalogueEntry {
    /// Wrap a raw object, requiring a string `name`.
    ///
    /// Returns `None` when the name is missing or not a string; the loader
    /// turns that into a format error with the element position.
    pub fn from_record(record: Map<String, Value>) -> Option<Self> {
        let name = record.get("name")?.as_str()?.to_string();
        Some(Self { name, record })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up any attribute of the raw record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    /// The record exactly as it appeared in the catalogue.
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Template-facing view of one command or config field.
pub struct Symbol {
    pub name: String,
    /// Taken from `desc`; empty when the source omits it.
    pub description: String,
    /// Type label from `extends.view`.
    pub view: String,
    pub origin: Map<String, Value>,
}

/// Why a source record could not become a [`Symbol`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolDefect {
    NotAnObject,
    MissingName,
    BadDescription,
    MissingView,
}

impl SymbolDefect {
    pub fn describe(&self) -> &'static str {
        match self {
            SymbolDefect::NotAnObject => "is not an object",
            SymbolDefect::MissingName => "has no string 'name'",
            SymbolDefect::BadDescription => "has a 'desc' that is not a string",
            SymbolDefect::MissingView => "has no string 'extends.view'",
        }
    }
}

impl Symbol {
    /// Build the view from a source record inside a group's `fields`.
    pub fn from_record(record: &Value) -> Result<Self, SymbolDefect> {
        let origin = record.as_object().ok_or(SymbolDefect::NotAnObject)?;
        let name = origin
            .get("name")
            .and_then(Value::as_str)
            .ok_or(SymbolDefect::MissingName)?;
        let description = match origin.get("desc") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(desc)) => desc.clone(),
            Some(_) => return Err(SymbolDefect::BadDescription),
        };
        let view = origin
            .get("extends")
            .and_then(|extends| extends.get("view"))
            .and_then(Value::as_str)
            .ok_or(SymbolDefect::MissingView)?;

        Ok(Self {
            name: name.to_string(),
            description,
            view: view.to_string(),
            origin: origin.clone(),
        })
    }
}
