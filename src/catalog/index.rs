//! Name-indexed view of a loaded symbol catalogue.
//!
//! The store keeps every top-level record in document order and a lookup
//! keyed by `name`. Sorted symbol views are derived on demand; the loaded
//! data is never mutated after `load`.

use crate::catalog::model::{COMMANDS_GROUP, CONFIG_GROUP, CatalogueEntry, Symbol};
use crate::error::{DocgenError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug)]
/// Catalogue records plus a lookup from group name to record position.
pub struct CatalogueStore {
    entries: Vec<CatalogueEntry>,
    by_name: BTreeMap<String, usize>,
}

impl CatalogueStore {
    /// Read and index the catalogue at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| DocgenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), groups = store.len(), "loaded catalogue");
        Ok(store)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)
            .map_err(|err| DocgenError::CatalogueFormat(err.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| DocgenError::CatalogueFormat(err.to_string()))?;
        Self::from_value(value)
    }

    /// Index an already-parsed document.
    ///
    /// Repeated names are not rejected: the lookup keeps the last record with
    /// a given name, and a warning is logged so the condition is visible.
    pub fn from_value(value: Value) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(DocgenError::CatalogueFormat(format!(
                    "expected a top-level array, found {}",
                    kind_of(&other)
                )));
            }
        };

        let mut entries = Vec::with_capacity(items.len());
        let mut by_name = BTreeMap::new();
        for (idx, item) in items.into_iter().enumerate() {
            let record = match item {
                Value::Object(record) => record,
                other => {
                    return Err(DocgenError::CatalogueFormat(format!(
                        "element #{idx} is {}, expected an object",
                        kind_of(&other)
                    )));
                }
            };
            let entry = CatalogueEntry::from_record(record).ok_or_else(|| {
                DocgenError::CatalogueFormat(format!("element #{idx} has no string 'name'"))
            })?;
            if let Some(previous) = by_name.insert(entry.name().to_string(), idx) {
                warn!(
                    name = entry.name(),
                    previous, current = idx, "duplicate group name; keeping the later record"
                );
            }
            entries.push(entry);
        }

        Ok(Self { entries, by_name })
    }

    /// Raw top-level record for `name`.
    pub fn find(&self, name: &str) -> Result<&CatalogueEntry> {
        self.by_name
            .get(name)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| DocgenError::UnknownGroup(name.to_string()))
    }

    /// Symbols of `group`, sorted ascending by name.
    ///
    /// Any record that cannot become a [`Symbol`] fails the whole call; the
    /// error names the element position so the catalogue can be fixed.
    pub fn fields(&self, group: &str) -> Result<Vec<Symbol>> {
        let entry = self.find(group)?;
        let records = match entry.get("fields") {
            Some(Value::Array(records)) => records,
            Some(other) => {
                return Err(DocgenError::schema(
                    group,
                    format!("'fields' is {}, expected an array", kind_of(other)),
                ));
            }
            None => return Err(DocgenError::schema(group, "has no 'fields'")),
        };

        let mut symbols = records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                Symbol::from_record(record).map_err(|defect| {
                    let label = record
                        .get("name")
                        .and_then(Value::as_str)
                        .map(|name| format!(" ('{name}')"))
                        .unwrap_or_default();
                    DocgenError::schema(
                        group,
                        format!("field #{idx}{label} {}", defect.describe()),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;
        symbols.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(group, count = symbols.len(), "extracted symbols");
        Ok(symbols)
    }

    pub fn commands(&self) -> Result<Vec<Symbol>> {
        self.fields(COMMANDS_GROUP)
    }

    pub fn configs(&self) -> Result<Vec<Symbol>> {
        self.fields(CONFIG_GROUP)
    }

    /// Group names in stable (sorted) order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// All records in document order, duplicates included.
    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
