//! Searchable item records.
//!
//! An [`Item`] is an insertion-ordered mapping from field name to JSON value.
//! Items are loaded from a JSON document, either as the root array or as an
//! array located by a JSON pointer (e.g. `/data/users`).

use crate::error::{Result, TypeaheadError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

/// One searchable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    /// Creates an item from a JSON object map.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Creates an item from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(TypeaheadError::data(format!(
                "Expected an object record, found {}",
                type_name(&other)
            ))),
        }
    }

    /// Returns the raw value of a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the display text of a field, if the field exists.
    pub fn field_text(&self, field: &str) -> Option<String> {
        self.0.get(field).map(value_text)
    }

    /// Iterates over fields in their original order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joins the text of every field value with a single space, in field order.
    pub fn values_text(&self) -> String {
        self.0.values().map(value_text).collect::<Vec<_>>().join(" ")
    }
}

/// Flattens a JSON value into the text used for matching and display.
///
/// Strings are verbatim, `null` is empty, arrays and nested objects join
/// their elements with `,`.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(values) => values.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(fields) => fields.values().map(value_text).collect::<Vec<_>>().join(","),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses items from JSON text.
///
/// With a pointer, the array is looked up with [`Value::pointer`]; without
/// one, the document root must be the array.
pub fn parse_items(json: &str, pointer: Option<&str>) -> Result<Vec<Item>> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| TypeaheadError::data(format!("Invalid JSON: {e}")))?;

    let array = match pointer {
        Some(ptr) if !ptr.is_empty() => document.pointer(ptr).ok_or_else(|| {
            TypeaheadError::data(format!("JSON pointer '{ptr}' does not match any value"))
        })?,
        _ => &document,
    };

    let Value::Array(records) = array else {
        return Err(TypeaheadError::data(format!(
            "Expected an array of records, found {}",
            type_name(array)
        )));
    };

    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            Item::from_value(record.clone())
                .map_err(|e| TypeaheadError::data(format!("Record {idx}: {e}")))
        })
        .collect()
}

/// Loads items from a JSON file.
pub fn load_items(path: &Path, pointer: Option<&str>) -> Result<Vec<Item>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TypeaheadError::data(format!("Failed to read {}: {e}", path.display()))
    })?;

    parse_items(&content, pointer)
        .map_err(|e| TypeaheadError::data(format!("{}: {e}", path.display())))
}

/// Checks that every item carries the primary key and that its values are unique.
pub fn validate_primary_key(items: &[Item], primary_key: &str) -> Result<()> {
    if primary_key.is_empty() {
        return Err(TypeaheadError::config("Primary key field name is empty"));
    }

    let mut seen = HashSet::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let key = item.field_text(primary_key).ok_or_else(|| {
            TypeaheadError::data(format!(
                "Record {idx} has no primary key field '{primary_key}'"
            ))
        })?;
        if !seen.insert(key.clone()) {
            return Err(TypeaheadError::data(format!(
                "Duplicate primary key '{primary_key}' value '{key}' in record {idx}"
            )));
        }
    }

    Ok(())
}
