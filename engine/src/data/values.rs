//! Typed record values
//!
//! Records are persisted as free-form JSON keyed by field name. [`ValueBag`]
//! converts that JSON once, using the schema, into a tagged [`Value`] per
//! field. Keys that have no schema field, nulls, and shapes that make no sense
//! for the field's type are left out; the engine treats them as absent.

use std::collections::HashMap;

use serde::Serialize;

use super::error::{DataError, json_kind};
use super::types::{FieldDef, FieldType, RecordRow};

/// A picked location: display name plus optional coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// A single field value, tagged by the kind of field it belongs to
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Numeric(String),
    DropdownChoice(String),
    DateString(String),
    Location(Location),
    ImageUri(String),
}

impl Value {
    /// Textual form of the value. Locations yield their name.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s)
            | Self::Numeric(s)
            | Self::DropdownChoice(s)
            | Self::DateString(s)
            | Self::ImageUri(s) => s,
            Self::Location(location) => &location.name,
        }
    }

    pub fn as_location(&self) -> Option<&Location> {
        match self {
            Self::Location(location) => Some(location),
            _ => None,
        }
    }

    /// Convert a raw JSON value for a field of the given type
    fn from_json(field_type: &FieldType, raw: &serde_json::Value) -> Option<Self> {
        let tag: fn(String) -> Self = match field_type {
            FieldType::Location => return location_from_json(raw).map(Self::Location),
            FieldType::Numeric | FieldType::Number => Self::Numeric,
            FieldType::Dropdown => Self::DropdownChoice,
            FieldType::Date => Self::DateString,
            FieldType::Image => Self::ImageUri,
            FieldType::Text | FieldType::Multiline | FieldType::Other(_) => Self::Text,
        };
        scalar_text(raw).map(tag)
    }
}

/// String form of a scalar JSON value; `None` for null, arrays and objects
fn scalar_text(raw: &serde_json::Value) -> Option<String> {
    match raw {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            None
        }
    }
}

fn location_from_json(raw: &serde_json::Value) -> Option<Location> {
    match raw {
        serde_json::Value::Object(map) => Some(Location {
            name: map.get("name").and_then(scalar_text).unwrap_or_default(),
            lat: map.get("lat").and_then(coordinate),
            lng: map.get("lng").and_then(coordinate),
        }),
        // A plain string has no `name`; keep it as an unnamed location
        serde_json::Value::String(_) => Some(Location {
            name: String::new(),
            lat: None,
            lng: None,
        }),
        _ => None,
    }
}

/// Coordinates arrive as numbers or as numeric strings (from route params)
fn coordinate(raw: &serde_json::Value) -> Option<f64> {
    match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Values of one record, keyed by field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueBag {
    values: HashMap<String, Value>,
}

impl ValueBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Value stored under a field name; missing keys are simply absent
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert a raw record value object using the schema.
    ///
    /// `null` is an empty bag. Any other non-object is an error.
    pub fn from_json(fields: &[FieldDef], raw: &serde_json::Value) -> Result<Self, DataError> {
        let map = match raw {
            serde_json::Value::Null => return Ok(Self::new()),
            serde_json::Value::Object(map) => map,
            other => return Err(DataError::not_an_object("record values", other)),
        };

        let mut bag = Self::new();
        for field in fields {
            let Some(raw_value) = map.get(&field.name) else {
                continue;
            };
            match Value::from_json(&field.field_type, raw_value) {
                Some(value) => bag.insert(field.name.clone(), value),
                None if !raw_value.is_null() => {
                    tracing::debug!(
                        field = %field.name,
                        field_type = %field.field_type,
                        found = json_kind(raw_value),
                        "Skipping value with unexpected shape"
                    );
                }
                None => {}
            }
        }

        tracing::trace!(
            fields = fields.len(),
            raw_keys = map.len(),
            values = bag.len(),
            "Converted record values"
        );
        Ok(bag)
    }

    /// Values of an optional record; no record is an empty bag
    pub fn from_record(fields: &[FieldDef], record: Option<&RecordRow>) -> Result<Self, DataError> {
        match record {
            Some(row) => Self::from_json(fields, &row.values),
            None => Ok(Self::new()),
        }
    }
}
