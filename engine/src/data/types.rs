//! Form schema and record types
//!
//! Field definitions are created and edited by the form builder; the filter
//! engine only ever reads them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::DataError;
use crate::utils::string::{clean_options, parse_option_list};

// ============================================================================
// FIELD TYPE
// ============================================================================

/// Storage type of a schema field, as persisted by the form builder.
///
/// `Numeric` and `Number` are both in use for historical reasons. Anything
/// not recognised is kept verbatim in `Other` and is never targeted by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Multiline,
    Dropdown,
    Location,
    Image,
    Numeric,
    Number,
    Date,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Multiline => "multiline",
            Self::Dropdown => "dropdown",
            Self::Location => "location",
            Self::Image => "image",
            Self::Numeric => "numeric",
            Self::Number => "number",
            Self::Date => "date",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "text" => Self::Text,
            "multiline" => Self::Multiline,
            "dropdown" => Self::Dropdown,
            "location" => Self::Location,
            "image" => Self::Image,
            "numeric" => Self::Numeric,
            "number" => Self::Number,
            "date" => Self::Date,
            _ => Self::Other(raw),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FIELD OPTIONS
// ============================================================================

/// Dropdown options, stored either as a list or as one comma-joined string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOptions {
    List(Vec<String>),
    Joined(String),
}

impl FieldOptions {
    /// Trimmed, non-empty options in their stored order
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::List(items) => clean_options(items.iter().map(String::as_str)),
            Self::Joined(raw) => parse_option_list(raw),
        }
    }
}

// ============================================================================
// FIELD DEFINITION
// ============================================================================

/// One typed slot in a form's schema.
///
/// `name` is the key into record value bags and is unique within a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub id: i64,
    pub name: String,
    pub field_type: FieldType,
    #[serde(default, deserialize_with = "bool_or_null")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<FieldOptions>,
    /// Marks a text field as holding numbers, independent of `field_type`
    #[serde(default, deserialize_with = "bool_or_null")]
    pub is_num: bool,
}

impl FieldDef {
    pub fn new(id: i64, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id,
            name: name.into(),
            field_type,
            required: false,
            options: None,
            is_num: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn numeric_flag(mut self) -> Self {
        self.is_num = true;
        self
    }

    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Whether any of the three numeric signals is set on this field
    pub fn is_numeric(&self) -> bool {
        self.is_num || matches!(self.field_type, FieldType::Numeric | FieldType::Number)
    }

    /// Dropdown options, empty when the field has none
    pub fn option_list(&self) -> Vec<String> {
        self.options
            .as_ref()
            .map(FieldOptions::to_list)
            .unwrap_or_default()
    }

    /// Parse a schema (`FieldDef[]`) as returned by the form layer
    pub fn parse_list(json: &str) -> Result<Vec<Self>, DataError> {
        serde_json::from_str(json).map_err(|e| DataError::invalid_json("field list", e))
    }
}

fn bool_or_null<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

// ============================================================================
// RECORD
// ============================================================================

/// One saved value set for a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub id: i64,
    pub form_id: i64,
    #[serde(default)]
    pub values: serde_json::Value,
    #[serde(default)]
    pub username: String,
}

impl RecordRow {
    /// The most recently saved record (records are listed oldest first)
    pub fn latest(rows: &[RecordRow]) -> Option<&RecordRow> {
        rows.last()
    }

    /// Parse a record list (`RecordRow[]`) as returned by the form layer
    pub fn parse_list(json: &str) -> Result<Vec<Self>, DataError> {
        serde_json::from_str(json).map_err(|e| DataError::invalid_json("record list", e))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_field_type_round_trips_known_and_unknown() {
        let known: FieldType = serde_json::from_value(json!("number")).unwrap();
        assert_eq!(known, FieldType::Number);

        let other: FieldType = serde_json::from_value(json!("signature")).unwrap();
        assert_eq!(other, FieldType::Other("signature".to_string()));
        assert_eq!(serde_json::to_value(&other).unwrap(), json!("signature"));
    }

    #[test]
    fn test_field_def_parses_backend_shape() {
        let json = r#"[
            {"id": 7, "form_id": 2, "name": "colour", "field_type": "dropdown",
             "required": true, "options": "Red, Green", "is_num": null},
            {"id": 8, "form_id": 2, "name": "age", "field_type": "text",
             "required": false, "is_num": true}
        ]"#;
        let fields = FieldDef::parse_list(json).unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field_type, FieldType::Dropdown);
        assert!(fields[0].required);
        assert!(!fields[0].is_num);
        assert_eq!(fields[0].option_list(), vec!["Red", "Green"]);
        assert!(fields[1].is_num);
        assert!(fields[1].is_numeric());
        assert!(fields[1].option_list().is_empty());
    }

    #[test]
    fn test_field_def_options_as_array() {
        let field: FieldDef = serde_json::from_value(json!({
            "id": 1, "name": "size", "field_type": "dropdown",
            "required": false, "options": ["S", " M ", ""]
        }))
        .unwrap();
        assert_eq!(field.option_list(), vec!["S", "M"]);
    }

    #[test]
    fn test_is_numeric_signals() {
        assert!(FieldDef::new(1, "a", FieldType::Numeric).is_numeric());
        assert!(FieldDef::new(2, "b", FieldType::Number).is_numeric());
        assert!(FieldDef::new(3, "c", FieldType::Text).numeric_flag().is_numeric());
        assert!(!FieldDef::new(4, "d", FieldType::Text).is_numeric());
    }

    #[test]
    fn test_invalid_field_list() {
        let err = FieldDef::parse_list("{\"not\": \"a list\"}").unwrap_err();
        assert!(matches!(err, DataError::InvalidJson { what: "field list", .. }));
    }

    #[test]
    fn test_latest_record_is_last() {
        let rows = RecordRow::parse_list(
            r#"[
                {"id": 1, "form_id": 3, "values": {"a": "old"}, "username": "u"},
                {"id": 2, "form_id": 3, "values": {"a": "new"}, "username": "u"}
            ]"#,
        )
        .unwrap();
        assert_eq!(RecordRow::latest(&rows).map(|r| r.id), Some(2));
        assert!(RecordRow::latest(&[]).is_none());
    }
}
