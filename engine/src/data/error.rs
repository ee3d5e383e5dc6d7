//! Error type for the data boundary
//!
//! Evaluation itself never fails: unparsable operands simply do not match.
//! Errors only arise where raw JSON (schemas, records, rule lists) enters
//! the engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    /// Input could not be decoded as JSON of the expected shape
    #[error("Invalid {what} JSON: {source}")]
    InvalidJson {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A value bag must be a JSON object keyed by field name
    #[error("Expected {what} to be a JSON object, got {found}")]
    NotAnObject { what: &'static str, found: &'static str },

    /// Rule list JSON exceeds the configured size limit
    #[error("Rule list JSON is {size} bytes, maximum is {max} bytes")]
    RulesTooLarge { size: usize, max: usize },

    /// Rule list has more entries than the configured limit
    #[error("Rule list has {count} rules, maximum is {max}")]
    TooManyRules { count: usize, max: usize },

    /// Rule category outside the filterable catalog
    #[error("Unknown rule field type: {0}")]
    UnknownFieldType(String),

    /// Operator token outside the catalog
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
}

impl DataError {
    /// Create an invalid JSON error with the kind of document being decoded
    pub fn invalid_json(what: &'static str, source: serde_json::Error) -> Self {
        Self::InvalidJson { what, source }
    }

    /// Create a not-an-object error describing what was found instead
    pub fn not_an_object(what: &'static str, found: &serde_json::Value) -> Self {
        Self::NotAnObject {
            what,
            found: json_kind(found),
        }
    }
}

/// Human-readable name of a JSON value's kind
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
