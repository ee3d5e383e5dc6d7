//! Rule list parsing
//!
//! Parses JSON rule lists into FilterRule structs with validation.

use serde::Deserialize;

use super::types::{FilterRule, Join, Operator, RuleFieldType, new_rule_id};
use crate::data::DataError;

/// Default maximum size of rule list JSON in bytes (64KB)
pub const DEFAULT_MAX_RULES_JSON_BYTES: usize = 64 * 1024;

/// Default maximum number of rules in one list
pub const DEFAULT_MAX_RULES: usize = 50;

/// Bounds on rule list input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterLimits {
    pub max_rules: usize,
    pub max_rules_json_bytes: usize,
}

impl Default for FilterLimits {
    fn default() -> Self {
        Self {
            max_rules: DEFAULT_MAX_RULES,
            max_rules_json_bytes: DEFAULT_MAX_RULES_JSON_BYTES,
        }
    }
}

/// Rule as written by the rule builder; tokens are validated after decoding
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    id: Option<String>,
    #[serde(default)]
    join: Join,
    field_type: String,
    /// Missing: category default. Explicit null: no operator.
    #[serde(default, deserialize_with = "present")]
    operator: Option<Option<String>>,
    #[serde(default)]
    value: String,
    #[serde(default)]
    required_only: bool,
    #[serde(default)]
    numeric_only: bool,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl TryFrom<RawRule> for FilterRule {
    type Error = DataError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let field_type: RuleFieldType = raw.field_type.parse()?;
        let operator = match raw.operator {
            None => field_type.default_operator(),
            Some(None) => None,
            Some(Some(token)) => Some(token.parse::<Operator>()?),
        };
        Ok(Self {
            id: raw
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(new_rule_id),
            join: raw.join,
            field_type,
            operator,
            value: raw.value,
            required_only: raw.required_only,
            numeric_only: raw.numeric_only,
        })
    }
}

/// Parse a rule list from JSON
///
/// Validates JSON size and rule count, then decodes each rule.
pub fn parse_rules(json_str: &str, limits: &FilterLimits) -> Result<Vec<FilterRule>, DataError> {
    if json_str.len() > limits.max_rules_json_bytes {
        return Err(DataError::RulesTooLarge {
            size: json_str.len(),
            max: limits.max_rules_json_bytes,
        });
    }

    let raw: Vec<RawRule> =
        serde_json::from_str(json_str).map_err(|e| DataError::invalid_json("rule list", e))?;

    if raw.len() > limits.max_rules {
        return Err(DataError::TooManyRules {
            count: raw.len(),
            max: limits.max_rules,
        });
    }

    let rules = raw
        .into_iter()
        .map(FilterRule::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(rules = rules.len(), "Parsed rule list");
    Ok(rules)
}
