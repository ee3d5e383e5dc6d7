//! Filter rule type definitions
//!
//! Defines the rule shape, join kinds, rule categories and operators used to
//! filter the fields of a record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data::DataError;

/// How a rule combines with everything before it. Ignored on the first rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Join {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl Join {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Fold one more rule result into the accumulator
    pub fn combine(self, acc: bool, ok: bool) -> bool {
        match self {
            Self::And => acc && ok,
            Self::Or => acc || ok,
        }
    }
}

impl FromStr for Join {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            _ => Err(format!("Invalid join '{}'. Valid options: AND, OR", s)),
        }
    }
}

/// Category of fields a rule targets.
///
/// Overlaps with, but is distinct from, the schema's field type: `Numeric`
/// covers numeric and number fields as well as text fields flagged numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleFieldType {
    Text,
    Multiline,
    Dropdown,
    Date,
    Location,
    Image,
    Numeric,
}

impl RuleFieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Multiline => "multiline",
            Self::Dropdown => "dropdown",
            Self::Date => "date",
            Self::Location => "location",
            Self::Image => "image",
            Self::Numeric => "numeric",
        }
    }
}

impl FromStr for RuleFieldType {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "multiline" => Ok(Self::Multiline),
            "dropdown" => Ok(Self::Dropdown),
            "date" => Ok(Self::Date),
            "location" => Ok(Self::Location),
            "image" => Ok(Self::Image),
            "numeric" => Ok(Self::Numeric),
            _ => Err(DataError::UnknownFieldType(s.to_string())),
        }
    }
}

impl fmt::Display for RuleFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operator. The token doubles as the label shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "equals")]
    Equals,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "startswith")]
    StartsWith,
    #[serde(rename = "greater than")]
    GreaterThan,
    #[serde(rename = "less than")]
    LessThan,
    #[serde(rename = "greater or equal")]
    GreaterOrEqual,
    #[serde(rename = "less or equal")]
    LessOrEqual,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Contains => "contains",
            Self::StartsWith => "startswith",
            Self::GreaterThan => "greater than",
            Self::LessThan => "less than",
            Self::GreaterOrEqual => "greater or equal",
            Self::LessOrEqual => "less or equal",
        }
    }
}

impl FromStr for Operator {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(Self::Equals),
            "contains" => Ok(Self::Contains),
            "startswith" => Ok(Self::StartsWith),
            "greater than" => Ok(Self::GreaterThan),
            "less than" => Ok(Self::LessThan),
            "greater or equal" => Ok(Self::GreaterOrEqual),
            "less or equal" => Ok(Self::LessOrEqual),
            _ => Err(DataError::UnknownOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filter predicate clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    /// List key only; not globally unique
    pub id: String,
    pub join: Join,
    pub field_type: RuleFieldType,
    pub operator: Option<Operator>,
    /// Comparison operand exactly as typed
    pub value: String,
    pub required_only: bool,
    pub numeric_only: bool,
}

impl FilterRule {
    /// Default rule: `AND`, text, `contains`, empty value, no switches
    pub fn empty() -> Self {
        Self {
            id: new_rule_id(),
            join: Join::And,
            field_type: RuleFieldType::Text,
            operator: Some(Operator::Contains),
            value: String::new(),
            required_only: false,
            numeric_only: false,
        }
    }

    /// Whether the rule takes part in evaluation at all
    pub fn is_effective(&self) -> bool {
        self.operator.is_some() && self.field_type != RuleFieldType::Image
    }

    /// Change the rule category, keeping the operator only if still legal
    pub fn set_field_type(&mut self, field_type: RuleFieldType) {
        self.operator = field_type.operator_after_change(self.operator);
        self.field_type = field_type;
    }
}

pub(crate) fn new_rule_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Partial update of a rule, applied in place by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RulePatch {
    pub join: Option<Join>,
    pub field_type: Option<RuleFieldType>,
    /// `Some(None)` clears the operator
    pub operator: Option<Option<Operator>>,
    pub value: Option<String>,
    pub required_only: Option<bool>,
    pub numeric_only: Option<bool>,
}

impl RulePatch {
    /// Apply to a rule. A category change is applied before an explicit operator.
    pub fn apply_to(self, rule: &mut FilterRule) {
        if let Some(join) = self.join {
            rule.join = join;
        }
        if let Some(field_type) = self.field_type {
            rule.set_field_type(field_type);
        }
        if let Some(operator) = self.operator {
            rule.operator = operator;
        }
        if let Some(value) = self.value {
            rule.value = value;
        }
        if let Some(required_only) = self.required_only {
            rule.required_only = required_only;
        }
        if let Some(numeric_only) = self.numeric_only {
            rule.numeric_only = numeric_only;
        }
    }
}
