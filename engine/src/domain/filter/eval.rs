//! Single-rule evaluation
//!
//! `eval_single` compares one field value against one rule operand. It never
//! fails: unparsable operands and operators outside the category's catalog
//! simply do not match.

use super::normalize::{date_to_number, parse_number};
use super::types::{Operator, RuleFieldType};
use crate::data::{FieldDef, FieldType, Value};
use crate::utils::string::{contains_ignore_case, eq_ignore_case, starts_with_ignore_case};

/// Compare a field value against a rule operand.
///
/// - numeric/date: both sides must parse, then ordered comparison
/// - dropdown: case-insensitive equality, operator not re-checked
/// - location: case-insensitive substring of the location name, operator not re-checked
/// - image: never matches
/// - text/multiline: case-insensitive equals, contains or prefix
pub fn eval_single(
    value: Option<&Value>,
    operator: Operator,
    want: &str,
    field_type: RuleFieldType,
) -> bool {
    match field_type {
        RuleFieldType::Numeric => compare_ordered(
            scalar(value).and_then(parse_number),
            parse_number(want),
            operator,
        ),
        RuleFieldType::Date => compare_ordered(
            scalar(value).and_then(date_to_number),
            date_to_number(want),
            operator,
        ),
        RuleFieldType::Dropdown => eq_ignore_case(text(value), want),
        RuleFieldType::Location => {
            let name = value
                .and_then(Value::as_location)
                .map(|location| location.name.as_str())
                .unwrap_or("");
            contains_ignore_case(name, want)
        }
        RuleFieldType::Image => false,
        RuleFieldType::Text | RuleFieldType::Multiline => compare_text(text(value), want, operator),
    }
}

/// Whether a rule of the given category can target this field at all
pub fn type_matches(field: &FieldDef, rule_type: RuleFieldType) -> bool {
    match rule_type {
        RuleFieldType::Numeric => field.is_numeric(),
        RuleFieldType::Multiline => field.field_type == FieldType::Multiline,
        RuleFieldType::Text => field.field_type == FieldType::Text,
        RuleFieldType::Dropdown => field.field_type == FieldType::Dropdown,
        RuleFieldType::Date => field.field_type == FieldType::Date,
        RuleFieldType::Location => field.field_type == FieldType::Location,
        RuleFieldType::Image => field.field_type == FieldType::Image,
    }
}

/// Scalar text of a value; locations have none
fn scalar(value: Option<&Value>) -> Option<&str> {
    value
        .filter(|v| v.as_location().is_none())
        .map(Value::as_text)
}

/// Text of a value, empty when absent
fn text(value: Option<&Value>) -> &str {
    value.map(Value::as_text).unwrap_or("")
}

fn compare_ordered<T: PartialOrd>(a: Option<T>, b: Option<T>, operator: Operator) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    match operator {
        Operator::Equals => a == b,
        Operator::GreaterThan => a > b,
        Operator::LessThan => a < b,
        Operator::GreaterOrEqual => a >= b,
        Operator::LessOrEqual => a <= b,
        Operator::Contains | Operator::StartsWith => false,
    }
}

fn compare_text(actual: &str, want: &str, operator: Operator) -> bool {
    match operator {
        Operator::Equals => eq_ignore_case(actual, want),
        Operator::Contains => contains_ignore_case(actual, want),
        Operator::StartsWith => starts_with_ignore_case(actual, want),
        Operator::GreaterThan
        | Operator::LessThan
        | Operator::GreaterOrEqual
        | Operator::LessOrEqual => false,
    }
}
