//! Operator catalog
//!
//! Static tables of the operators each rule category accepts, in display
//! order. Image has none, so image rules can never be evaluated.

use super::types::{Operator, RuleFieldType};

pub const TEXT_OPS: &[Operator] = &[Operator::Equals, Operator::Contains, Operator::StartsWith];

pub const NUMERIC_OPS: &[Operator] = &[
    Operator::Equals,
    Operator::GreaterThan,
    Operator::LessThan,
    Operator::GreaterOrEqual,
    Operator::LessOrEqual,
];

pub const DATE_OPS: &[Operator] = &[
    Operator::Equals,
    Operator::GreaterThan,
    Operator::LessThan,
    Operator::GreaterOrEqual,
    Operator::LessOrEqual,
];

pub const DROPDOWN_OPS: &[Operator] = &[Operator::Equals];

pub const LOCATION_OPS: &[Operator] = &[Operator::Contains];

/// Entry of the rule category selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTypeOption {
    pub label: &'static str,
    pub value: RuleFieldType,
}

/// Rule categories in selector order
pub const FIELD_TYPES: &[FieldTypeOption] = &[
    FieldTypeOption {
        label: "Text",
        value: RuleFieldType::Text,
    },
    FieldTypeOption {
        label: "Multiline",
        value: RuleFieldType::Multiline,
    },
    FieldTypeOption {
        label: "Dropdown",
        value: RuleFieldType::Dropdown,
    },
    FieldTypeOption {
        label: "Date",
        value: RuleFieldType::Date,
    },
    FieldTypeOption {
        label: "Location",
        value: RuleFieldType::Location,
    },
    FieldTypeOption {
        label: "Image",
        value: RuleFieldType::Image,
    },
    FieldTypeOption {
        label: "Numeric",
        value: RuleFieldType::Numeric,
    },
];

impl RuleFieldType {
    /// Legal operators for this category, in display order
    pub fn operators(self) -> &'static [Operator] {
        match self {
            Self::Text | Self::Multiline => TEXT_OPS,
            Self::Numeric => NUMERIC_OPS,
            Self::Date => DATE_OPS,
            Self::Dropdown => DROPDOWN_OPS,
            Self::Location => LOCATION_OPS,
            Self::Image => &[],
        }
    }

    pub fn allows(self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }

    /// Operator a rule gets when switched to this category
    pub fn default_operator(self) -> Option<Operator> {
        match self {
            Self::Text | Self::Multiline | Self::Location => Some(Operator::Contains),
            Self::Numeric | Self::Date | Self::Dropdown => Some(Operator::Equals),
            Self::Image => None,
        }
    }

    /// Operator after switching to this category: the current one if still
    /// legal, else the category default
    pub fn operator_after_change(self, current: Option<Operator>) -> Option<Operator> {
        match current {
            Some(op) if self.allows(op) => Some(op),
            _ => self.default_operator(),
        }
    }

    /// Selector label
    pub fn label(self) -> &'static str {
        FIELD_TYPES
            .iter()
            .find(|option| option.value == self)
            .map(|option| option.label)
            .unwrap_or_else(|| self.as_str())
    }

    /// Input hint for the rule value
    pub fn value_placeholder(self) -> &'static str {
        match self {
            Self::Numeric => "Enter number…",
            Self::Date => "DD-MM-YYYY",
            Self::Dropdown => "Option text…",
            Self::Location => "Search text in name…",
            Self::Text | Self::Multiline | Self::Image => "Enter text…",
        }
    }
}
