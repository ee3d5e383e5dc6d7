//! Record filter engine
//!
//! Users compose an ordered list of rules, each targeting one category of
//! field (text, numeric, date, dropdown, location) with an operator and an
//! operand. Applying the list yields the names of the fields that pass.
//! Rules combine strictly left to right with AND/OR, without precedence.
//!
//! ## Usage
//!
//! ```
//! use formbase_engine::data::{FieldDef, FieldType, ValueBag};
//! use formbase_engine::domain::filter::{FilterLimits, FilterSession, parse_rules};
//!
//! let fields = vec![
//!     FieldDef::new(1, "count", FieldType::Number),
//!     FieldDef::new(2, "colour", FieldType::Dropdown),
//! ];
//! let raw = serde_json::json!({"count": "12", "colour": "Red"});
//! let values = ValueBag::from_json(&fields, &raw).unwrap();
//!
//! let json = r#"[{"fieldType": "numeric", "operator": "greater than", "value": "10"}]"#;
//! let rules = parse_rules(json, &FilterLimits::default()).unwrap();
//!
//! let mut session = FilterSession::with_rules(rules);
//! session.apply(&fields, &values);
//! let visible: Vec<_> = session.visible_fields(&fields).iter().map(|f| f.name.as_str()).collect();
//! assert_eq!(visible, ["count"]);
//! ```

mod catalog;
mod engine;
mod eval;
mod normalize;
mod parser;
mod session;
mod types;

pub use catalog::{
    DATE_OPS, DROPDOWN_OPS, FIELD_TYPES, FieldTypeOption, LOCATION_OPS, NUMERIC_OPS, TEXT_OPS,
};
pub use engine::{FilterInput, apply_rules_to_fields};
pub use eval::{eval_single, type_matches};
pub use normalize::{date_to_number, parse_number};
pub use parser::{DEFAULT_MAX_RULES, DEFAULT_MAX_RULES_JSON_BYTES, FilterLimits, parse_rules};
pub use session::FilterSession;
pub use types::{FilterRule, Join, Operator, RuleFieldType, RulePatch};
