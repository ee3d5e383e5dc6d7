//! # formbase-engine
//!
//! Client-side record filter engine for user-defined forms.
//!
//! A form is a runtime-defined schema of typed fields ([`FieldDef`]); a record
//! is a loosely typed value bag keyed by field name. Users compose an ordered
//! list of [`FilterRule`]s joined by AND/OR, and the engine computes which
//! fields currently satisfy the composed predicate.
//!
//! ```
//! use formbase_engine::{
//!     FieldDef, FieldType, FilterInput, FilterRule, ValueBag, apply_rules_to_fields,
//! };
//!
//! let fields = vec![FieldDef::new(1, "title", FieldType::Text)];
//! let raw = serde_json::json!({"title": "Hello World"});
//! let values = ValueBag::from_json(&fields, &raw).unwrap();
//! let mut rule = FilterRule::empty();
//! rule.value = "world".to_string();
//!
//! let rules = [rule];
//! let passing = apply_rules_to_fields(FilterInput {
//!     rules: &rules,
//!     fields: &fields,
//!     values: &values,
//! });
//! assert!(passing.contains("title"));
//! ```

pub mod data;
pub mod domain;
pub mod utils;

pub use data::{DataError, FieldDef, FieldOptions, FieldType, Location, RecordRow, Value, ValueBag};
pub use domain::filter::{
    FIELD_TYPES, FieldTypeOption, FilterInput, FilterLimits, FilterRule, FilterSession, Join,
    Operator, RuleFieldType, RulePatch, apply_rules_to_fields, date_to_number, eval_single,
    parse_rules, type_matches,
};
