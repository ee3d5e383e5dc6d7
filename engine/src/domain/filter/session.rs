//! Rule list owned by one records screen
//!
//! Holds the rules a user is composing and the last applied result. Nothing
//! here outlives the session.

use std::collections::HashSet;

use super::engine::{FilterInput, apply_rules_to_fields};
use super::types::{FilterRule, RuleFieldType, RulePatch};
use crate::data::{FieldDef, ValueBag};

#[derive(Debug, Clone)]
pub struct FilterSession {
    rules: Vec<FilterRule>,
    applied: Option<HashSet<String>>,
}

impl Default for FilterSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSession {
    /// One default rule, nothing applied
    pub fn new() -> Self {
        Self {
            rules: vec![FilterRule::empty()],
            applied: None,
        }
    }

    /// Start from an existing rule list, nothing applied
    pub fn with_rules(rules: Vec<FilterRule>) -> Self {
        Self {
            rules,
            applied: None,
        }
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    /// Append a default rule and return its id
    pub fn add_rule(&mut self) -> String {
        let rule = FilterRule::empty();
        let id = rule.id.clone();
        self.rules.push(rule);
        id
    }

    /// Remove a rule by id. Returns whether a rule was removed.
    pub fn remove_rule(&mut self, id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.id != id);
        self.rules.len() != before
    }

    /// Patch a rule in place. Returns whether the id was found.
    pub fn update_rule(&mut self, id: &str, patch: RulePatch) -> bool {
        match self.rules.iter_mut().find(|rule| rule.id == id) {
            Some(rule) => {
                patch.apply_to(rule);
                true
            }
            None => {
                tracing::debug!(rule = %id, "Update for unknown rule ignored");
                false
            }
        }
    }

    pub fn set_field_type(&mut self, id: &str, field_type: RuleFieldType) -> bool {
        self.update_rule(
            id,
            RulePatch {
                field_type: Some(field_type),
                ..Default::default()
            },
        )
    }

    /// Whether every rule is complete enough to apply
    pub fn can_apply(&self) -> bool {
        !self.rules.is_empty()
            && self.rules.iter().all(|rule| match rule.operator {
                Some(op) => rule.field_type != RuleFieldType::Image && rule.field_type.allows(op),
                None => false,
            })
    }

    /// Evaluate the rules and remember the passing field names
    pub fn apply(&mut self, fields: &[FieldDef], values: &ValueBag) -> &HashSet<String> {
        let passing = apply_rules_to_fields(FilterInput {
            rules: &self.rules,
            fields,
            values,
        });
        self.applied.insert(passing)
    }

    /// Back to a single default rule with nothing applied
    pub fn clear(&mut self) {
        self.rules = vec![FilterRule::empty()];
        self.applied = None;
    }

    pub fn is_applied(&self) -> bool {
        self.applied.is_some()
    }

    pub fn applied(&self) -> Option<&HashSet<String>> {
        self.applied.as_ref()
    }

    /// Fields to show, in schema order. All of them until a filter is applied.
    pub fn visible_fields<'a>(&self, fields: &'a [FieldDef]) -> Vec<&'a FieldDef> {
        match &self.applied {
            Some(passing) => fields.iter().filter(|f| passing.contains(&f.name)).collect(),
            None => fields.iter().collect(),
        }
    }
}
