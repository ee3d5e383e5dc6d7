//! Multi-rule reducer
//!
//! Folds an ordered rule list into the set of field names that pass it.

use std::collections::HashSet;

use super::eval::{eval_single, type_matches};
use super::types::{FilterRule, Operator};
use crate::data::{FieldDef, ValueBag};

/// Everything one evaluation reads. Nothing here is mutated.
#[derive(Debug, Clone, Copy)]
pub struct FilterInput<'a> {
    pub rules: &'a [FilterRule],
    pub fields: &'a [FieldDef],
    pub values: &'a ValueBag,
}

/// Compute the names of the fields that satisfy the rule list.
///
/// Rules without an operator and image rules are dropped first. With no rules
/// left every field passes. Otherwise each field folds its per-rule results
/// strictly left to right: the first result seeds the accumulator and every
/// later rule applies its own join, so `A AND B OR C` is `(A AND B) OR C`.
pub fn apply_rules_to_fields(input: FilterInput<'_>) -> HashSet<String> {
    let FilterInput {
        rules,
        fields,
        values,
    } = input;

    let effective: Vec<(&FilterRule, Operator)> = rules
        .iter()
        .filter(|rule| {
            let keep = rule.is_effective();
            if !keep {
                tracing::trace!(
                    rule = %rule.id,
                    field_type = %rule.field_type,
                    "Dropping ineffective rule"
                );
            }
            keep
        })
        .filter_map(|rule| rule.operator.map(|op| (rule, op)))
        .collect();

    if effective.is_empty() {
        tracing::debug!(
            rules = rules.len(),
            fields = fields.len(),
            "No effective rules, all fields pass"
        );
        return fields.iter().map(|f| f.name.clone()).collect();
    }

    let passing: HashSet<String> = fields
        .iter()
        .filter(|field| passes(field, &effective, values))
        .map(|field| field.name.clone())
        .collect();

    tracing::debug!(
        rules = rules.len(),
        effective = effective.len(),
        fields = fields.len(),
        passing = passing.len(),
        "Applied filter rules"
    );
    passing
}

fn passes(field: &FieldDef, effective: &[(&FilterRule, Operator)], values: &ValueBag) -> bool {
    let value = values.get(&field.name);
    effective
        .iter()
        .enumerate()
        .fold(true, |acc, (idx, (rule, operator))| {
            let ok = rule_targets(field, rule)
                && eval_single(value, *operator, &rule.value, rule.field_type);
            if idx == 0 { ok } else { rule.join.combine(acc, ok) }
        })
}

/// Category match plus the required-only and numeric-only switches
fn rule_targets(field: &FieldDef, rule: &FilterRule) -> bool {
    type_matches(field, rule.field_type)
        && (!rule.required_only || field.required)
        && (!rule.numeric_only || field.is_num)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
