//! `formbase filter`

use std::fmt::Write;

use anyhow::{Result, bail};
use formbase_engine::{FieldDef, FilterRule, FilterSession, ValueBag};
use serde::Serialize;

use crate::core::OutputFormat;
use crate::core::constants::{EMPTY_VALUE, NO_MATCHING_FIELDS};

/// A field left visible after filtering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleField {
    pub name: String,
    pub field_type: String,
    pub value: Option<String>,
}

/// Outcome of one filter run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterReport {
    pub applied: bool,
    /// Passing field names, sorted
    pub passing: Vec<String>,
    /// Visible fields in schema order
    pub visible: Vec<VisibleField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<FilterRule>>,
}

/// Apply a rule list the way the records screen does.
///
/// Without a rule list nothing is applied and every field stays visible. An
/// incomplete rule list is refused rather than silently partially applied.
pub fn run_filter(
    fields: &[FieldDef],
    values: &ValueBag,
    rules: Option<Vec<FilterRule>>,
    debug: bool,
) -> Result<FilterReport> {
    let mut session = match rules {
        Some(rules) => FilterSession::with_rules(rules),
        None => {
            let session = FilterSession::new();
            return Ok(report(&session, fields, values, debug));
        }
    };

    if !session.can_apply() {
        let problems = describe_incomplete(session.rules());
        if problems.is_empty() {
            bail!("Rule list is empty");
        }
        bail!("Rule list cannot be applied: {}", problems.join("; "));
    }

    session.apply(fields, values);
    Ok(report(&session, fields, values, debug))
}

fn report(
    session: &FilterSession,
    fields: &[FieldDef],
    values: &ValueBag,
    debug: bool,
) -> FilterReport {
    let mut passing: Vec<String> = session
        .applied()
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default();
    passing.sort();

    let visible = session
        .visible_fields(fields)
        .into_iter()
        .map(|field| VisibleField {
            name: field.name.clone(),
            field_type: field.field_type.to_string(),
            value: values.get(&field.name).map(|v| v.as_text().to_string()),
        })
        .collect();

    FilterReport {
        applied: session.is_applied(),
        passing,
        visible,
        rules: debug.then(|| session.rules().to_vec()),
    }
}

/// Why each rule in the list cannot be applied
fn describe_incomplete(rules: &[FilterRule]) -> Vec<String> {
    rules
        .iter()
        .enumerate()
        .filter_map(|(idx, rule)| {
            let position = idx + 1;
            match rule.operator {
                _ if rule.field_type.operators().is_empty() => Some(format!(
                    "rule {} targets {} fields, which cannot be filtered",
                    position, rule.field_type
                )),
                None => Some(format!("rule {} has no operator", position)),
                Some(op) if !rule.field_type.allows(op) => Some(format!(
                    "rule {} uses '{}', which {} rules do not support",
                    position, op, rule.field_type
                )),
                Some(_) => None,
            }
        })
        .collect()
}

/// Render a report in the requested format
pub fn render_filter(report: &FilterReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let mut out = String::new();
            if let Some(rules) = &report.rules {
                for (idx, rule) in rules.iter().enumerate() {
                    let join = if idx == 0 { "" } else { rule.join.as_str() };
                    writeln!(
                        out,
                        "# {:<3} {} {} {:?}",
                        join,
                        rule.field_type,
                        rule.operator.map(|op| op.as_str()).unwrap_or("(none)"),
                        rule.value
                    )?;
                }
            }
            if report.visible.is_empty() {
                writeln!(out, "{}", NO_MATCHING_FIELDS)?;
            }
            for field in &report.visible {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    field.name,
                    field.field_type,
                    field.value.as_deref().unwrap_or(EMPTY_VALUE)
                )?;
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use formbase_engine::{FieldType, Operator, RuleFieldType};
    use serde_json::json;

    use super::*;

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new(1, "title", FieldType::Text),
            FieldDef::new(2, "count", FieldType::Number),
            FieldDef::new(3, "photo", FieldType::Image),
        ]
    }

    fn values(fields: &[FieldDef]) -> ValueBag {
        ValueBag::from_json(fields, &json!({"title": "Site visit", "count": 4})).unwrap()
    }

    fn numeric_rule(operator: Operator, value: &str) -> FilterRule {
        FilterRule {
            field_type: RuleFieldType::Numeric,
            operator: Some(operator),
            value: value.to_string(),
            ..FilterRule::empty()
        }
    }

    #[test]
    fn test_no_rules_shows_everything_unapplied() {
        let fields = fields();
        let report = run_filter(&fields, &values(&fields), None, false).unwrap();
        assert!(!report.applied);
        assert!(report.passing.is_empty());
        assert_eq!(report.visible.len(), 3);
        assert!(report.rules.is_none());
    }

    #[test]
    fn test_rules_filter_visible_fields() {
        let fields = fields();
        let report = run_filter(
            &fields,
            &values(&fields),
            Some(vec![numeric_rule(Operator::LessThan, "5")]),
            true,
        )
        .unwrap();

        assert!(report.applied);
        assert_eq!(report.passing, vec!["count"]);
        assert_eq!(
            report.visible,
            vec![VisibleField {
                name: "count".to_string(),
                field_type: "number".to_string(),
                value: Some("4".to_string()),
            }]
        );
        assert_eq!(report.rules.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_incomplete_rules_are_refused() {
        let fields = fields();
        let vals = values(&fields);

        let rules = vec![numeric_rule(Operator::Contains, "5")];
        let err = run_filter(&fields, &vals, Some(rules), false).unwrap_err();
        assert!(err.to_string().contains("rule 1 uses 'contains'"));

        let mut image = FilterRule::empty();
        image.field_type = RuleFieldType::Image;
        let err = run_filter(&fields, &vals, Some(vec![image]), false).unwrap_err();
        assert!(err.to_string().contains("cannot be filtered"));

        let err = run_filter(&fields, &vals, Some(vec![]), false).unwrap_err();
        assert_eq!(err.to_string(), "Rule list is empty");
    }

    #[test]
    fn test_render_text() {
        let fields = fields();
        let report = run_filter(
            &fields,
            &values(&fields),
            Some(vec![numeric_rule(Operator::GreaterThan, "100")]),
            false,
        )
        .unwrap();
        assert_eq!(
            render_filter(&report, OutputFormat::Text).unwrap(),
            format!("{}\n", NO_MATCHING_FIELDS)
        );

        let report = run_filter(&fields, &ValueBag::new(), None, false).unwrap();
        let text = render_filter(&report, OutputFormat::Text).unwrap();
        assert_eq!(text, "title\ttext\t-\ncount\tnumber\t-\nphoto\timage\t-\n");
    }

    #[test]
    fn test_render_json() {
        let fields = fields();
        let report = run_filter(
            &fields,
            &values(&fields),
            Some(vec![numeric_rule(Operator::Equals, "4")]),
            false,
        )
        .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render_filter(&report, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(
            json,
            json!({
                "applied": true,
                "passing": ["count"],
                "visible": [{"name": "count", "field_type": "number", "value": "4"}]
            })
        );
    }
}
