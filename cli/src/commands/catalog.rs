//! `formbase operators` and `formbase describe`

use std::fmt::Write;

use anyhow::Result;
use formbase_engine::{FIELD_TYPES, FieldDef, RuleFieldType, type_matches};
use serde::Serialize;
use serde_json::json;

use crate::core::OutputFormat;

fn categories(only: Option<RuleFieldType>) -> Vec<RuleFieldType> {
    match only {
        Some(field_type) => vec![field_type],
        None => FIELD_TYPES.iter().map(|option| option.value).collect(),
    }
}

fn operator_names(field_type: RuleFieldType) -> Vec<&'static str> {
    field_type.operators().iter().map(|op| op.as_str()).collect()
}

/// List the operators each rule category accepts, in selector order
pub fn list_operators(only: Option<RuleFieldType>, format: OutputFormat) -> Result<String> {
    let categories = categories(only);
    match format {
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            for field_type in categories {
                map.insert(
                    field_type.to_string(),
                    json!({
                        "label": field_type.label(),
                        "operators": operator_names(field_type),
                        "placeholder": field_type.value_placeholder(),
                    }),
                );
            }
            Ok(serde_json::to_string_pretty(&map)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for field_type in categories {
                let ops = operator_names(field_type);
                write!(out, "{} [{}]: ", field_type, field_type.label())?;
                if ops.is_empty() {
                    writeln!(out, "(not filterable)")?;
                } else {
                    writeln!(
                        out,
                        "{} (value: {})",
                        ops.join(", "),
                        field_type.value_placeholder()
                    )?;
                }
            }
            Ok(out)
        }
    }
}

#[derive(Debug, Serialize)]
struct FieldSummary<'a> {
    name: &'a str,
    field_type: &'a str,
    required: bool,
    numeric: bool,
    /// Rule categories that can target this field
    rule_types: Vec<RuleFieldType>,
    operators: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
}

impl<'a> FieldSummary<'a> {
    fn of(field: &'a FieldDef) -> Self {
        let rule_types: Vec<RuleFieldType> = FIELD_TYPES
            .iter()
            .map(|option| option.value)
            .filter(|rule_type| type_matches(field, *rule_type))
            .collect();

        let mut operators: Vec<&'static str> = Vec::new();
        for name in rule_types.iter().flat_map(|t| operator_names(*t)) {
            if !operators.contains(&name) {
                operators.push(name);
            }
        }

        Self {
            name: &field.name,
            field_type: field.field_type.as_str(),
            required: field.required,
            numeric: field.is_numeric(),
            rule_types,
            operators,
            options: field.option_list(),
        }
    }
}

/// Show which rule categories and operators reach each field of a schema
pub fn describe_fields(fields: &[FieldDef], format: OutputFormat) -> Result<String> {
    let summaries: Vec<FieldSummary<'_>> = fields.iter().map(FieldSummary::of).collect();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for summary in &summaries {
                let mut flags = Vec::new();
                if summary.required {
                    flags.push("required");
                }
                if summary.numeric {
                    flags.push("numeric");
                }
                let rule_types = if summary.rule_types.is_empty() {
                    "-".to_string()
                } else {
                    summary
                        .rule_types
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                };

                write!(out, "{} ({})", summary.name, summary.field_type)?;
                if !flags.is_empty() {
                    write!(out, " [{}]", flags.join(", "))?;
                }
                writeln!(out)?;
                writeln!(out, "  rules:     {}", rule_types)?;
                if !summary.operators.is_empty() {
                    writeln!(out, "  operators: {}", summary.operators.join(", "))?;
                }
                if !summary.options.is_empty() {
                    writeln!(out, "  options:   {}", summary.options.join(", "))?;
                }
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use formbase_engine::{FieldOptions, FieldType};

    use super::*;

    #[test]
    fn test_list_operators_text() {
        let out = list_operators(None, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            "text [Text]: equals, contains, startswith (value: Enter text…)"
        );
        assert_eq!(
            lines[3],
            "date [Date]: equals, greater than, less than, greater or equal, less or equal \
             (value: DD-MM-YYYY)"
        );
        assert_eq!(lines[5], "image [Image]: (not filterable)");
    }

    #[test]
    fn test_list_operators_json_single() {
        let out = list_operators(Some(RuleFieldType::Location), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!({
                "location": {
                    "label": "Location",
                    "operators": ["contains"],
                    "placeholder": "Search text in name…"
                }
            })
        );
    }

    #[test]
    fn test_describe_numeric_text_field() {
        let fields = vec![
            FieldDef::new(1, "age", FieldType::Text).numeric_flag().required(),
            FieldDef::new(2, "sig", FieldType::Other("signature".to_string())),
        ];
        let out = describe_fields(&fields, OutputFormat::Text).unwrap();
        assert_eq!(
            out,
            "age (text) [required, numeric]\n\
             \x20 rules:     text, numeric\n\
             \x20 operators: equals, contains, startswith, greater than, less than, greater or equal, less or equal\n\
             sig (signature)\n\
             \x20 rules:     -\n"
        );
    }

    #[test]
    fn test_describe_json_includes_options() {
        let fields = vec![
            FieldDef::new(1, "colour", FieldType::Dropdown)
                .with_options(FieldOptions::Joined("red, green".to_string())),
        ];
        let value: serde_json::Value =
            serde_json::from_str(&describe_fields(&fields, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(value[0]["rule_types"], json!(["dropdown"]));
        assert_eq!(value[0]["operators"], json!(["equals"]));
        assert_eq!(value[0]["options"], json!(["red", "green"]));
    }
}
