//! Loading schemas, records and rule lists from disk

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use formbase_engine::{FieldDef, FilterLimits, FilterRule, RecordRow, ValueBag, parse_rules};

fn read(path: &Path, what: &str) -> Result<String> {
    tracing::debug!(path = %path.display(), "Reading {}", what);
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", what, path.display()))
}

/// Load a form schema (`FieldDef[]`)
pub fn load_fields(path: &Path) -> Result<Vec<FieldDef>> {
    let content = read(path, "fields")?;
    let fields = FieldDef::parse_list(&content)
        .with_context(|| format!("Failed to parse fields file: {}", path.display()))?;
    tracing::debug!(fields = fields.len(), "Schema loaded");
    Ok(fields)
}

/// Load the values to filter.
///
/// The file holds either saved records (`RecordRow[]`, latest last) or one
/// bare value object. No file means an empty value bag.
pub fn load_values(fields: &[FieldDef], path: Option<&Path>) -> Result<ValueBag> {
    let Some(path) = path else {
        return Ok(ValueBag::new());
    };
    let content = read(path, "records")?;
    let raw: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse records file: {}", path.display()))?;

    let values = match raw {
        serde_json::Value::Array(_) => {
            let rows: Vec<RecordRow> = serde_json::from_value(raw)
                .with_context(|| format!("Invalid record list in: {}", path.display()))?;
            let latest = RecordRow::latest(&rows);
            match latest {
                Some(row) => {
                    tracing::debug!(record = row.id, total = rows.len(), "Using latest record")
                }
                None => tracing::debug!("No saved records, filtering empty values"),
            }
            ValueBag::from_record(fields, latest)?
        }
        other => ValueBag::from_json(fields, &other)?,
    };
    Ok(values)
}

/// Load a rule list, if one was given
pub fn load_rules(path: Option<&Path>, limits: &FilterLimits) -> Result<Option<Vec<FilterRule>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let content = read(path, "rules")?;
    let rules = parse_rules(&content, limits)
        .with_context(|| format!("Failed to parse rules file: {}", path.display()))?;
    Ok(Some(rules))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use formbase_engine::{FieldType, Value};
    use tempfile::NamedTempFile;

    use super::*;

    fn temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_values_uses_latest_record() {
        let fields = vec![FieldDef::new(1, "title", FieldType::Text)];
        let file = temp_json(
            r#"[
                {"id": 1, "form_id": 1, "values": {"title": "first"}, "username": "sam"},
                {"id": 2, "form_id": 1, "values": {"title": "second"}, "username": "sam"}
            ]"#,
        );
        let values = load_values(&fields, Some(file.path())).unwrap();
        assert_eq!(values.get("title"), Some(&Value::Text("second".to_string())));
    }

    #[test]
    fn test_load_values_accepts_bare_object() {
        let fields = vec![FieldDef::new(1, "title", FieldType::Text)];
        let file = temp_json(r#"{"title": "only"}"#);
        let values = load_values(&fields, Some(file.path())).unwrap();
        assert_eq!(values.get("title").map(Value::as_text), Some("only"));
    }

    #[test]
    fn test_load_values_empty_cases() {
        let fields = vec![FieldDef::new(1, "title", FieldType::Text)];
        assert!(load_values(&fields, None).unwrap().is_empty());

        let file = temp_json("[]");
        assert!(load_values(&fields, Some(file.path())).unwrap().is_empty());
    }

    #[test]
    fn test_load_values_rejects_scalars() {
        let file = temp_json("42");
        assert!(load_values(&[], Some(file.path())).is_err());
    }

    #[test]
    fn test_load_rules_respects_limits() {
        let file = temp_json(r#"[{"fieldType": "text"}, {"fieldType": "date"}]"#);
        let limits = FilterLimits {
            max_rules: 1,
            ..FilterLimits::default()
        };
        let err = load_rules(Some(file.path()), &limits).unwrap_err();
        assert!(format!("{:#}", err).contains("maximum is 1"));

        assert!(load_rules(None, &limits).unwrap().is_none());
    }

    #[test]
    fn test_missing_fields_file() {
        let err = load_fields(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read fields file"));
    }
}
