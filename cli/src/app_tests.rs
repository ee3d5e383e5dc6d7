use std::io::Write;
use std::path::PathBuf;

use serde_json::json;
use tempfile::NamedTempFile;

use super::*;
use crate::core::cli::CliConfig;
use crate::core::config::{FileConfig, OutputFormat};

fn temp_json(value: serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file
}

fn app(format: OutputFormat) -> CoreApp {
    let cli = CliConfig {
        format: Some(format),
        ..Default::default()
    };
    CoreApp {
        config: AppConfig::resolve(&cli, FileConfig::default()),
    }
}

fn schema() -> NamedTempFile {
    temp_json(json!([
        {"id": 1, "name": "site", "field_type": "text", "required": true},
        {"id": 2, "name": "visitors", "field_type": "number"},
        {"id": 3, "name": "visited", "field_type": "date"},
        {"id": 4, "name": "status", "field_type": "dropdown", "options": "Open, Closed"},
        {"id": 5, "name": "where", "field_type": "location"},
        {"id": 6, "name": "photo", "field_type": "image"}
    ]))
}

fn records() -> NamedTempFile {
    temp_json(json!([
        {"id": 10, "form_id": 1, "username": "ana", "values": {"site": "Old mill"}},
        {"id": 11, "form_id": 1, "username": "ana", "values": {
            "site": "North Quarry",
            "visitors": 12,
            "visited": "05-03-2024",
            "status": "open",
            "where": {"name": "Quarry Road", "lat": 51.5, "lng": -0.1},
            "photo": "file:///tmp/p.jpg"
        }}
    ]))
}

fn filter(
    fields: &NamedTempFile,
    records: &NamedTempFile,
    rules: Option<&NamedTempFile>,
) -> Commands {
    Commands::Filter {
        fields: fields.path().to_path_buf(),
        records: Some(records.path().to_path_buf()),
        rules: rules.map(|file| file.path().to_path_buf()),
    }
}

#[test]
fn test_filter_or_chain_against_latest_record() {
    let (fields, records) = (schema(), records());
    let rules = temp_json(json!([
        {"fieldType": "date", "operator": "greater than", "value": "01-01-2024"},
        {"join": "OR", "fieldType": "location", "value": "quarry"}
    ]));

    let out = app(OutputFormat::Json)
        .execute(filter(&fields, &records, Some(&rules)))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["applied"], json!(true));
    assert_eq!(value["passing"], json!(["visited", "where"]));
    assert_eq!(value["visible"][0]["value"], json!("05-03-2024"));
    assert_eq!(value["visible"][1]["value"], json!("Quarry Road"));
}

#[test]
fn test_filter_and_chain_text_output() {
    let (fields, records) = (schema(), records());
    let rules = temp_json(json!([
        {"fieldType": "text", "operator": "startswith", "value": "north"},
        {"join": "AND", "fieldType": "text", "requiredOnly": true}
    ]));

    let out = app(OutputFormat::Text)
        .execute(filter(&fields, &records, Some(&rules)))
        .unwrap();
    assert_eq!(out, "site\ttext\tNorth Quarry\n");
}

#[test]
fn test_filter_without_rules_lists_everything() {
    let (fields, records) = (schema(), records());
    let out = app(OutputFormat::Text)
        .execute(filter(&fields, &records, None))
        .unwrap();
    assert_eq!(out.lines().count(), 6);
}

#[test]
fn test_filter_rejects_incomplete_rules() {
    let (fields, records) = (schema(), records());
    let rules = temp_json(json!([{"fieldType": "numeric", "operator": null}]));
    let err = app(OutputFormat::Text)
        .execute(filter(&fields, &records, Some(&rules)))
        .unwrap_err();
    assert!(err.to_string().contains("rule 1 has no operator"));
}

#[test]
fn test_describe_and_operators() {
    let fields = schema();
    let out = app(OutputFormat::Text)
        .execute(Commands::Describe {
            fields: fields.path().to_path_buf(),
        })
        .unwrap();
    assert!(out.contains("visitors (number) [numeric]\n  rules:     numeric\n"));
    assert!(out.contains("  options:   Open, Closed\n"));

    let out = app(OutputFormat::Text)
        .execute(Commands::Operators { field_type: None })
        .unwrap();
    let first = out.lines().next().unwrap_or_default();
    assert_eq!(first, "text [Text]: equals, contains, startswith (value: Enter text…)");
}

#[test]
fn test_missing_schema_file_is_reported() {
    let err = app(OutputFormat::Text)
        .execute(Commands::Describe {
            fields: PathBuf::from("/definitely/not/here.json"),
        })
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read fields file"));
}
