//! The structured-output schema and the domain types must describe the same
//! shape: every field the model is told to return is a field of the record.

use civic_core::testing::sample_analysis;
use civic_gemini::schema::{REQUIRED_FIELDS, SCHEMA_VERSION, analysis_schema};
use serde_json::Value;

fn keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default()
}

#[test]
fn required_fields_exist_on_serialized_record() {
    let record = serde_json::to_value(sample_analysis("a-1", "Bag Ban")).unwrap();
    for field in REQUIRED_FIELDS {
        assert!(
            record.get(*field).is_some(),
            "record has no `{field}` field"
        );
    }
}

#[test]
fn nested_required_lists_match_record_keys() {
    let record = serde_json::to_value(sample_analysis("a-1", "Bag Ban")).unwrap();
    let schema = analysis_schema();

    for section in ["diagnosis", "viability", "blueprint"] {
        let required: Vec<String> = schema["properties"][section]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        let mut record_keys = keys(&record[section]);
        record_keys.sort();
        let mut required_sorted = required.clone();
        required_sorted.sort();
        assert_eq!(required_sorted, record_keys, "section `{section}`");
    }

    let stakeholder_required = schema["properties"]["stakeholders"]["items"]["required"]
        .as_array()
        .unwrap()
        .len();
    assert_eq!(stakeholder_required, keys(&record["stakeholders"][0]).len());
}

#[test]
fn locally_synthesized_fields_are_not_requested() {
    let schema = analysis_schema();
    let properties = schema["properties"].as_object().unwrap();
    for local in ["id", "createdAt", "sources", "inputEvidence", "rawInput"] {
        assert!(!properties.contains_key(local), "`{local}` must not be model-authored");
    }
    assert_eq!(SCHEMA_VERSION, 2);
}
