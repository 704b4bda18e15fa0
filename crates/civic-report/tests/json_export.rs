//! JSON export: exact round-trip and conformance to the derived schema.

use civic_core::entities::PolicyAnalysis;
use civic_core::testing::sample_analysis;
use civic_report::{from_json, read_json, to_json, write_json};
use pretty_assertions::assert_eq;
use schemars::schema_for;

#[test]
fn export_roundtrips_to_an_equal_record() {
    let analysis = sample_analysis("3f2a", "Portland Plastic Bag Ban");
    let text = to_json(&analysis).unwrap();
    assert_eq!(from_json(&text).unwrap(), analysis);
}

#[test]
fn export_without_optional_fields_roundtrips() {
    let mut analysis = sample_analysis("3f2b", "Congestion Pricing");
    analysis.evidence_analysis = None;
    analysis.input_evidence = None;
    analysis.sources.clear();

    let text = to_json(&analysis).unwrap();
    assert!(!text.contains("inputEvidence"));
    assert_eq!(from_json(&text).unwrap(), analysis);
}

#[test]
fn export_validates_against_derived_schema() {
    let schema = serde_json::to_value(schema_for!(PolicyAnalysis)).unwrap();
    let validator = jsonschema::validator_for(&schema).expect("schema should be valid");

    let text = to_json(&sample_analysis("3f2c", "Bike Lanes")).unwrap();
    let instance: serde_json::Value = serde_json::from_str(&text).unwrap();
    let errors: Vec<String> = validator.iter_errors(&instance).map(|e| e.to_string()).collect();
    assert!(errors.is_empty(), "schema errors: {errors:?}");
}

#[test]
fn file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis.json");
    let analysis = sample_analysis("3f2d", "Library Hours");

    write_json(&analysis, &path).unwrap();
    assert_eq!(read_json(&path).unwrap(), analysis);
}
