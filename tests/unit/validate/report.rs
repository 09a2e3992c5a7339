use super::*;
use crate::model::data::ResultsData;
use serde_json::json;

fn empty() -> SanitizedData {
    SanitizedData::Results(ResultsData::default())
}

#[test]
fn errors_are_field_qualified_and_deduplicated() {
    let mut r = Report::default();
    r.error("arrays[0].values", "is required");
    r.error("arrays[0].values", "is required");
    let out = r.finish(empty());
    assert_eq!(out.errors, vec!["arrays[0].values: is required"]);
    assert!(!out.is_valid);
}

#[test]
fn advisory_findings_keep_result_valid() {
    let mut r = Report::default();
    r.edge_case("Empty array");
    r.pitfall("Off-by-one");
    r.warn("values", "large");
    let out = r.finish(empty());
    assert!(out.is_valid);
    assert_eq!(out.edge_cases, vec!["Empty array"]);
    assert_eq!(out.pitfalls, vec!["Off-by-one"]);
    assert_eq!(out.warnings, vec!["values: large"]);
}

#[test]
fn primitives_report_type_mismatches() {
    let mut r = Report::default();
    assert!(r.expect_array(&json!(1), "nodes").is_none());
    assert!(r.expect_number(&json!("x"), "weight").is_none());
    assert!(r.expect_string(&json!(2), "label").is_none());
    assert_eq!(r.expect_number(&json!("2.5"), "w"), Some(2.5));
    let out = r.finish(empty());
    assert_eq!(
        out.errors,
        vec![
            "nodes: must be an array, got number",
            "weight: must be a number, got string",
            "label: must be a string, got number",
        ]
    );
}

#[test]
fn index_checks_use_half_open_bounds() {
    let mut r = Report::default();
    assert_eq!(r.expect_index(&json!(0), 3, "i"), Some(0));
    assert_eq!(r.expect_index(&json!(2), 3, "i"), Some(2));
    assert_eq!(r.expect_index(&json!(3), 3, "i"), None);
    assert_eq!(r.expect_index(&json!(-1), 3, "j"), None);
    assert_eq!(r.expect_index(&json!(0), 0, "k"), None);
    let out = r.finish(empty());
    assert_eq!(out.errors.len(), 3);
    assert!(out.errors[0].starts_with("i: index 3 out of bounds"));
    assert!(out.errors[2].contains("no valid indices"));
}

#[test]
fn missing_root_is_fatal() {
    let mut r = Report::default();
    assert!(r.require(&json!({}), "nodes", "nodes").is_none());
    r.missing_root("nodes");
    let out = r.finish(empty());
    assert!(!out.is_valid);
    assert_eq!(out.errors, vec!["nodes: is required"]);
}
