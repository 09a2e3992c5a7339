use super::*;
use serde_json::json;

#[test]
fn each_component_is_validated_and_merged() {
    let r = validate_hybrid(
        &json!({
            "arrays": [{ "name": "nums", "values": [2, 7, 11], "highlights": { "current": [5] } }],
            "hashMap": { "2": 0, "7": 1, "11": 2, "15": 3 }
        }),
        &ValidationLimits::default(),
    );
    assert!(!r.is_valid);
    assert!(r.errors[0].starts_with("arrays[0].highlights.current[0]"));
    let SanitizedData::Hybrid(h) = &r.sanitized_data else {
        panic!("expected hybrid");
    };
    assert_eq!(h.components, vec![CanonicalType::Array, CanonicalType::Hashmap]);
    assert_eq!(h.parts.len(), 2);
    assert!(r.edge_cases.iter().any(|e| e.contains("sorted ascending")));
}

#[test]
fn single_component_warns() {
    let r = validate_hybrid(&json!({ "string": "abc" }), &ValidationLimits::default());
    assert!(r.is_valid);
    assert!(r.warnings[0].starts_with("components: only 'string'"));
}

#[test]
fn nothing_recognizable_falls_back() {
    let r = validate_hybrid(&json!({ "x": 1 }), &ValidationLimits::default());
    assert!(!r.is_valid);
    assert_eq!(r.errors, vec!["components: is required"]);
    assert_eq!(r.sanitized_data.canonical_type(), CanonicalType::Hybrid);
}
