use super::*;
use serde_json::json;

fn classify(hint: Option<&str>, data: serde_json::Value) -> Classification {
    TypeClassifier::default().classify(&Visualization::new(hint, data))
}

#[test]
fn arrays_plus_large_hashmap_is_hybrid() {
    let c = classify(
        None,
        json!({
            "arrays": [{ "name": "nums", "values": [1, 2, 3] }],
            "hashMap": { "a": 1, "b": 2, "c": 3, "d": 4 }
        }),
    );
    assert_eq!(c.canonical, CanonicalType::Hybrid);
}

#[test]
fn small_hashmap_next_to_array_does_not_make_hybrid() {
    let c = classify(
        None,
        json!({ "array": [1, 2, 3], "hashMap": { "a": 1, "b": 2 } }),
    );
    assert_eq!(c.canonical, CanonicalType::Array);
}

#[test]
fn lone_call_stack_is_recursion() {
    let c = classify(None, json!({ "callStack": [{ "function": "fib", "args": [3] }] }));
    assert_eq!(c.canonical, CanonicalType::Recursion);
}

#[test]
fn empty_or_scalar_payloads_default_to_array() {
    assert_eq!(classify(None, json!({})).canonical, CanonicalType::Array);
    assert_eq!(classify(None, json!(null)).canonical, CanonicalType::Array);
    assert_eq!(classify(None, json!(42)).canonical, CanonicalType::Array);
}

#[test]
fn precedence_orders_results_before_dp_before_string() {
    let both = json!({ "results": [1], "matrix": [[0, 1], [1, 0]] });
    assert_eq!(classify(None, both).canonical, CanonicalType::Results);

    let dp_and_text = json!({ "matrix": [[0]], "string": "" });
    assert_eq!(classify(None, dp_and_text).canonical, CanonicalType::Dp);

    let text_with_pointers = json!({ "string": "abc", "pointers": [{ "name": "i", "position": 0 }] });
    assert_eq!(
        classify(None, text_with_pointers).canonical,
        CanonicalType::String
    );
}

#[test]
fn hashmap_alone_wins_over_default() {
    let c = classify(None, json!({ "hashMap": { "x": 1 } }));
    assert_eq!(c.canonical, CanonicalType::Hashmap);
}

#[test]
fn trees_graphs_and_lists_are_told_apart() {
    let tree = json!({ "nodes": [{ "id": 1 }, { "id": 2 }], "edges": [{ "from": 1, "to": 2 }] });
    assert_eq!(classify(None, tree).canonical, CanonicalType::Tree);

    let graph = json!({ "vertices": [{ "id": "a" }], "edges": [] });
    assert_eq!(classify(None, graph).canonical, CanonicalType::Graph);

    let list = json!({ "nodes": [{ "id": 1, "next": null }], "head": 1 });
    assert_eq!(classify(None, list).canonical, CanonicalType::Linkedlist);

    let stack = json!({ "stack": [1, 2] });
    assert_eq!(classify(None, stack).canonical, CanonicalType::Stack);
}

#[test]
fn verified_hint_is_trusted() {
    let c = classify(Some("graph"), json!({ "nodes": [{ "id": "a" }], "edges": [] }));
    assert_eq!(c.canonical, CanonicalType::Graph);
    assert!(c.hint_accepted);
    assert!(c.mismatch.is_none());
}

#[test]
fn unverified_hint_is_downgraded_with_note() {
    let c = classify(Some("recursion"), json!({ "array": [1, 2] }));
    assert_eq!(c.canonical, CanonicalType::Array);
    assert!(!c.hint_accepted);
    let note = c.mismatch.unwrap();
    assert!(note.contains("callStack"), "{note}");
}

#[test]
fn unbacked_hint_on_markerless_payload_keeps_hinted_type() {
    let c = classify(Some("tree"), json!({ "notNodes": "x" }));
    assert_eq!(c.canonical, CanonicalType::Tree);
    assert!(!c.hint_accepted);
    let note = c.mismatch.unwrap();
    assert!(note.contains("`nodes`"), "{note}");

    let c = classify(Some("tree"), json!({ "array": [1] }));
    assert_eq!(c.canonical, CanonicalType::Array);
}

#[test]
fn unknown_hint_falls_back_to_structure() {
    let c = classify(Some("sprite"), json!({ "string": "abc" }));
    assert_eq!(c.canonical, CanonicalType::String);
    assert!(c.mismatch.unwrap().contains("unknown type hint"));
}

#[test]
fn hybrid_threshold_is_tunable() {
    let classifier = TypeClassifier::new(ClassifierConfig {
        hybrid_hashmap_threshold: 1,
        ..ClassifierConfig::default()
    });
    let viz = Visualization::new(
        None,
        json!({ "array": [1, 2, 3], "hashMap": { "a": 1, "b": 2 } }),
    );
    assert_eq!(classifier.classify_type(&viz), CanonicalType::Hybrid);
}

#[test]
fn bare_table_is_dp() {
    let c = classify(None, json!([[1, 2], [3, 4]]));
    assert_eq!(c.canonical, CanonicalType::Dp);
}
