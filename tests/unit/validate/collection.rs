use super::*;
use serde_json::json;

#[test]
fn hashmap_highlights_and_case_collisions() {
    let r = validate_hashmap(&json!({
        "hashMap": { "a": 1, "A": 2, "b": 3 },
        "highlightedKeys": ["b", "zz"]
    }));
    assert!(r.is_valid);
    assert!(r.pitfalls.iter().any(|p| p.contains("differ only in case")));
    assert_eq!(r.warnings, vec!["highlightedKeys: unknown key 'zz'"]);
    let SanitizedData::Hashmap(h) = &r.sanitized_data else {
        panic!("expected hashmap");
    };
    assert_eq!(h.highlighted_keys, vec!["b"]);
    assert_eq!(h.entries.len(), 3);
}

#[test]
fn hashmap_wrong_type_is_fatal() {
    let r = validate_hashmap(&json!({ "map": [1, 2] }));
    assert!(!r.is_valid);
    assert_eq!(r.errors[0], "map: must be an object, got array");
    assert!(matches!(r.sanitized_data, SanitizedData::Hashmap(_)));
}

#[test]
fn stacks_and_queues() {
    let r = validate_sequence(SequenceKind::Stack, &json!({ "stack": [1, 2, 3], "highlighted": 2 }));
    assert!(r.is_valid);
    let SanitizedData::Sequence(s) = &r.sanitized_data else {
        panic!("expected sequence");
    };
    assert_eq!(s.kind, SequenceKind::Stack);
    assert_eq!(s.highlighted, vec![2]);

    let empty = validate_sequence(SequenceKind::Queue, &json!({ "queue": [] }));
    assert!(empty.is_valid);
    assert!(empty.edge_cases[0].contains("underflow"));

    let missing = validate_sequence(SequenceKind::Queue, &json!({ "stack": [1] }));
    assert!(!missing.is_valid);
    assert_eq!(missing.errors, vec!["queue: is required"]);
    assert_eq!(missing.sanitized_data.canonical_type(), CanonicalType::Queue);
}

#[test]
fn linked_list_references_and_cycles() {
    let r = validate_linked_list(&json!({
        "nodes": [
            { "id": "a", "value": 1, "next": "b" },
            { "id": "b", "value": 2, "next": "c" },
            { "id": "c", "value": 3, "next": "b" }
        ],
        "head": "a"
    }));
    assert!(r.is_valid);
    assert!(r.edge_cases.iter().any(|e| e.starts_with("Cycle detected")));
    assert!(!r.pitfalls.is_empty());

    let dangling = validate_linked_list(&json!({
        "nodes": [{ "id": 1, "next": 9 }, { "id": 2 }]
    }));
    assert!(!dangling.is_valid);
    assert_eq!(dangling.errors, vec!["nodes[0].next: references unknown node '9'"]);
    assert!(dangling.edge_cases.iter().any(|e| e == "Nodes not reachable from head: 2"));
}

#[test]
fn bare_list_values_form_a_chain() {
    let r = validate_linked_list(&json!({ "list": [3, 1, 4] }));
    assert!(r.is_valid);
    let SanitizedData::Linkedlist(l) = &r.sanitized_data else {
        panic!("expected linked list");
    };
    assert_eq!(l.head.as_deref(), Some("n0"));
    assert_eq!(l.nodes[1].next.as_deref(), Some("n2"));
    assert!(l.nodes[2].next.is_none());
}

#[test]
fn recursion_frames_and_memoization_hint() {
    let r = validate_recursion(
        &json!({
            "callStack": [
                { "function": "fib", "args": [4] },
                { "function": "fib", "args": [3] },
                { "function": "fib", "args": [2] },
                { "function": "fib", "args": [2], "returnValue": 1 }
            ]
        }),
        &ValidationLimits::default(),
    );
    assert!(r.is_valid);
    assert!(r.pitfalls.iter().any(|p| p.starts_with("Repeated call fib(2)")));
    let SanitizedData::Recursion(rec) = &r.sanitized_data else {
        panic!("expected recursion");
    };
    assert_eq!(rec.call_stack[3].depth, 3);
    assert_eq!(rec.call_stack[3].return_value, Some(json!(1)));
}

#[test]
fn deep_recursion_is_a_pitfall() {
    let frames: Vec<Value> = (0..60).map(|i| json!({ "function": "walk", "args": [i] })).collect();
    let limits = ValidationLimits::default();
    let r = validate_recursion(&json!({ "callStack": frames }), &limits);
    assert!(r.pitfalls.iter().any(|p| p.starts_with("Deep recursion (60 frames)")));
}

#[test]
fn results_must_be_present() {
    assert!(validate_results(&json!({ "results": [1, 2] })).is_valid);
    let empty = validate_results(&json!({ "results": [] }));
    assert!(empty.edge_cases.contains(&"Empty results".to_string()));
    let missing = validate_results(&json!({}));
    assert!(!missing.is_valid);
    assert_eq!(missing.errors, vec!["results: is required"]);
}
