use super::*;
use crate::fallback::fixtures::expected_format;
use crate::validate::validate;

fn slim_fixture(ty: CanonicalType) -> Value {
    let r = validate(ty, &expected_format(ty));
    slim(ty, &r.sanitized_data)
}

#[test]
fn operation_labels_are_normalized() {
    let r = validate(
        CanonicalType::Array,
        &json!({
            "array": [3, 1, 2],
            "operations": ["  Compare Pair ", { "type": "Swap", "indices": [0, 2] }]
        }),
    );
    let out = slim(CanonicalType::Array, &r.sanitized_data);
    assert_eq!(out["operations"], json!(["compare pair", "swap(0,2)"]));
}

#[test]
fn array_highlights_keep_only_populated_categories() {
    let out = slim_fixture(CanonicalType::Array);
    let h = &out["arrays"][0]["highlights"];
    assert_eq!(h["current"], json!([1]));
    assert!(h.get("sorted").is_none());
    assert_eq!(h["window"], json!({ "start": 1, "end": 3 }));
}

#[test]
fn tree_bookkeeping_is_dropped() {
    let out = slim_fixture(CanonicalType::Tree);
    assert!(out.get("treeType").is_none());
    assert!(out.get("operations").is_none());
    assert!(out["nodes"][1].get("parent").is_none());
    assert_eq!(out["rootId"], json!("8"));
}

#[test]
fn graph_bookkeeping_is_dropped() {
    let out = slim_fixture(CanonicalType::Graph);
    assert!(out.get("algorithm").is_none());
    assert_eq!(out["edges"][0]["weight"], json!(4.0));
    assert_eq!(out["directed"], json!(false));
}

#[test]
fn slim_is_deterministic_for_every_type() {
    for ty in CanonicalType::ALL {
        assert_eq!(slim_fixture(ty), slim_fixture(ty), "{ty}");
        assert!(slim_fixture(ty).is_object(), "{ty}");
    }
}

#[test]
fn hybrid_projects_each_part() {
    let out = slim_fixture(CanonicalType::Hybrid);
    assert_eq!(out["components"], json!(["array", "hashmap"]));
    assert!(out["parts"][1].get("entries").is_some());
}
