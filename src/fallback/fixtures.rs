//! Canonical "expected data format" examples, one per canonical type.
//!
//! These double as user-facing documentation in fallback explanations and as test
//! fixtures: each one classifies to its own type and validates without errors.

use serde_json::{Value, json};

use crate::model::canonical::CanonicalType;

/// Expected data format for `ty`.
pub fn expected_format(ty: CanonicalType) -> Value {
    match ty {
        CanonicalType::Array => json!({
            "arrays": [{
                "name": "nums",
                "values": [5, 2, 8, 1, 9],
                "highlights": { "current": [1], "comparison": [2], "window": { "start": 1, "end": 3 } }
            }],
            "pointers": [{ "name": "i", "position": 1 }, { "name": "j", "position": 2, "color": "orange" }],
            "operations": [{ "type": "compare", "indices": [1, 2] }]
        }),
        CanonicalType::String => json!({
            "string": "abcabcbb",
            "pointers": [{ "name": "left", "position": 0 }, { "name": "right", "position": 2 }],
            "window": { "start": 0, "end": 2 },
            "hashMap": { "a": 0, "b": 1, "c": 2 }
        }),
        CanonicalType::Hashmap => json!({
            "hashMap": { "apple": 3, "banana": 1, "cherry": 7 },
            "highlightedKeys": ["banana"]
        }),
        CanonicalType::Tree => json!({
            "nodes": [
                { "id": "8", "value": 8 },
                { "id": "3", "value": 3 },
                { "id": "10", "value": 10 },
                { "id": "1", "value": 1 },
                { "id": "6", "value": 6, "state": "current" }
            ],
            "edges": [
                { "from": "8", "to": "3" },
                { "from": "8", "to": "10" },
                { "from": "3", "to": "1" },
                { "from": "3", "to": "6" }
            ],
            "rootId": "8",
            "treeType": "bst",
            "traversalPath": ["8", "3", "6"],
            "currentNode": "6"
        }),
        CanonicalType::Graph => json!({
            "vertices": [
                { "id": "A", "label": "A", "state": "visited", "distance": 0 },
                { "id": "B", "label": "B", "distance": 4 },
                { "id": "C", "label": "C", "distance": 2 },
                { "id": "D", "label": "D" }
            ],
            "edges": [
                { "from": "A", "to": "B", "weight": 4 },
                { "from": "A", "to": "C", "weight": 2 },
                { "from": "C", "to": "B", "weight": 1 },
                { "from": "B", "to": "D", "weight": 5 }
            ],
            "directed": false,
            "algorithm": "dijkstra",
            "currentVertex": "C",
            "visitedOrder": ["A", "C"]
        }),
        CanonicalType::Linkedlist => json!({
            "nodes": [
                { "id": "a", "value": 1, "next": "b" },
                { "id": "b", "value": 2, "next": "c" },
                { "id": "c", "value": 3, "next": null }
            ],
            "head": "a"
        }),
        CanonicalType::Recursion => json!({
            "callStack": [
                { "function": "fib", "args": [3], "depth": 0 },
                { "function": "fib", "args": [2], "depth": 1 },
                { "function": "fib", "args": [1], "depth": 2, "returnValue": 1, "state": "returning" }
            ]
        }),
        CanonicalType::Dp => json!({
            "matrix": [[0, 0, 0], [0, 1, 1], [0, 1, 2]],
            "currentCell": { "row": 2, "col": 2 },
            "rowLabels": ["", "a", "b"],
            "colLabels": ["", "a", "b"]
        }),
        CanonicalType::Stack => json!({ "stack": ["(", "[", "{"], "highlighted": [2] }),
        CanonicalType::Queue => json!({ "queue": [3, 7, 1], "highlighted": [0] }),
        CanonicalType::Results => json!({ "results": { "answer": 3, "explanation": "Longest substring is 'abc'" } }),
        CanonicalType::Hybrid => json!({
            "arrays": [{ "name": "nums", "values": [2, 7, 11, 15] }],
            "hashMap": { "2": 0, "7": 1, "11": 2, "15": 3 }
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fallback/fixtures.rs"]
mod tests;
