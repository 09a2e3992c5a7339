use serde_json::{Map, Value, json};

use crate::fallback::category::ErrorCategory;
use crate::fallback::fixtures::expected_format;
use crate::model::canonical::CanonicalType;
use crate::model::data::{
    ArrayData, ArrayEntity, CallFrame, DpData, GraphData, GraphVertex, HashMapData, HybridData,
    LinkedListData, ListNode, RecursionData, ResultsData, SanitizedData, SequenceData,
    SequenceKind, StringData, TreeData, TreeNode,
};

/// Human explanation shown in place of a step that could not be used as-is.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub title: String,
    pub message: String,
    pub suggestions: Vec<String>,
    /// Canonical example of what the payload should look like.
    pub expected_format: Value,
}

/// Substitute data plus a categorized explanation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackResolution {
    pub instance: SanitizedData,
    pub category: ErrorCategory,
    pub explanation: Explanation,
}

/// Resolve a fallback for `ty`, categorizing `error` when one is given.
///
/// Total: every canonical type has an instance and every message maps to a category.
pub fn resolve(ty: CanonicalType, error: Option<&str>) -> FallbackResolution {
    let error = error.map(str::trim).filter(|e| !e.is_empty());
    let category = error.map_or(ErrorCategory::NoData, ErrorCategory::from_message);
    let message = match error {
        Some(e) => format!("{e}. Showing an example {ty} instead."),
        None => format!("No usable {ty} data was provided. Showing an example instead."),
    };
    FallbackResolution {
        instance: fallback_instance(ty),
        category,
        explanation: Explanation {
            title: category.title().to_string(),
            message,
            suggestions: category.suggestions().iter().map(|s| s.to_string()).collect(),
            expected_format: expected_format(ty),
        },
    }
}

/// Resolve a fallback from a raw, possibly unknown, type hint. Unknown hints
/// resolve as an array with a type-mismatch category.
pub fn resolve_hint(hint: &str, error: Option<&str>) -> FallbackResolution {
    match CanonicalType::from_hint(hint) {
        Some(ty) => resolve(ty, error),
        None => {
            let mut out = resolve(CanonicalType::Array, error);
            out.category = ErrorCategory::TypeMismatch;
            out.explanation.title = ErrorCategory::TypeMismatch.title().to_string();
            out.explanation.message = format!("Unknown visualization type '{hint}'. Showing an example array instead.");
            out.explanation.suggestions = ErrorCategory::TypeMismatch
                .suggestions()
                .iter()
                .map(|s| s.to_string())
                .collect();
            out
        }
    }
}

/// Minimal self-consistent instance of `ty`'s sanitized schema.
pub fn fallback_instance(ty: CanonicalType) -> SanitizedData {
    match ty {
        CanonicalType::Array => SanitizedData::Array(ArrayData {
            arrays: vec![ArrayEntity {
                name: "example".to_string(),
                values: [5, 2, 8, 1, 9].into_iter().map(Value::from).collect(),
                highlights: Default::default(),
            }],
            ..Default::default()
        }),
        CanonicalType::String => SanitizedData::String(StringData {
            text: "example".to_string(),
            ..Default::default()
        }),
        CanonicalType::Tree => SanitizedData::Tree(TreeData {
            nodes: vec![TreeNode {
                id: "root".to_string(),
                value: json!("Empty"),
                x: None,
                y: None,
                state: "default".to_string(),
                parent: None,
            }],
            root_id: Some("root".to_string()),
            ..Default::default()
        }),
        CanonicalType::Graph => SanitizedData::Graph(GraphData {
            vertices: vec![GraphVertex {
                id: "A".to_string(),
                label: "A".to_string(),
                x: None,
                y: None,
                state: "default".to_string(),
                distance: None,
                parent: None,
            }],
            ..Default::default()
        }),
        CanonicalType::Dp => SanitizedData::Dp(DpData {
            matrix: vec![vec![json!(0)]],
            rows: 1,
            cols: 1,
            ..Default::default()
        }),
        CanonicalType::Hashmap => {
            let mut entries = Map::new();
            entries.insert("key".to_string(), json!("value"));
            SanitizedData::Hashmap(HashMapData {
                entries,
                highlighted_keys: Vec::new(),
            })
        }
        CanonicalType::Stack => sequence(SequenceKind::Stack),
        CanonicalType::Queue => sequence(SequenceKind::Queue),
        CanonicalType::Linkedlist => SanitizedData::Linkedlist(LinkedListData {
            nodes: vec![ListNode {
                id: "n0".to_string(),
                value: json!("Empty"),
                next: None,
                state: "default".to_string(),
            }],
            head: Some("n0".to_string()),
        }),
        CanonicalType::Recursion => SanitizedData::Recursion(RecursionData {
            call_stack: vec![CallFrame {
                function: "f".to_string(),
                args: json!([]),
                depth: 0,
                state: "active".to_string(),
                return_value: None,
            }],
        }),
        CanonicalType::Results => SanitizedData::Results(ResultsData {
            results: json!("No results"),
        }),
        CanonicalType::Hybrid => SanitizedData::Hybrid(HybridData {
            components: vec![CanonicalType::Array],
            parts: vec![fallback_instance(CanonicalType::Array)],
        }),
    }
}

fn sequence(kind: SequenceKind) -> SanitizedData {
    SanitizedData::Sequence(SequenceData {
        kind,
        items: vec![json!(1), json!(2), json!(3)],
        highlighted: Vec::new(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/fallback/resolver.rs"]
mod tests;
