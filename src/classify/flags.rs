use serde_json::Value;

use crate::foundation::json::{collection_len, first_field, is_table};
use crate::model::canonical::CanonicalType;

/// Whether a structural component is present, and how big it is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Presence {
    pub present: bool,
    pub size: usize,
}

impl Presence {
    fn of(present: bool, size: usize) -> Self {
        Self { present, size }
    }

    pub fn non_empty(self) -> bool {
        self.present && self.size > 0
    }
}

pub(crate) const STRING_KEYS: [&str; 3] = ["string", "text", "input"];
pub(crate) const HASHMAP_KEYS: [&str; 3] = ["hashMap", "hashmap", "map"];
pub(crate) const CALL_STACK_KEYS: [&str; 2] = ["callStack", "call_stack"];
pub(crate) const TABLE_KEYS: [&str; 6] = ["matrix", "table", "dp", "grid", "memo", "values"];

/// Structural presence flags computed from a raw payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureFlags {
    pub array: Presence,
    pub string: Presence,
    pub hashmap: Presence,
    pub tree: Presence,
    pub graph: Presence,
    pub results: Presence,
    pub pointers: Presence,
    pub call_stack: Presence,
    pub matrix: Presence,
    pub dp_row: bool,
    pub stack: Presence,
    pub queue: Presence,
    pub linked_list: Presence,
    pub node_edge_pairs: bool,
}

impl StructureFlags {
    /// Scan a payload. Never fails; non-object payloads only ever set the array or
    /// matrix flags.
    pub fn scan(data: &Value) -> Self {
        let mut flags = Self::default();

        if let Value::Array(items) = data {
            if is_table(data) {
                flags.matrix = Presence::of(true, items.len());
            } else {
                flags.array = Presence::of(true, items.len());
            }
            return flags;
        }
        if !data.is_object() {
            return flags;
        }

        flags.array = scan_arrays(data);

        if let Some((_, Value::String(s))) = first_field(data, &STRING_KEYS) {
            flags.string = Presence::of(true, s.chars().count());
        }
        if let Some((_, Value::Object(m))) = first_field(data, &HASHMAP_KEYS) {
            flags.hashmap = Presence::of(true, m.len());
        }

        let nodes = data.get("nodes").and_then(Value::as_array);
        let has_edges = data.get("edges").is_some_and(Value::is_array);
        let list_like = nodes.is_some_and(|n| n.iter().any(|node| node.get("next").is_some()))
            || data.get("head").is_some_and(|h| !h.is_null())
            || data.get("list").is_some_and(Value::is_array);
        flags.node_edge_pairs = nodes.is_some() && has_edges;

        if list_like {
            let size = nodes
                .map(Vec::len)
                .or_else(|| data.get("list").and_then(Value::as_array).map(Vec::len))
                .unwrap_or(0);
            flags.linked_list = Presence::of(true, size);
        } else if let Some(nodes) = nodes {
            flags.tree = Presence::of(true, nodes.len());
        } else if let Some((_, root)) = first_field(data, &["root", "tree"]) {
            flags.tree = Presence::of(true, if root.is_object() { 1 } else { 0 });
        }

        if let Some(vertices) = data.get("vertices").and_then(Value::as_array) {
            if has_edges {
                flags.graph = Presence::of(true, vertices.len());
            }
        }

        if let Some(results) = data.get("results").filter(|v| !v.is_null()) {
            let size = match results {
                Value::Array(_) | Value::Object(_) => collection_len(results),
                Value::String(s) => usize::from(!s.is_empty()),
                _ => 1,
            };
            flags.results = Presence::of(true, size);
        }
        if let Some(p) = data.get("pointers") {
            flags.pointers = Presence::of(p.is_array() || p.is_object(), collection_len(p));
        }
        if let Some((_, Value::Array(frames))) = first_field(data, &CALL_STACK_KEYS) {
            flags.call_stack = Presence::of(true, frames.len());
        }

        for key in TABLE_KEYS {
            if let Some(v) = data.get(key) {
                if is_table(v) {
                    flags.matrix = Presence::of(true, collection_len(v));
                    break;
                }
            }
        }
        flags.dp_row = ["dp", "memo"]
            .iter()
            .any(|k| data.get(*k).is_some_and(Value::is_array));

        if let Some(Value::Array(items)) = data.get("stack") {
            flags.stack = Presence::of(true, items.len());
        }
        if let Some(Value::Array(items)) = data.get("queue") {
            flags.queue = Presence::of(true, items.len());
        }

        flags
    }

    /// Canonical types of the structure components present, in a fixed order.
    pub fn components(&self) -> Vec<CanonicalType> {
        [
            (self.array.present, CanonicalType::Array),
            (self.string.present, CanonicalType::String),
            (self.hashmap.non_empty(), CanonicalType::Hashmap),
            (self.tree.present, CanonicalType::Tree),
            (self.graph.present, CanonicalType::Graph),
            (self.call_stack.present, CanonicalType::Recursion),
            (self.matrix.present, CanonicalType::Dp),
        ]
        .into_iter()
        .filter_map(|(present, ty)| present.then_some(ty))
        .collect()
    }

    /// `true` when the scan recognised any marker at all.
    pub fn any_present(&self) -> bool {
        [
            self.array,
            self.string,
            self.hashmap,
            self.tree,
            self.graph,
            self.results,
            self.pointers,
            self.call_stack,
            self.matrix,
            self.stack,
            self.queue,
            self.linked_list,
        ]
        .iter()
        .any(|p| p.present)
            || self.dp_row
            || self.node_edge_pairs
    }

    /// Number of structure components present at all.
    pub fn present_components(&self) -> usize {
        self.components().len()
    }
}

fn scan_arrays(data: &Value) -> Presence {
    if let Some(Value::Array(entries)) = data.get("arrays") {
        let size = entries
            .iter()
            .map(|e| match e {
                Value::Array(values) => values.len(),
                other => other
                    .get("values")
                    .map(collection_len)
                    .unwrap_or_default(),
            })
            .sum();
        return Presence::of(true, size);
    }
    match data.get("array") {
        Some(Value::Array(values)) => Presence::of(true, values.len()),
        _ => Presence::default(),
    }
}
