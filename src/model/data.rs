//! Canonical, validator-produced data shapes.
//!
//! Everything here is what a renderer may rely on: indices are in bounds, edges name
//! existing endpoints, and every collection is present (possibly empty).

use serde_json::{Map, Value};

use crate::model::canonical::CanonicalType;

/// Sanitized payload, one variant per canonical schema.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum SanitizedData {
    /// Arrays with highlights, pointers and operations.
    Array(ArrayData),
    /// String with pointers/window.
    String(StringData),
    /// Tree nodes and edges.
    Tree(TreeData),
    /// Graph vertices and edges.
    Graph(GraphData),
    /// Rectangular DP table.
    Dp(DpData),
    /// Key/value entries.
    Hashmap(HashMapData),
    /// Stack or queue items.
    Sequence(SequenceData),
    /// Linked list nodes.
    Linkedlist(LinkedListData),
    /// Recursion call frames.
    Recursion(RecursionData),
    /// Final results.
    Results(ResultsData),
    /// Several sanitized components.
    Hybrid(HybridData),
}

impl SanitizedData {
    /// Canonical type this payload conforms to.
    pub fn canonical_type(&self) -> CanonicalType {
        match self {
            SanitizedData::Array(_) => CanonicalType::Array,
            SanitizedData::String(_) => CanonicalType::String,
            SanitizedData::Tree(_) => CanonicalType::Tree,
            SanitizedData::Graph(_) => CanonicalType::Graph,
            SanitizedData::Dp(_) => CanonicalType::Dp,
            SanitizedData::Hashmap(_) => CanonicalType::Hashmap,
            SanitizedData::Sequence(s) => match s.kind {
                SequenceKind::Stack => CanonicalType::Stack,
                SequenceKind::Queue => CanonicalType::Queue,
            },
            SanitizedData::Linkedlist(_) => CanonicalType::Linkedlist,
            SanitizedData::Recursion(_) => CanonicalType::Recursion,
            SanitizedData::Results(_) => CanonicalType::Results,
            SanitizedData::Hybrid(_) => CanonicalType::Hybrid,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayData {
    pub arrays: Vec<ArrayEntity>,
    pub pointers: Vec<Pointer>,
    pub operations: Vec<Operation>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayEntity {
    pub name: String,
    pub values: Vec<Value>,
    pub highlights: Highlights,
}

/// Index-based highlight categories for one array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightCategory {
    Current,
    Target,
    Comparison,
    Sorted,
    Visited,
    Subarray,
}

impl HighlightCategory {
    pub const ALL: [HighlightCategory; 6] = [
        HighlightCategory::Current,
        HighlightCategory::Target,
        HighlightCategory::Comparison,
        HighlightCategory::Sorted,
        HighlightCategory::Visited,
        HighlightCategory::Subarray,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HighlightCategory::Current => "current",
            HighlightCategory::Target => "target",
            HighlightCategory::Comparison => "comparison",
            HighlightCategory::Sorted => "sorted",
            HighlightCategory::Visited => "visited",
            HighlightCategory::Subarray => "subarray",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    pub current: Vec<usize>,
    pub target: Vec<usize>,
    pub comparison: Vec<usize>,
    pub sorted: Vec<usize>,
    pub visited: Vec<usize>,
    pub subarray: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<Window>,
}

impl Highlights {
    pub fn get(&self, cat: HighlightCategory) -> &[usize] {
        match cat {
            HighlightCategory::Current => &self.current,
            HighlightCategory::Target => &self.target,
            HighlightCategory::Comparison => &self.comparison,
            HighlightCategory::Sorted => &self.sorted,
            HighlightCategory::Visited => &self.visited,
            HighlightCategory::Subarray => &self.subarray,
        }
    }

    pub fn get_mut(&mut self, cat: HighlightCategory) -> &mut Vec<usize> {
        match cat {
            HighlightCategory::Current => &mut self.current,
            HighlightCategory::Target => &mut self.target,
            HighlightCategory::Comparison => &mut self.comparison,
            HighlightCategory::Sorted => &mut self.sorted,
            HighlightCategory::Visited => &mut self.visited,
            HighlightCategory::Subarray => &mut self.subarray,
        }
    }
}

/// Inclusive index window `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

/// Labeled index marker.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Pointer {
    pub name: String,
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Array operation as reported by the producer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Operation {
    /// Free-form label, trusted and normalized by the slim projector.
    Label(String),
    /// Structured operation with validated indices.
    Action(ArrayOperation),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayOperation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub indices: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Swap,
    Compare,
    Access,
    Insert,
    Delete,
    Move,
}

impl OperationKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swap" => Some(Self::Swap),
            "compare" => Some(Self::Compare),
            "access" => Some(Self::Access),
            "insert" => Some(Self::Insert),
            "delete" => Some(Self::Delete),
            "move" => Some(Self::Move),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Swap => "swap",
            Self::Compare => "compare",
            Self::Access => "access",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Move => "move",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringData {
    pub text: String,
    pub pointers: Vec<Pointer>,
    pub highlights: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<Window>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_map: Option<Map<String, Value>>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeData {
    pub nodes: Vec<TreeNode>,
    pub edges: Vec<TreeEdge>,
    pub traversal_path: Vec<String>,
    pub current_node: Option<String>,
    pub traversal_type: Option<String>,
    pub operations: Vec<Value>,
    pub tree_type: Option<String>,
    pub root_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeEdge {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<ChildSide>,
}

/// Which child slot of a binary node an edge fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildSide {
    Left,
    Right,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphData {
    pub vertices: Vec<GraphVertex>,
    pub edges: Vec<GraphEdge>,
    pub algorithm: Option<String>,
    pub current_vertex: Option<String>,
    pub visited_order: Vec<String>,
    pub directed: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphVertex {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DpData {
    pub matrix: Vec<Vec<Value>>,
    pub rows: usize,
    pub cols: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_cell: Option<Cell>,
    pub highlights: Vec<Cell>,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashMapData {
    pub entries: Map<String, Value>,
    pub highlighted_keys: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    Stack,
    Queue,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceData {
    pub kind: SequenceKind,
    pub items: Vec<Value>,
    pub highlighted: Vec<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedListData {
    pub nodes: Vec<ListNode>,
    pub head: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNode {
    pub id: String,
    pub value: Value,
    pub next: Option<String>,
    pub state: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecursionData {
    pub call_stack: Vec<CallFrame>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrame {
    pub function: String,
    pub args: Value,
    pub depth: usize,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_value: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsData {
    pub results: Value,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridData {
    pub components: Vec<CanonicalType>,
    pub parts: Vec<SanitizedData>,
}
