use std::fmt;
use std::str::FromStr;

/// The closed set of visualizer schemas a step can use.
///
/// Every dispatch in the pipeline (classifier, validators, normalizer, fallback) matches
/// on this enum exhaustively.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalType {
    /// One or more indexed arrays.
    Array,
    /// A string with optional pointers/window.
    String,
    /// Key/value table.
    Hashmap,
    /// Rooted tree.
    Tree,
    /// General graph.
    Graph,
    /// Singly linked list.
    Linkedlist,
    /// Recursion call stack.
    Recursion,
    /// Dynamic-programming table.
    Dp,
    /// LIFO stack.
    Stack,
    /// FIFO queue.
    Queue,
    /// Final results summary.
    Results,
    /// Several structures at once.
    Hybrid,
}

impl CanonicalType {
    /// All variants in declaration order.
    pub const ALL: [CanonicalType; 12] = [
        CanonicalType::Array,
        CanonicalType::String,
        CanonicalType::Hashmap,
        CanonicalType::Tree,
        CanonicalType::Graph,
        CanonicalType::Linkedlist,
        CanonicalType::Recursion,
        CanonicalType::Dp,
        CanonicalType::Stack,
        CanonicalType::Queue,
        CanonicalType::Results,
        CanonicalType::Hybrid,
    ];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalType::Array => "array",
            CanonicalType::String => "string",
            CanonicalType::Hashmap => "hashmap",
            CanonicalType::Tree => "tree",
            CanonicalType::Graph => "graph",
            CanonicalType::Linkedlist => "linkedlist",
            CanonicalType::Recursion => "recursion",
            CanonicalType::Dp => "dp",
            CanonicalType::Stack => "stack",
            CanonicalType::Queue => "queue",
            CanonicalType::Results => "results",
            CanonicalType::Hybrid => "hybrid",
        }
    }

    /// `true` for types whose renderer needs computed positions.
    pub fn is_spatial(self) -> bool {
        matches!(self, CanonicalType::Tree | CanonicalType::Graph)
    }

    /// Lenient hint parsing: case-insensitive, ignores `_`, `-` and spaces, and accepts
    /// the aliases step producers commonly emit.
    pub fn from_hint(hint: &str) -> Option<Self> {
        let key: String = hint
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let ty = match key.as_str() {
            "array" | "arrays" | "list1d" => CanonicalType::Array,
            "string" | "text" | "str" => CanonicalType::String,
            "hashmap" | "map" | "hashtable" | "dict" | "dictionary" | "hash" => {
                CanonicalType::Hashmap
            }
            "tree" | "bst" | "binarytree" | "heap" => CanonicalType::Tree,
            "graph" => CanonicalType::Graph,
            "linkedlist" | "list" => CanonicalType::Linkedlist,
            "recursion" | "callstack" | "recursive" => CanonicalType::Recursion,
            "dp" | "matrix" | "table" | "dynamicprogramming" | "grid" => CanonicalType::Dp,
            "stack" => CanonicalType::Stack,
            "queue" | "deque" => CanonicalType::Queue,
            "results" | "result" | "summary" => CanonicalType::Results,
            "hybrid" | "mixed" | "composite" => CanonicalType::Hybrid,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalType {
    type Err = crate::StepvizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hint(s).ok_or_else(|| {
            crate::StepvizError::classification(format!("unknown visualization type '{s}'"))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/canonical.rs"]
mod tests;
