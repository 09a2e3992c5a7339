//! Per-type validators.
//!
//! Every validator walks a loosely-typed payload, collects field-qualified errors
//! plus advisory edge cases and pitfalls, and always returns renderable
//! [`SanitizedData`](crate::SanitizedData), substituting the type's fallback
//! instance when the root collection is missing.

use serde_json::Value;

use crate::model::canonical::CanonicalType;
use crate::model::data::SequenceKind;

pub(crate) mod array;
pub(crate) mod collection;
pub(crate) mod dp;
pub(crate) mod graph;
pub(crate) mod hybrid;
pub(crate) mod report;
pub(crate) mod string;
pub(crate) mod tree;

pub use report::ValidationResult;

/// Thresholds behind size-based warnings and pedagogical detections.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationLimits {
    /// Arrays longer than this get a performance warning.
    pub large_array: usize,
    /// Absolute values above this raise an overflow pitfall.
    pub large_magnitude: f64,
    pub max_tree_depth: usize,
    pub max_tree_breadth: usize,
    /// Fraction of `|V|` above which a vertex counts as a hub.
    pub high_degree_ratio: f64,
    /// Call stacks deeper than this raise a stack-overflow pitfall.
    pub deep_recursion: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            large_array: 1000,
            large_magnitude: 1.0e9,
            max_tree_depth: 10,
            max_tree_breadth: 20,
            high_degree_ratio: 0.8,
            deep_recursion: 50,
        }
    }
}

/// Validate `data` as `ty` with default limits.
pub fn validate(ty: CanonicalType, data: &Value) -> ValidationResult {
    validate_with(ty, data, &ValidationLimits::default())
}

/// Validate `data` as `ty`.
#[tracing::instrument(skip(data, limits), fields(ty = %ty))]
pub fn validate_with(ty: CanonicalType, data: &Value, limits: &ValidationLimits) -> ValidationResult {
    let result = match ty {
        CanonicalType::Array => array::validate_array(data, limits),
        CanonicalType::String => string::validate_string(data),
        CanonicalType::Tree => tree::validate_tree(data, limits),
        CanonicalType::Graph => graph::validate_graph(data, limits),
        CanonicalType::Dp => dp::validate_dp(data),
        CanonicalType::Hashmap => collection::validate_hashmap(data),
        CanonicalType::Stack => collection::validate_sequence(SequenceKind::Stack, data),
        CanonicalType::Queue => collection::validate_sequence(SequenceKind::Queue, data),
        CanonicalType::Linkedlist => collection::validate_linked_list(data),
        CanonicalType::Recursion => collection::validate_recursion(data, limits),
        CanonicalType::Results => collection::validate_results(data),
        CanonicalType::Hybrid => hybrid::validate_hybrid(data, limits),
    };
    if !result.is_valid {
        tracing::warn!(
            errors = result.errors.len(),
            first = result.errors.first().map(String::as_str).unwrap_or(""),
            "payload failed validation"
        );
    }
    result
}
