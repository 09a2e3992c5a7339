use crate::classify::flags::StructureFlags;
use crate::model::canonical::CanonicalType;
use crate::model::step::Visualization;

/// Tunable classifier thresholds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// A hash map with more entries than this counts as a strong component, and wins
    /// over a competing array in the precedence rules.
    pub hybrid_hashmap_threshold: usize,
    /// Number of strong components that turns a payload into `hybrid`.
    pub min_strong_components: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            hybrid_hashmap_threshold: 3,
            min_strong_components: 2,
        }
    }
}

/// Outcome of classifying one payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub canonical: CanonicalType,
    /// Raw hint as given by the producer.
    pub hint: Option<String>,
    /// `true` when the hint was verified and used.
    pub hint_accepted: bool,
    /// Human-readable note when a hint was rejected.
    pub mismatch: Option<String>,
    pub flags: StructureFlags,
}

/// Decides which canonical schema a payload follows.
#[derive(Clone, Debug, Default)]
pub struct TypeClassifier {
    config: ClassifierConfig,
}

impl TypeClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify and return only the canonical type.
    pub fn classify_type(&self, viz: &Visualization) -> CanonicalType {
        self.classify(viz).canonical
    }

    #[tracing::instrument(skip_all, fields(hint = viz.hint.as_deref().unwrap_or("")))]
    pub fn classify(&self, viz: &Visualization) -> Classification {
        let flags = StructureFlags::scan(&viz.data);
        let structural = self.structural(&flags);

        let Some(raw_hint) = viz.hint.as_deref().filter(|h| !h.trim().is_empty()) else {
            return Classification {
                canonical: structural,
                hint: None,
                hint_accepted: false,
                mismatch: None,
                flags,
            };
        };

        let (canonical, mismatch) = match CanonicalType::from_hint(raw_hint) {
            Some(hinted) if self.hint_verified(hinted, &flags) => {
                return Classification {
                    canonical: hinted,
                    hint: Some(raw_hint.to_string()),
                    hint_accepted: true,
                    mismatch: None,
                    flags,
                };
            }
            // Nothing recognisable to contradict the hint: validate as hinted so the
            // missing marker is reported against the intended schema.
            Some(hinted) if !flags.any_present() => (
                hinted,
                format!(
                    "type hint '{raw_hint}' not backed by the payload: it lacks the {} marker",
                    required_marker(hinted)
                ),
            ),
            Some(hinted) => (
                structural,
                format!(
                    "type hint '{raw_hint}' rejected: payload lacks the {} marker; using '{structural}'",
                    required_marker(hinted)
                ),
            ),
            None => (
                structural,
                format!("unknown type hint '{raw_hint}'; using '{structural}'"),
            ),
        };
        tracing::warn!(hint = raw_hint, canonical = %canonical, "{mismatch}");

        Classification {
            canonical,
            hint: Some(raw_hint.to_string()),
            hint_accepted: false,
            mismatch: Some(mismatch),
            flags,
        }
    }

    fn strong_components(&self, f: &StructureFlags) -> usize {
        [
            f.array.non_empty(),
            f.string.non_empty(),
            f.hashmap.present && f.hashmap.size > self.config.hybrid_hashmap_threshold,
            f.tree.non_empty(),
            f.graph.non_empty(),
            f.call_stack.non_empty(),
            f.matrix.non_empty(),
        ]
        .into_iter()
        .filter(|b| *b)
        .count()
    }

    fn structural(&self, f: &StructureFlags) -> CanonicalType {
        if self.strong_components(f) >= self.config.min_strong_components.max(2) {
            return CanonicalType::Hybrid;
        }
        if f.results.non_empty() {
            return CanonicalType::Results;
        }
        if f.matrix.present {
            return CanonicalType::Dp;
        }
        if f.string.present {
            return CanonicalType::String;
        }
        if f.hashmap.non_empty()
            && (f.hashmap.size > self.config.hybrid_hashmap_threshold || !f.array.present)
        {
            return CanonicalType::Hashmap;
        }
        if f.call_stack.present {
            return CanonicalType::Recursion;
        }
        if f.tree.present {
            return CanonicalType::Tree;
        }
        if f.graph.present {
            return CanonicalType::Graph;
        }
        if f.array.present {
            return CanonicalType::Array;
        }
        if f.stack.present {
            return CanonicalType::Stack;
        }
        if f.queue.present {
            return CanonicalType::Queue;
        }
        if f.linked_list.present {
            return CanonicalType::Linkedlist;
        }
        CanonicalType::Array
    }

    fn hint_verified(&self, hinted: CanonicalType, f: &StructureFlags) -> bool {
        match hinted {
            CanonicalType::Array => f.array.present,
            CanonicalType::String => f.string.present,
            CanonicalType::Hashmap => f.hashmap.present,
            CanonicalType::Tree => f.tree.present,
            CanonicalType::Graph => f.graph.present || f.node_edge_pairs,
            CanonicalType::Linkedlist => f.linked_list.present || f.tree.present,
            CanonicalType::Recursion => f.call_stack.present,
            CanonicalType::Dp => f.matrix.present || f.dp_row,
            CanonicalType::Stack => f.stack.present,
            CanonicalType::Queue => f.queue.present,
            CanonicalType::Results => f.results.present,
            CanonicalType::Hybrid => f.present_components() >= 2,
        }
    }
}

fn required_marker(ty: CanonicalType) -> &'static str {
    match ty {
        CanonicalType::Array => "`array`/`arrays`",
        CanonicalType::String => "`string`/`text`/`input`",
        CanonicalType::Hashmap => "`hashMap` object",
        CanonicalType::Tree => "`nodes`/`root`",
        CanonicalType::Graph => "`vertices`+`edges`",
        CanonicalType::Linkedlist => "`nodes`/`list`/`head`",
        CanonicalType::Recursion => "`callStack` array",
        CanonicalType::Dp => "2-D `matrix`/`table`/`dp`",
        CanonicalType::Stack => "`stack` array",
        CanonicalType::Queue => "`queue` array",
        CanonicalType::Results => "`results`",
        CanonicalType::Hybrid => "two or more structures",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/classify/classifier.rs"]
mod tests;
