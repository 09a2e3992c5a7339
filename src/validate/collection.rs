//! Validators for the lighter collection types: hash maps, stacks and queues,
//! linked lists, recursion call stacks and final results.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::classify::flags::{CALL_STACK_KEYS, HASHMAP_KEYS};
use crate::fallback::resolver::fallback_instance;
use crate::foundation::json::{as_index, display, first_field, id_field, kind_name, str_field, string_list};
use crate::model::canonical::CanonicalType;
use crate::model::data::{
    CallFrame, HashMapData, LinkedListData, ListNode, RecursionData, ResultsData, SanitizedData,
    SequenceData, SequenceKind,
};
use crate::validate::ValidationLimits;
use crate::validate::report::{Report, ValidationResult};

pub(crate) fn validate_hashmap(data: &Value) -> ValidationResult {
    let mut report = Report::default();

    let entries: Option<&Map<String, Value>> = match first_field(data, &HASHMAP_KEYS) {
        Some((_, Value::Object(m))) => Some(m),
        Some((key, other)) => {
            report.error(key, format!("must be an object, got {}", kind_name(other)));
            None
        }
        None => None,
    };
    let Some(entries) = entries else {
        report.missing_root("hashMap");
        return report.finish(fallback_instance(CanonicalType::Hashmap));
    };

    if entries.is_empty() {
        report.edge_case("Empty hash map");
    }
    let mut folded: HashMap<String, &str> = HashMap::new();
    for key in entries.keys() {
        if let Some(prev) = folded.insert(key.to_lowercase(), key.as_str()) {
            report.pitfall(format!(
                "Keys '{prev}' and '{key}' differ only in case: lookups are case-sensitive"
            ));
        }
    }

    let mut highlighted_keys = Vec::new();
    let wanted = string_list(first_field(data, &["highlightedKeys", "highlighted", "highlight"]).map(|(_, v)| v));
    for key in wanted {
        if entries.contains_key(&key) {
            highlighted_keys.push(key);
        } else {
            report.warn("highlightedKeys", format!("unknown key '{key}'"));
        }
    }

    report.finish(SanitizedData::Hashmap(HashMapData {
        entries: entries.clone(),
        highlighted_keys,
    }))
}

pub(crate) fn validate_sequence(kind: SequenceKind, data: &Value) -> ValidationResult {
    let mut report = Report::default();
    let (ty, key, empty_note) = match kind {
        SequenceKind::Stack => (CanonicalType::Stack, "stack", "Empty stack: pop or peek would underflow"),
        SequenceKind::Queue => (CanonicalType::Queue, "queue", "Empty queue: dequeue would underflow"),
    };

    let items = match data {
        Value::Array(items) => Some(items),
        _ => match data.get(key).or_else(|| data.get("items")).filter(|v| !v.is_null()) {
            Some(v) => report.expect_array(v, key),
            None => None,
        },
    };
    let Some(items) = items else {
        report.missing_root(key);
        return report.finish(fallback_instance(ty));
    };

    match items.len() {
        0 => report.edge_case(empty_note),
        1 => report.edge_case(format!("Single-element {key}")),
        _ => {}
    }

    let mut highlighted = Vec::new();
    if let Some((field, raw)) = first_field(data, &["highlighted", "highlights"]) {
        let list: Vec<&Value> = match raw {
            Value::Array(xs) => xs.iter().collect(),
            Value::Number(_) => vec![raw],
            other => {
                report.expect_array(other, field);
                Vec::new()
            }
        };
        for (j, v) in list.into_iter().enumerate() {
            if let Some(i) = report.expect_index(v, items.len(), &format!("{field}[{j}]")) {
                if !highlighted.contains(&i) {
                    highlighted.push(i);
                }
            }
        }
    }

    report.finish(SanitizedData::Sequence(SequenceData {
        kind,
        items: items.clone(),
        highlighted,
    }))
}

pub(crate) fn validate_linked_list(data: &Value) -> ValidationResult {
    let mut report = Report::default();

    let raw = match first_field(data, &["nodes", "list"]) {
        Some((key, v)) => report.expect_array(v, key).map(|items| (key, items)),
        None => None,
    };
    let Some((key, items)) = raw else {
        report.missing_root("nodes");
        return report.finish(fallback_instance(CanonicalType::Linkedlist));
    };

    // Bare values form an implicit chain in order.
    let implicit = items.iter().all(|v| !v.is_object());
    let mut nodes: Vec<ListNode> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let field = format!("{key}[{i}]");
        if implicit {
            nodes.push(ListNode {
                id: format!("n{i}"),
                value: item.clone(),
                next: (i + 1 < items.len()).then(|| format!("n{}", i + 1)),
                state: "default".to_string(),
            });
            continue;
        }
        if !item.is_object() {
            report.error(&field, "must be an object");
            continue;
        }
        let id = id_field(item, &["id", "key"]).unwrap_or_else(|| {
            report.error(&format!("{field}.id"), "is required");
            format!("n{i}")
        });
        if nodes.iter().any(|n| n.id == id) {
            report.error(&format!("{field}.id"), format!("duplicate node id '{id}'"));
            continue;
        }
        nodes.push(ListNode {
            value: first_field(item, &["value", "val", "data"])
                .map(|(_, v)| v.clone())
                .unwrap_or(Value::Null),
            next: id_field(item, &["next", "nextId"]),
            state: str_field(item, &["state", "status"]).unwrap_or_else(|| "default".to_string()),
            id,
        });
    }

    let known: HashSet<String> = nodes.iter().map(|n| n.id.clone()).collect();
    for (i, node) in nodes.iter_mut().enumerate() {
        if let Some(next) = node.next.as_ref().filter(|n| !known.contains(*n)) {
            report.error(&format!("{key}[{i}].next"), format!("references unknown node '{next}'"));
            node.next = None;
        }
    }

    let head = match id_field(data, &["head"]) {
        Some(h) if known.contains(&h) => Some(h),
        Some(h) => {
            report.error("head", format!("references unknown node '{h}'"));
            None
        }
        None => {
            let targets: HashSet<&str> = nodes.iter().filter_map(|n| n.next.as_deref()).collect();
            nodes
                .iter()
                .find(|n| !targets.contains(n.id.as_str()))
                .or_else(|| nodes.first())
                .map(|n| n.id.clone())
        }
    };

    match nodes.len() {
        0 => report.edge_case("Empty linked list"),
        1 => report.edge_case("Single-node list"),
        _ => {}
    }

    if let Some(head) = &head {
        let next_of: HashMap<&str, Option<&str>> = nodes
            .iter()
            .map(|n| (n.id.as_str(), n.next.as_deref()))
            .collect();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut cursor = Some(head.as_str());
        while let Some(id) = cursor {
            if !seen.insert(id) {
                report.edge_case(format!("Cycle detected in linked list at node '{id}'"));
                report.pitfall("Traversal without cycle detection will never terminate on this list");
                break;
            }
            cursor = next_of.get(id).copied().flatten();
        }
        let orphans: Vec<&str> = nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| !seen.contains(id))
            .collect();
        if !orphans.is_empty() {
            report.edge_case(format!("Nodes not reachable from head: {}", orphans.join(", ")));
        }
    }

    report.finish(SanitizedData::Linkedlist(LinkedListData { nodes, head }))
}

pub(crate) fn validate_recursion(data: &Value, limits: &ValidationLimits) -> ValidationResult {
    let mut report = Report::default();

    let frames = match first_field(data, &CALL_STACK_KEYS) {
        Some((key, v)) => report.expect_array(v, key),
        None => None,
    };
    let Some(frames) = frames else {
        report.missing_root("callStack");
        return report.finish(fallback_instance(CanonicalType::Recursion));
    };

    let mut call_stack = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        let field = format!("callStack[{i}]");
        if !frame.is_object() {
            report.error(&field, "must be an object");
            continue;
        }
        let function = str_field(frame, &["function", "name", "fn"]).unwrap_or_else(|| {
            report.error(&format!("{field}.function"), "is required");
            "anonymous".to_string()
        });
        let depth = match frame.get("depth").filter(|d| !d.is_null()) {
            Some(d) => match as_index(d).and_then(|d| usize::try_from(d).ok()) {
                Some(d) => d,
                None => {
                    report.error(&format!("{field}.depth"), "must be a non-negative integer");
                    i
                }
            },
            None => i,
        };
        call_stack.push(CallFrame {
            function,
            args: first_field(frame, &["args", "arguments", "params"])
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| Value::Array(Vec::new())),
            depth,
            state: str_field(frame, &["state", "status"]).unwrap_or_else(|| "active".to_string()),
            return_value: first_field(frame, &["returnValue", "return", "result"]).map(|(_, v)| v.clone()),
        });
    }

    if call_stack.is_empty() {
        report.edge_case("Empty call stack");
    }
    if call_stack.len() > limits.deep_recursion {
        report.pitfall(format!(
            "Deep recursion ({} frames): risk of stack overflow; consider memoization or iteration",
            call_stack.len()
        ));
    }
    let mut calls: HashSet<String> = HashSet::new();
    for f in &call_stack {
        let sig = format!("{}({})", f.function, display_args(&f.args));
        if !calls.insert(sig.clone()) {
            report.pitfall(format!(
                "Repeated call {sig}: overlapping subproblems suggest memoization"
            ));
        }
    }

    report.finish(SanitizedData::Recursion(RecursionData { call_stack }))
}

fn display_args(args: &Value) -> String {
    match args {
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(", "),
        other => display(other),
    }
}

pub(crate) fn validate_results(data: &Value) -> ValidationResult {
    let mut report = Report::default();
    let Some(results) = data.get("results").filter(|v| !v.is_null()) else {
        report.missing_root("results");
        return report.finish(fallback_instance(CanonicalType::Results));
    };
    let empty = match results {
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    };
    if empty {
        report.edge_case("Empty results");
    }
    report.finish(SanitizedData::Results(ResultsData {
        results: results.clone(),
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/validate/collection.rs"]
mod tests;
