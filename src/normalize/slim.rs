use serde_json::{Map, Value, json};

use crate::model::canonical::CanonicalType;
use crate::model::data::{
    ArrayEntity, GraphData, HighlightCategory, Operation, Pointer, SanitizedData, TreeData, Window,
};

/// Project sanitized data onto the minimal shape a renderer for `ty` consumes.
///
/// Pure and deterministic. Validator bookkeeping (parent links, tree/traversal
/// kinds, raw operations, algorithm names) is dropped. When `ty` disagrees with
/// the data's own schema the data wins.
pub fn slim(ty: CanonicalType, data: &SanitizedData) -> Value {
    if data.canonical_type() != ty {
        tracing::debug!(requested = %ty, actual = %data.canonical_type(), "slim type differs from data");
    }
    match data {
        SanitizedData::Array(a) => json!({
            "arrays": a.arrays.iter().map(slim_entity).collect::<Vec<_>>(),
            "pointers": a.pointers.iter().map(slim_pointer).collect::<Vec<_>>(),
            "operations": a.operations.iter().map(operation_label).collect::<Vec<_>>(),
        }),
        SanitizedData::String(s) => {
            let mut out = Map::new();
            out.insert("text".into(), json!(s.text));
            out.insert("pointers".into(), s.pointers.iter().map(slim_pointer).collect());
            out.insert("highlights".into(), json!(s.highlights));
            put(&mut out, "window", s.window.map(slim_window));
            put(&mut out, "hashMap", s.hash_map.clone().map(Value::Object));
            Value::Object(out)
        }
        SanitizedData::Tree(t) => slim_tree(t),
        SanitizedData::Graph(g) => slim_graph(g),
        SanitizedData::Dp(d) => {
            let mut out = Map::new();
            out.insert("matrix".into(), json!(d.matrix));
            put(
                &mut out,
                "currentCell",
                d.current_cell.map(|c| json!({ "row": c.row, "col": c.col })),
            );
            out.insert(
                "highlights".into(),
                d.highlights.iter().map(|c| json!([c.row, c.col])).collect(),
            );
            out.insert("rowLabels".into(), json!(d.row_labels));
            out.insert("colLabels".into(), json!(d.col_labels));
            Value::Object(out)
        }
        SanitizedData::Hashmap(h) => json!({
            "entries": h.entries,
            "highlightedKeys": h.highlighted_keys,
        }),
        SanitizedData::Sequence(s) => json!({
            "items": s.items,
            "highlighted": s.highlighted,
        }),
        SanitizedData::Linkedlist(l) => json!({
            "nodes": l.nodes.iter().map(|n| json!({
                "id": n.id,
                "value": n.value,
                "next": n.next,
                "state": n.state,
            })).collect::<Vec<_>>(),
            "head": l.head,
        }),
        SanitizedData::Recursion(r) => json!({
            "callStack": r.call_stack.iter().map(|f| {
                let mut frame = Map::new();
                frame.insert("function".into(), json!(f.function));
                frame.insert("args".into(), f.args.clone());
                frame.insert("depth".into(), json!(f.depth));
                frame.insert("state".into(), json!(f.state));
                put(&mut frame, "returnValue", f.return_value.clone());
                Value::Object(frame)
            }).collect::<Vec<_>>(),
        }),
        SanitizedData::Results(r) => json!({ "results": r.results }),
        SanitizedData::Hybrid(h) => json!({
            "components": h.components,
            "parts": h
                .components
                .iter()
                .zip(&h.parts)
                .map(|(ty, part)| slim(*ty, part))
                .collect::<Vec<_>>(),
        }),
    }
}

/// Renderer label for an operation: bare strings trimmed and lower-cased,
/// structured operations as `kind(i,j)`.
pub fn operation_label(op: &Operation) -> String {
    match op {
        Operation::Label(s) => s.trim().to_lowercase(),
        Operation::Action(a) => {
            let indices: Vec<String> = a.indices.iter().map(usize::to_string).collect();
            format!("{}({})", a.kind.as_str(), indices.join(","))
        }
    }
}

fn slim_entity(e: &ArrayEntity) -> Value {
    let mut highlights = Map::new();
    for cat in HighlightCategory::ALL {
        let idx = e.highlights.get(cat);
        if !idx.is_empty() {
            highlights.insert(cat.as_str().into(), json!(idx));
        }
    }
    put(&mut highlights, "window", e.highlights.window.map(slim_window));
    json!({
        "name": e.name,
        "values": e.values,
        "highlights": highlights,
    })
}

fn slim_pointer(p: &Pointer) -> Value {
    let mut out = Map::new();
    out.insert("name".into(), json!(p.name));
    out.insert("position".into(), json!(p.position));
    put(&mut out, "color", p.color.clone().map(Value::String));
    Value::Object(out)
}

fn slim_window(w: Window) -> Value {
    json!({ "start": w.start, "end": w.end })
}

fn slim_tree(t: &TreeData) -> Value {
    let nodes: Vec<Value> = t
        .nodes
        .iter()
        .map(|n| {
            let mut out = Map::new();
            out.insert("id".into(), json!(n.id));
            out.insert("value".into(), n.value.clone());
            put(&mut out, "x", n.x.map(Value::from));
            put(&mut out, "y", n.y.map(Value::from));
            out.insert("state".into(), json!(n.state));
            Value::Object(out)
        })
        .collect();
    let edges: Vec<Value> = t
        .edges
        .iter()
        .map(|e| {
            let mut out = Map::new();
            out.insert("from".into(), json!(e.from));
            out.insert("to".into(), json!(e.to));
            put(&mut out, "state", e.state.clone().map(Value::String));
            Value::Object(out)
        })
        .collect();
    json!({
        "nodes": nodes,
        "edges": edges,
        "rootId": t.root_id,
        "currentNode": t.current_node,
        "traversalPath": t.traversal_path,
    })
}

fn slim_graph(g: &GraphData) -> Value {
    let vertices: Vec<Value> = g
        .vertices
        .iter()
        .map(|v| {
            let mut out = Map::new();
            out.insert("id".into(), json!(v.id));
            out.insert("label".into(), json!(v.label));
            put(&mut out, "x", v.x.map(Value::from));
            put(&mut out, "y", v.y.map(Value::from));
            out.insert("state".into(), json!(v.state));
            put(&mut out, "distance", v.distance.clone());
            Value::Object(out)
        })
        .collect();
    let edges: Vec<Value> = g
        .edges
        .iter()
        .map(|e| {
            let mut out = Map::new();
            out.insert("from".into(), json!(e.from));
            out.insert("to".into(), json!(e.to));
            put(&mut out, "weight", e.weight.map(Value::from));
            put(&mut out, "state", e.state.clone().map(Value::String));
            Value::Object(out)
        })
        .collect();
    json!({
        "vertices": vertices,
        "edges": edges,
        "directed": g.directed,
        "currentVertex": g.current_vertex,
        "visitedOrder": g.visited_order,
    })
}

fn put(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/slim.rs"]
mod tests;
