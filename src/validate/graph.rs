use std::collections::{HashMap, HashSet, VecDeque};

use serde_json::Value;

use crate::fallback::resolver::fallback_instance;
use crate::foundation::json::{as_id, as_number, display, first_field, id_field, str_field, string_list};
use crate::model::canonical::CanonicalType;
use crate::model::data::{GraphData, GraphEdge, GraphVertex, SanitizedData};
use crate::validate::ValidationLimits;
use crate::validate::report::{Report, ValidationResult};

const WEIGHTED_ALGORITHMS: [&str; 8] = [
    "dijkstra", "bellman", "prim", "kruskal", "floyd", "astar", "a*", "shortest",
];

pub(crate) fn validate_graph(data: &Value, limits: &ValidationLimits) -> ValidationResult {
    let mut report = Report::default();

    let Some(vertices) = collect_vertices(data, &mut report) else {
        report.missing_root("vertices");
        return report.finish(fallback_instance(CanonicalType::Graph));
    };
    let directed = data.get("directed").and_then(Value::as_bool).unwrap_or(false);
    let edges = collect_edges(data, &vertices, &mut report);

    analyze(&vertices, &edges, directed, data, limits, &mut report);

    let known: HashSet<&str> = vertices.iter().map(|v| v.id.as_str()).collect();
    let current_vertex = id_field(data, &["currentVertex", "current", "currentNode"]).filter(|id| {
        let ok = known.contains(id.as_str());
        if !ok {
            report.warn("currentVertex", format!("references unknown vertex '{id}'"));
        }
        ok
    });
    let visited_order = string_list(first_field(data, &["visitedOrder", "visited", "order"]).map(|(_, v)| v));
    for id in &visited_order {
        if !known.contains(id.as_str()) {
            report.warn("visitedOrder", format!("references unknown vertex '{id}'"));
        }
    }

    report.finish(SanitizedData::Graph(GraphData {
        vertices,
        edges,
        algorithm: str_field(data, &["algorithm", "algo"]),
        current_vertex,
        visited_order,
        directed,
    }))
}

fn collect_vertices(data: &Value, report: &mut Report) -> Option<Vec<GraphVertex>> {
    let (key, raw) = first_field(data, &["vertices", "nodes"])?;
    let items = report.expect_array(raw, key)?;
    let mut out: Vec<GraphVertex> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let field = format!("{key}[{i}]");
        // Bare ids are accepted as label-only vertices.
        if !item.is_object() {
            match as_id(item) {
                Some(id) if !out.iter().any(|v| v.id == id) => out.push(bare_vertex(id)),
                Some(id) => report.error(&field, format!("duplicate vertex id '{id}'")),
                None => report.error(&field, "must be an object or an id"),
            }
            continue;
        }
        let id = match id_field(item, &["id", "key", "name"]) {
            Some(id) => id,
            None => {
                report.error(&format!("{field}.id"), "is required");
                format!("v{i}")
            }
        };
        if out.iter().any(|v| v.id == id) {
            report.error(&format!("{field}.id"), format!("duplicate vertex id '{id}'"));
            continue;
        }
        let label = str_field(item, &["label", "name"])
            .or_else(|| item.get("value").map(display).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| id.clone());
        out.push(GraphVertex {
            label,
            x: item.get("x").and_then(as_number),
            y: item.get("y").and_then(as_number),
            state: str_field(item, &["state", "status"]).unwrap_or_else(|| "default".to_string()),
            distance: first_field(item, &["distance", "dist"]).map(|(_, v)| v.clone()),
            parent: id_field(item, &["parent", "previous", "prev"]),
            id,
        });
    }
    Some(out)
}

fn bare_vertex(id: String) -> GraphVertex {
    GraphVertex {
        label: id.clone(),
        id,
        x: None,
        y: None,
        state: "default".to_string(),
        distance: None,
        parent: None,
    }
}

fn collect_edges(data: &Value, vertices: &[GraphVertex], report: &mut Report) -> Vec<GraphEdge> {
    let raw = match data.get("edges") {
        Some(v) if !v.is_null() => v,
        _ => {
            report.warn("edges", "missing; the graph is treated as edgeless");
            return Vec::new();
        }
    };
    let Some(items) = report.expect_array(raw, "edges") else {
        return Vec::new();
    };

    let known: HashSet<&str> = vertices.iter().map(|v| v.id.as_str()).collect();
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let field = format!("edges[{i}]");
        if !item.is_object() {
            report.error(&field, "must be an object");
            continue;
        }
        let from = id_field(item, &["from", "source", "u"]);
        let to = id_field(item, &["to", "target", "v"]);
        if from.is_none() {
            report.error(&format!("{field}.from"), "is required");
        }
        if to.is_none() {
            report.error(&format!("{field}.to"), "is required");
        }
        let (Some(from), Some(to)) = (from, to) else {
            continue;
        };

        let mut dangling = false;
        for end in [&from, &to] {
            if !known.contains(end.as_str()) {
                report.error(&field, format!("references unknown vertex '{end}'"));
                dangling = true;
            }
        }

        let weight = match first_field(item, &["weight", "w", "cost"]) {
            Some((_, w)) => match report.expect_number(w, &format!("{field}.weight")) {
                Some(w) => Some(w),
                None => continue,
            },
            None => None,
        };
        if dangling {
            continue;
        }
        out.push(GraphEdge {
            from,
            to,
            weight,
            directed: item.get("directed").and_then(Value::as_bool),
            state: str_field(item, &["state", "status"]),
        });
    }
    out
}

fn analyze(
    vertices: &[GraphVertex],
    edges: &[GraphEdge],
    directed: bool,
    data: &Value,
    limits: &ValidationLimits,
    report: &mut Report,
) {
    let n = vertices.len();
    match n {
        0 => {
            report.edge_case("Empty graph");
            return;
        }
        1 => report.edge_case("Single-vertex graph"),
        _ => {}
    }

    let index: HashMap<&str, usize> = vertices
        .iter()
        .enumerate()
        .map(|(i, v)| (v.id.as_str(), i))
        .collect();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut degree = vec![0usize; n];
    let mut distinct: HashSet<(usize, usize)> = HashSet::new();
    let mut negative = false;
    let mut unweighted = 0usize;

    for e in edges {
        let (Some(&a), Some(&b)) = (index.get(e.from.as_str()), index.get(e.to.as_str())) else {
            continue;
        };
        if a == b {
            report.edge_case(format!("Self-loop on vertex '{}'", e.from));
        }
        if let Some(w) = e.weight {
            if w < 0.0 {
                negative = true;
                report.edge_case(format!(
                    "Negative edge weight {w} on {} -> {}",
                    e.from, e.to
                ));
            }
        } else {
            unweighted += 1;
        }

        let key = if directed { (a, b) } else { (a.min(b), a.max(b)) };
        if !distinct.insert(key) {
            report.pitfall(format!(
                "Duplicate edge {} {} {}: parallel edges overlap when drawn",
                e.from,
                if directed { "->" } else { "-" },
                e.to
            ));
        }

        adjacency[a].push(b);
        if !directed {
            adjacency[b].push(a);
        }
        degree[a] += 1;
        degree[b] += 1;
    }

    let reached = reachable_from(0, &adjacency);
    let connected = reached == n;
    if !connected {
        report.edge_case(format!(
            "Disconnected graph: {} of {n} vertices unreachable from '{}'",
            n - reached,
            vertices[0].id
        ));
    }

    let e = distinct.iter().filter(|(a, b)| a != b).count();
    let full = if directed { n * (n - 1) } else { n * (n - 1) / 2 };
    if n > 1 && e == full {
        report.edge_case(format!("Complete graph on {n} vertices"));
    }
    if edges.len() > 2 * n {
        report.edge_case(format!("Dense graph: {} edges for {n} vertices", edges.len()));
    } else if edges.len() + 1 < n {
        report.edge_case(format!("Sparse graph: {} edges for {n} vertices", edges.len()));
    }

    if directed && has_cycle(&adjacency) {
        report.edge_case("Cycles detected in directed graph");
    }

    let algorithm = str_field(data, &["algorithm", "algo"])
        .map(|a| a.to_ascii_lowercase())
        .unwrap_or_default();
    if algorithm.contains("dijkstra") && negative {
        report.pitfall(
            "Dijkstra's algorithm is incorrect with negative edge weights; use Bellman-Ford",
        );
    }
    let traversal = ["dfs", "bfs", "depth", "breadth"]
        .iter()
        .any(|k| algorithm.contains(k));
    if traversal && !connected {
        report.pitfall(
            "Traversal from a single source will not visit every vertex of a disconnected graph",
        );
    }
    if unweighted > 0 && WEIGHTED_ALGORITHMS.iter().any(|k| algorithm.contains(k)) {
        report.pitfall(format!(
            "Weighted algorithm '{algorithm}' but {unweighted} edge(s) have no weight"
        ));
    }

    let hub_limit = limits.high_degree_ratio * n as f64;
    for (v, d) in vertices.iter().zip(&degree) {
        if n > 2 && *d as f64 > hub_limit {
            report.pitfall(format!(
                "Vertex '{}' has degree {d}, over {:.0}% of |V|: hub vertices crowd the layout",
                v.id,
                limits.high_degree_ratio * 100.0
            ));
        }
    }
}

fn reachable_from(start: usize, adjacency: &[Vec<usize>]) -> usize {
    let mut seen = vec![false; adjacency.len()];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    let mut count = 0;
    while let Some(v) = queue.pop_front() {
        count += 1;
        for &w in &adjacency[v] {
            if !seen[w] {
                seen[w] = true;
                queue.push_back(w);
            }
        }
    }
    count
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// White/gray/black DFS with an explicit stack; a gray successor closes a cycle.
fn has_cycle(adjacency: &[Vec<usize>]) -> bool {
    let mut mark = vec![Mark::White; adjacency.len()];
    for start in 0..adjacency.len() {
        if mark[start] != Mark::White {
            continue;
        }
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        mark[start] = Mark::Gray;
        while let Some(top) = stack.last_mut() {
            let v = top.0;
            let next = adjacency[v].get(top.1).copied();
            top.1 += 1;
            match next {
                Some(w) => match mark[w] {
                    Mark::Gray => return true,
                    Mark::White => {
                        mark[w] = Mark::Gray;
                        stack.push((w, 0));
                    }
                    Mark::Black => {}
                },
                None => {
                    mark[v] = Mark::Black;
                    stack.pop();
                }
            }
        }
    }
    false
}

#[cfg(test)]
#[path = "../../tests/unit/validate/graph.rs"]
mod tests;
