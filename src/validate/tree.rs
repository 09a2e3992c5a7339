use std::collections::{HashMap, HashSet, VecDeque};

use serde_json::Value;

use crate::fallback::resolver::fallback_instance;
use crate::foundation::json::{as_id, as_number, display, first_field, id_field, str_field, string_list};
use crate::model::canonical::CanonicalType;
use crate::model::data::{ChildSide, SanitizedData, TreeData, TreeEdge, TreeNode};
use crate::validate::ValidationLimits;
use crate::validate::report::{Report, ValidationResult};

/// A parent -> child relation before referential checks.
struct Link {
    field: String,
    from: String,
    to: String,
    side: Option<ChildSide>,
    state: Option<String>,
    explicit: bool,
}

pub(crate) fn validate_tree(data: &Value, limits: &ValidationLimits) -> ValidationResult {
    let mut report = Report::default();
    let mut links = Vec::new();

    let Some(mut nodes) = collect_nodes(data, &mut links, &mut report) else {
        report.missing_root("nodes");
        return report.finish(fallback_instance(CanonicalType::Tree));
    };

    // Explicit edges take priority over links derived from node fields.
    let mut explicit = collect_edges(data, &mut report);
    explicit.append(&mut links);
    let edges = resolve_links(explicit, &nodes, &mut report);

    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();
    let mut parents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut children: Vec<Vec<(usize, Option<ChildSide>)>> = vec![Vec::new(); nodes.len()];
    for e in &edges {
        let (Some(&p), Some(&c)) = (index.get(e.from.as_str()), index.get(e.to.as_str())) else {
            continue;
        };
        parents[c].push(p);
        children[p].push((c, e.side));
    }

    let mut parent_ids = Vec::with_capacity(nodes.len());
    for (i, ps) in parents.iter().enumerate() {
        if ps.len() > 1 {
            report.pitfall(format!(
                "Node '{}' has {} parents; every tree node except the root has exactly one",
                nodes[i].id,
                ps.len()
            ));
        }
        parent_ids.push(ps.first().map(|&p| nodes[p].id.clone()));
    }
    for (node, parent) in nodes.iter_mut().zip(parent_ids) {
        node.parent = parent;
    }

    let roots: Vec<usize> = (0..nodes.len()).filter(|&i| parents[i].is_empty()).collect();
    let root_id = resolve_root(data, &nodes, &roots, &mut report);

    analyze_shape(&nodes, &edges, &roots, &children, limits, &mut report);

    let tree_type = str_field(data, &["treeType", "tree_type"]).map(|t| t.to_ascii_lowercase());
    if tree_type.as_deref().is_some_and(is_bst) {
        let start = root_id
            .as_deref()
            .and_then(|id| nodes.iter().position(|n| n.id == id))
            .or_else(|| roots.first().copied());
        if let Some(root) = start {
            check_bst(&nodes, &children, root, &mut report);
        }
    }

    let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let traversal_path = string_list(first_field(data, &["traversalPath", "traversal", "path"]).map(|(_, v)| v));
    for id in &traversal_path {
        if !known.contains(id.as_str()) {
            report.warn("traversalPath", format!("references unknown node '{id}'"));
        }
    }
    let current_node = id_field(data, &["currentNode", "current"]).filter(|id| {
        let ok = known.contains(id.as_str());
        if !ok {
            report.warn("currentNode", format!("references unknown node '{id}'"));
        }
        ok
    });

    report.finish(SanitizedData::Tree(TreeData {
        nodes,
        edges,
        traversal_path,
        current_node,
        traversal_type: str_field(data, &["traversalType", "traversal_type"]),
        operations: data
            .get("operations")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        tree_type,
        root_id,
    }))
}

fn is_bst(t: &str) -> bool {
    matches!(
        t.replace(['_', '-', ' '], "").as_str(),
        "bst" | "binarysearchtree"
    )
}

fn collect_nodes(data: &Value, links: &mut Vec<Link>, report: &mut Report) -> Option<Vec<TreeNode>> {
    if let Some(raw) = data.get("nodes").filter(|v| !v.is_null()) {
        let items = report.expect_array(raw, "nodes")?;
        let mut nodes: Vec<TreeNode> = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let field = format!("nodes[{i}]");
            if !item.is_object() {
                report.error(&field, "must be an object");
                continue;
            }
            let id = match id_field(item, &["id", "key"]) {
                Some(id) => id,
                None => {
                    report.error(&format!("{field}.id"), "is required");
                    format!("node{i}")
                }
            };
            if nodes.iter().any(|n| n.id == id) {
                report.error(&format!("{field}.id"), format!("duplicate node id '{id}'"));
                continue;
            }
            derive_flat_links(item, &id, &field, links);
            nodes.push(parse_node(item, id));
        }
        return Some(nodes);
    }

    let (key, root) = first_field(data, &["root", "tree"])?;
    if !root.is_object() {
        // A scalar `root` names the root node of a flat list that is missing.
        return None;
    }
    Some(flatten_nested(root, key, links))
}

fn parse_node(item: &Value, id: String) -> TreeNode {
    let value = first_field(item, &["value", "val", "data", "label"])
        .map(|(_, v)| v.clone())
        .unwrap_or_else(|| Value::String(id.clone()));
    TreeNode {
        value,
        x: item.get("x").and_then(as_number),
        y: item.get("y").and_then(as_number),
        state: str_field(item, &["state", "status"]).unwrap_or_else(|| "default".to_string()),
        parent: None,
        id,
    }
}

fn derive_flat_links(item: &Value, id: &str, field: &str, links: &mut Vec<Link>) {
    let mut push = |field: String, from: String, to: String, side: Option<ChildSide>| {
        links.push(Link {
            field,
            from,
            to,
            side,
            state: None,
            explicit: false,
        })
    };
    if let Some(parent) = id_field(item, &["parent", "parentId"]) {
        push(format!("{field}.parent"), parent, id.to_string(), None);
    }
    for (key, side) in [("left", ChildSide::Left), ("right", ChildSide::Right)] {
        if let Some(child) = item.get(key).and_then(as_id) {
            push(format!("{field}.{key}"), id.to_string(), child, Some(side));
        }
    }
    if let Some(Value::Array(kids)) = item.get("children") {
        for (j, kid) in kids.iter().enumerate() {
            if let Some(child) = as_id(kid).or_else(|| id_field(kid, &["id"])) {
                push(format!("{field}.children[{j}]"), id.to_string(), child, None);
            }
        }
    }
}

/// Flatten the nested `{value, left, right, children}` form in pre-order. Nodes
/// without an id get a generated one.
fn flatten_nested(root: &Value, key: &str, links: &mut Vec<Link>) -> Vec<TreeNode> {
    let mut nodes: Vec<TreeNode> = Vec::new();
    let mut stack: Vec<(&Value, String, Option<(String, Option<ChildSide>)>)> =
        vec![(root, key.to_string(), None)];

    while let Some((v, field, parent)) = stack.pop() {
        let mut id = match v {
            Value::Object(_) => id_field(v, &["id", "key"]),
            _ => None,
        }
        .unwrap_or_else(|| format!("n{}", nodes.len()));
        if nodes.iter().any(|n| n.id == id) {
            id = format!("{id}#{}", nodes.len());
        }

        let node = match v {
            Value::Object(_) => parse_node(v, id.clone()),
            scalar => TreeNode {
                id: id.clone(),
                value: Value::String(display(scalar)),
                x: None,
                y: None,
                state: "default".to_string(),
                parent: None,
            },
        };
        if let Some((from, side)) = parent {
            links.push(Link {
                field: field.clone(),
                from,
                to: id.clone(),
                side,
                state: None,
                explicit: false,
            });
        }
        nodes.push(node);

        let mut kids: Vec<(&Value, String, Option<ChildSide>)> = Vec::new();
        for (k, side) in [("left", ChildSide::Left), ("right", ChildSide::Right)] {
            if let Some(child) = v.get(k).filter(|c| !c.is_null()) {
                kids.push((child, format!("{field}.{k}"), Some(side)));
            }
        }
        if let Some(Value::Array(items)) = v.get("children") {
            for (j, child) in items.iter().enumerate().filter(|(_, c)| !c.is_null()) {
                kids.push((child, format!("{field}.children[{j}]"), None));
            }
        }
        for (child, f, side) in kids.into_iter().rev() {
            stack.push((child, f, Some((id.clone(), side))));
        }
    }
    nodes
}

fn collect_edges(data: &Value, report: &mut Report) -> Vec<Link> {
    let Some(raw) = data.get("edges").filter(|v| !v.is_null()) else {
        return Vec::new();
    };
    let Some(items) = report.expect_array(raw, "edges") else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let field = format!("edges[{i}]");
        let from = id_field(item, &["from", "source", "parent"]);
        let to = id_field(item, &["to", "target", "child"]);
        if from.is_none() {
            report.error(&format!("{field}.from"), "is required");
        }
        if to.is_none() {
            report.error(&format!("{field}.to"), "is required");
        }
        let (Some(from), Some(to)) = (from, to) else {
            continue;
        };
        let side = match str_field(item, &["side", "position", "direction"]).as_deref() {
            Some(s) if s.eq_ignore_ascii_case("left") => Some(ChildSide::Left),
            Some(s) if s.eq_ignore_ascii_case("right") => Some(ChildSide::Right),
            _ => None,
        };
        out.push(Link {
            field,
            from,
            to,
            side,
            state: str_field(item, &["state", "status"]),
            explicit: true,
        });
    }
    out
}

fn resolve_links(links: Vec<Link>, nodes: &[TreeNode], report: &mut Report) -> Vec<TreeEdge> {
    let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut edges: Vec<TreeEdge> = Vec::with_capacity(links.len());
    let mut seen: HashMap<(String, String), (usize, bool)> = HashMap::new();

    for link in links {
        let mut dangling = false;
        for end in [&link.from, &link.to] {
            if !known.contains(end.as_str()) {
                report.error(&link.field, format!("references unknown node '{end}'"));
                dangling = true;
            }
        }
        if dangling {
            continue;
        }
        if link.from == link.to {
            report.edge_case(format!("Self-loop on node '{}' ignored", link.from));
            continue;
        }
        let key = (link.from.clone(), link.to.clone());
        if let Some(&(at, was_explicit)) = seen.get(&key) {
            if was_explicit && link.explicit {
                report.warn(&link.field, format!("duplicate edge {} -> {}", link.from, link.to));
            }
            if edges[at].side.is_none() {
                edges[at].side = link.side;
            }
            continue;
        }
        seen.insert(key, (edges.len(), link.explicit));
        edges.push(TreeEdge {
            from: link.from,
            to: link.to,
            state: link.state,
            side: link.side,
        });
    }
    edges
}

fn resolve_root(data: &Value, nodes: &[TreeNode], roots: &[usize], report: &mut Report) -> Option<String> {
    let declared = id_field(data, &["rootId", "root_id"])
        .or_else(|| data.get("root").filter(|r| !r.is_object()).and_then(as_id));
    match declared {
        Some(id) if nodes.iter().any(|n| n.id == id) => Some(id),
        Some(id) => {
            report.error("rootId", format!("references unknown node '{id}'"));
            None
        }
        None if roots.len() == 1 => Some(nodes[roots[0]].id.clone()),
        None => None,
    }
}

fn analyze_shape(
    nodes: &[TreeNode],
    edges: &[TreeEdge],
    roots: &[usize],
    children: &[Vec<(usize, Option<ChildSide>)>],
    limits: &ValidationLimits,
    report: &mut Report,
) {
    match nodes.len() {
        0 => {
            report.edge_case("Empty tree");
            return;
        }
        1 => report.edge_case("Single-node tree"),
        _ => {
            let linked: HashSet<&str> = edges
                .iter()
                .flat_map(|e| [e.from.as_str(), e.to.as_str()])
                .collect();
            let loose: Vec<&str> = nodes
                .iter()
                .map(|n| n.id.as_str())
                .filter(|id| !linked.contains(id))
                .collect();
            if !loose.is_empty() {
                report.edge_case(format!("Disconnected nodes: {}", loose.join(", ")));
            }
        }
    }

    match roots.len() {
        0 => report.edge_case("No root node: every node has a parent, so the tree contains a cycle"),
        1 => {}
        n => {
            let names: Vec<&str> = roots.iter().map(|&i| nodes[i].id.as_str()).collect();
            report.edge_case(format!("Multiple roots ({n}): {}", names.join(", ")));
        }
    }

    // Level-order walk from every root; nodes caught in cycles are never reached.
    let mut level_sizes: Vec<usize> = Vec::new();
    let mut visited = vec![false; nodes.len()];
    let mut queue: VecDeque<(usize, usize)> = roots.iter().map(|&r| (r, 0)).collect();
    for &r in roots {
        visited[r] = true;
    }
    while let Some((i, depth)) = queue.pop_front() {
        if level_sizes.len() <= depth {
            level_sizes.push(0);
        }
        level_sizes[depth] += 1;
        for &(c, _) in &children[i] {
            if !visited[c] {
                visited[c] = true;
                queue.push_back((c, depth + 1));
            }
        }
    }
    let depth = level_sizes.len();
    let breadth = level_sizes.iter().copied().max().unwrap_or(0);
    if depth > limits.max_tree_depth {
        report.edge_case(format!(
            "Deep tree (depth {depth}): consider collapsing levels for readability"
        ));
    }
    if breadth > limits.max_tree_breadth {
        report.edge_case(format!(
            "Wide tree ({breadth} nodes on one level) may overflow the canvas"
        ));
    }
}

fn check_bst(
    nodes: &[TreeNode],
    children: &[Vec<(usize, Option<ChildSide>)>],
    root: usize,
    report: &mut Report,
) {
    // Resolve each node's left/right slot.
    let mut slots: Vec<[Option<usize>; 2]> = vec![[None, None]; nodes.len()];
    for (p, kids) in children.iter().enumerate() {
        if kids.len() > 2 {
            report.error(
                "edges",
                format!(
                    "BST node '{}' has {} children (at most 2 allowed)",
                    nodes[p].id,
                    kids.len()
                ),
            );
        }
        let mut unsided = Vec::new();
        for &(c, side) in kids.iter().take(2) {
            match side {
                Some(ChildSide::Left) if slots[p][0].is_none() => slots[p][0] = Some(c),
                Some(ChildSide::Right) if slots[p][1].is_none() => slots[p][1] = Some(c),
                _ => unsided.push(c),
            }
        }
        if unsided.len() == 1 && kids.len() == 1 {
            let c = unsided[0];
            let goes_right = match (as_number(&nodes[c].value), as_number(&nodes[p].value)) {
                (Some(cv), Some(pv)) => cv > pv,
                _ => false,
            };
            slots[p][usize::from(goes_right)] = Some(c);
        } else {
            for c in unsided {
                if let Some(free) = slots[p].iter_mut().find(|s| s.is_none()) {
                    *free = Some(c);
                }
            }
        }
    }

    // Ordering against ancestor bounds, iteratively.
    let mut visited = vec![false; nodes.len()];
    let mut stack: Vec<(usize, Option<f64>, Option<f64>)> = vec![(root, None, None)];
    while let Some((i, lo, hi)) = stack.pop() {
        if std::mem::replace(&mut visited[i], true) {
            continue;
        }
        let value = as_number(&nodes[i].value);
        if let Some(v) = value {
            if lo.is_some_and(|l| v < l) || hi.is_some_and(|h| v > h) {
                report.pitfall(format!(
                    "BST ordering violated at node '{}': value {v} must lie within [{}, {}]",
                    nodes[i].id,
                    lo.map_or("-inf".to_string(), |l| l.to_string()),
                    hi.map_or("+inf".to_string(), |h| h.to_string()),
                ));
            }
        }
        let [left, right] = slots[i];
        if let Some(l) = left {
            stack.push((l, lo, value.or(hi)));
        }
        if let Some(r) = right {
            stack.push((r, value.or(lo), hi));
        }
    }

    // Heights bottom-up over a post-order of the reachable part.
    let mut order = Vec::new();
    let mut seen = vec![false; nodes.len()];
    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        if std::mem::replace(&mut seen[i], true) {
            continue;
        }
        order.push(i);
        stack.extend(slots[i].iter().flatten().copied());
    }
    let mut height = vec![0usize; nodes.len()];
    for &i in order.iter().rev() {
        let h = |s: Option<usize>| s.map_or(0, |c| height[c]);
        let (lh, rh) = (h(slots[i][0]), h(slots[i][1]));
        height[i] = 1 + lh.max(rh);
        if lh.abs_diff(rh) > 1 {
            report.pitfall(format!(
                "Unbalanced BST: subtrees of node '{}' differ in height by {}; operations degrade toward O(n)",
                nodes[i].id,
                lh.abs_diff(rh)
            ));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/validate/tree.rs"]
mod tests;
