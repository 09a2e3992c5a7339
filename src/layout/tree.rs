use std::collections::HashMap;

use kurbo::Point;

use crate::layout::{LayoutResult, PositionedNode};
use crate::model::data::TreeData;

/// Spacing and extent rules for tree layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeLayoutConfig {
    /// Vertical distance between depths.
    pub level_height: f64,
    /// Minimum horizontal space a subtree occupies.
    pub min_subtree_width: f64,
    pub min_content_width: f64,
    pub top_margin: f64,
    /// Margin added past the rightmost explicit coordinate.
    pub explicit_margin: f64,
    /// Margin added past the rightmost computed position.
    pub content_margin: f64,
    /// Gap between the tree and the column of unreachable nodes.
    pub side_column_gap: f64,
}

impl Default for TreeLayoutConfig {
    fn default() -> Self {
        Self {
            level_height: 80.0,
            min_subtree_width: 60.0,
            min_content_width: 800.0,
            top_margin: 40.0,
            explicit_margin: 100.0,
            content_margin: 150.0,
            side_column_gap: 100.0,
        }
    }
}

/// Per-node metrics, indexed like `TreeData::nodes`.
#[derive(Clone, Copy, Debug, Default)]
struct Metrics {
    subtree_width: f64,
    depth: usize,
}

/// Lay out a sanitized tree. Deterministic; every node is positioned.
#[tracing::instrument(skip_all, fields(nodes = tree.nodes.len()))]
pub fn layout_tree(tree: &TreeData, config: &TreeLayoutConfig) -> LayoutResult {
    let n = tree.nodes.len();
    if n == 0 {
        return LayoutResult {
            positions: Vec::new(),
            content_width: config.min_content_width,
            content_height: config.top_margin * 2.0,
        };
    }

    let explicit: Option<Vec<Point>> = tree
        .nodes
        .iter()
        .map(|node| Some(Point::new(node.x?, node.y?)))
        .collect();
    if let Some(points) = explicit {
        let max_x = points.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        let max_y = points.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        return LayoutResult {
            positions: tree
                .nodes
                .iter()
                .zip(points)
                .map(|(node, position)| PositionedNode {
                    id: node.id.clone(),
                    position,
                })
                .collect(),
            content_width: (max_x + config.explicit_margin).max(config.min_content_width),
            content_height: max_y + config.explicit_margin,
        };
    }

    let index: HashMap<&str, usize> = tree
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();
    let mut all_children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut has_parent = vec![false; n];
    for e in &tree.edges {
        if let (Some(&p), Some(&c)) = (index.get(e.from.as_str()), index.get(e.to.as_str())) {
            all_children[p].push(c);
            has_parent[c] = true;
        }
    }

    let root = tree
        .root_id
        .as_deref()
        .and_then(|id| index.get(id).copied())
        .or_else(|| {
            let mut roots = (0..n).filter(|&i| !has_parent[i]);
            match (roots.next(), roots.next()) {
                (Some(r), None) => Some(r),
                _ => None,
            }
        })
        .unwrap_or(0);

    // Claim each node for the first parent that reaches it, in pre-order, so the
    // walk is a proper tree even when the input has cycles or shared children.
    let mut metrics = vec![Metrics::default(); n];
    let mut claimed = vec![false; n];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut order = Vec::with_capacity(n);
    let mut stack = vec![root];
    claimed[root] = true;
    while let Some(i) = stack.pop() {
        order.push(i);
        for &c in &all_children[i] {
            if !claimed[c] {
                claimed[c] = true;
                metrics[c].depth = metrics[i].depth + 1;
                children[i].push(c);
            }
        }
        stack.extend(children[i].iter().rev());
    }

    for &i in order.iter().rev() {
        let sum: f64 = children[i].iter().map(|&c| metrics[c].subtree_width).sum();
        metrics[i].subtree_width = sum.max(config.min_subtree_width);
    }

    let mut positions = vec![Point::ZERO; n];
    let mut lefts = vec![0.0f64; n];
    for &i in &order {
        let m = metrics[i];
        let left = lefts[i];
        positions[i] = Point::new(
            left + m.subtree_width / 2.0,
            config.top_margin + m.depth as f64 * config.level_height,
        );
        let span: f64 = children[i].iter().map(|&c| metrics[c].subtree_width).sum();
        let mut cursor = left + (m.subtree_width - span) / 2.0;
        for &c in &children[i] {
            lefts[c] = cursor;
            cursor += metrics[c].subtree_width;
        }
    }

    let tree_width = metrics[root].subtree_width;
    let max_depth = order.iter().map(|&i| metrics[i].depth).max().unwrap_or(0);
    let mut max_y = config.top_margin + max_depth as f64 * config.level_height;

    let stray: Vec<usize> = (0..n).filter(|&i| !claimed[i]).collect();
    let mut right_edge = tree_width;
    if !stray.is_empty() {
        tracing::debug!(count = stray.len(), "placing unreachable tree nodes in side column");
        let side_x = tree_width + config.side_column_gap;
        for (k, &i) in stray.iter().enumerate() {
            let y = config.top_margin + k as f64 * config.level_height;
            positions[i] = Point::new(side_x, y);
            max_y = max_y.max(y);
        }
        right_edge = right_edge.max(side_x);
    }

    LayoutResult {
        positions: tree
            .nodes
            .iter()
            .zip(positions)
            .map(|(node, position)| PositionedNode {
                id: node.id.clone(),
                position,
            })
            .collect(),
        content_width: (right_edge + config.content_margin).max(config.min_content_width),
        content_height: max_y + config.level_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/tree.rs"]
mod tests;
