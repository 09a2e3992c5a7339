use super::*;
use crate::model::data::{TreeEdge, TreeNode};
use serde_json::json;

fn node(id: &str) -> TreeNode {
    TreeNode {
        id: id.to_string(),
        value: json!(id),
        x: None,
        y: None,
        state: "default".to_string(),
        parent: None,
    }
}

fn edge(from: &str, to: &str) -> TreeEdge {
    TreeEdge {
        from: from.to_string(),
        to: to.to_string(),
        state: None,
        side: None,
    }
}

fn tree(ids: &[&str], edges: &[(&str, &str)]) -> TreeData {
    TreeData {
        nodes: ids.iter().map(|id| node(id)).collect(),
        edges: edges.iter().map(|(a, b)| edge(a, b)).collect(),
        ..TreeData::default()
    }
}

#[test]
fn parent_is_centred_over_children() {
    let t = tree(&["a", "b", "c"], &[("a", "b"), ("a", "c")]);
    let out = layout_tree(&t, &TreeLayoutConfig::default());
    let a = out.position_of("a").unwrap();
    let b = out.position_of("b").unwrap();
    let c = out.position_of("c").unwrap();
    assert_eq!(a.x, (b.x + c.x) / 2.0);
    assert_eq!(b.y, a.y + 80.0);
    assert_eq!(c.y, b.y);
    assert_eq!(c.x - b.x, 60.0);
}

#[test]
fn subtree_width_is_sum_of_children_with_floor() {
    // a -> b -> (d, e); a -> c
    let t = tree(
        &["a", "b", "c", "d", "e"],
        &[("a", "b"), ("a", "c"), ("b", "d"), ("b", "e")],
    );
    let out = layout_tree(&t, &TreeLayoutConfig::default());
    let b = out.position_of("b").unwrap();
    let c = out.position_of("c").unwrap();
    let d = out.position_of("d").unwrap();
    // b spans 120, c spans 60, so b is centred at 60 and c at 150.
    assert_eq!(b.x, 60.0);
    assert_eq!(c.x, 150.0);
    assert_eq!(d.x, 30.0);
    assert_eq!(out.content_width, 800.0);
}

#[test]
fn explicit_coordinates_are_trusted() {
    let mut t = tree(&["a", "b"], &[("a", "b")]);
    t.nodes[0].x = Some(900.0);
    t.nodes[0].y = Some(10.0);
    t.nodes[1].x = Some(50.0);
    t.nodes[1].y = Some(90.0);
    let out = layout_tree(&t, &TreeLayoutConfig::default());
    assert_eq!(out.position_of("a"), Some(Point::new(900.0, 10.0)));
    assert_eq!(out.content_width, 1000.0);

    t.nodes[0].x = Some(100.0);
    let out = layout_tree(&t, &TreeLayoutConfig::default());
    assert_eq!(out.content_width, 800.0);
}

#[test]
fn unreachable_nodes_are_placed_in_side_column() {
    let t = tree(&["a", "b", "x", "y"], &[("a", "b"), ("x", "y")]);
    let mut t = t;
    t.root_id = Some("a".to_string());
    let out = layout_tree(&t, &TreeLayoutConfig::default());
    assert_eq!(out.positions.len(), 4);
    let x = out.position_of("x").unwrap();
    let y = out.position_of("y").unwrap();
    assert_eq!(x.x, 60.0 + 100.0);
    assert_eq!(x.x, y.x);
    assert!(y.y > x.y);
}

#[test]
fn wide_tree_grows_content_width() {
    let ids: Vec<String> = (0..20).map(|i| format!("c{i}")).collect();
    let mut all: Vec<&str> = vec!["root"];
    all.extend(ids.iter().map(String::as_str));
    let edges: Vec<(&str, &str)> = ids.iter().map(|c| ("root", c.as_str())).collect();
    let out = layout_tree(&tree(&all, &edges), &TreeLayoutConfig::default());
    assert_eq!(out.content_width, 20.0 * 60.0 + 150.0);
}

#[test]
fn cycles_do_not_drop_or_loop() {
    let mut t = tree(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
    t.root_id = Some("a".to_string());
    let out = layout_tree(&t, &TreeLayoutConfig::default());
    assert_eq!(out.positions.len(), 3);
    let c = out.position_of("c").unwrap();
    assert_eq!(c.y, 40.0 + 2.0 * 80.0);
}

#[test]
fn no_unique_root_falls_back_to_first_node() {
    let t = tree(&["p", "q"], &[]);
    let out = layout_tree(&t, &TreeLayoutConfig::default());
    assert_eq!(out.position_of("p"), Some(Point::new(30.0, 40.0)));
    assert_eq!(out.position_of("q").unwrap().x, 160.0);
}

#[test]
fn empty_tree_has_floor_width() {
    let out = layout_tree(&TreeData::default(), &TreeLayoutConfig::default());
    assert!(out.positions.is_empty());
    assert_eq!(out.content_width, 800.0);
}
