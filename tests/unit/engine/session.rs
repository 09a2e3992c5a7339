use super::*;
use crate::fallback::category::ErrorCategory;
use crate::fallback::fixtures::expected_format;
use crate::layout::SimulationState;
use crate::model::canonical::CanonicalType;
use crate::model::data::SanitizedData;
use serde_json::json;

fn engine(steps: Value) -> VisualizationEngine {
    VisualizationEngine::new(steps_from_value(steps), PipelineConfig::default()).unwrap()
}

fn mixed() -> VisualizationEngine {
    engine(json!([
        { "stepNumber": 1, "visualization": { "type": "array", "data": expected_format(CanonicalType::Array) } },
        { "stepNumber": 2, "visualization": { "type": "graph", "data": expected_format(CanonicalType::Graph) } },
        { "stepNumber": 3, "visualization": { "type": "tree", "data": { "notNodes": "x" } } },
        { "stepNumber": 4, "visualization": { "type": "tree", "data": expected_format(CanonicalType::Tree) } },
    ]))
}

#[test]
fn bundle_is_computed_once() {
    let mut e = mixed();
    let first = e.bundle(0).unwrap().clone();
    let second = e.bundle(0).unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(e.cache().misses(), 1);
    assert_eq!(e.cache().hits(), 1);
    assert_eq!(e.cache().computed(), 1);
}

#[test]
fn out_of_range_is_an_error() {
    let mut e = mixed();
    let err = e.bundle(9).unwrap_err();
    assert!(matches!(err, StepvizError::StepOutOfRange { index: 9, len: 4 }));
    assert_eq!(err.category(), ErrorCategory::NoData);
    assert!(e.select_step(4).is_err());
}

#[test]
fn invalid_step_carries_fallback_notice() {
    let mut e = mixed();
    let b = e.bundle(2).unwrap();
    assert!(!b.is_valid());
    assert_eq!(b.canonical_type, CanonicalType::Tree);
    let SanitizedData::Tree(t) = &b.validation.sanitized_data else {
        panic!("expected tree data, got {:?}", b.validation.sanitized_data);
    };
    assert_eq!(t.nodes.len(), 1);
    assert_eq!(t.nodes[0].value, json!("Empty"));
    assert!(b.validation.errors.iter().any(|e| e.contains("nodes")));
    let notice = b.fallback.as_ref().unwrap();
    assert_eq!(notice.category, ErrorCategory::MissingFields);
    assert!(b.validation_warnings.iter().any(|w| w.contains("type hint 'tree'")));
    assert_eq!(b.layout.as_ref().map(|l| l.positions.len()), Some(1));
}

#[test]
fn tree_and_graph_steps_get_layouts() {
    let mut e = mixed();
    assert!(e.bundle(0).unwrap().layout.is_none());
    let tree = e.bundle(3).unwrap();
    assert_eq!(tree.layout.as_ref().unwrap().positions.len(), 5);
    assert!(tree.fallback.is_none());
    let graph = e.bundle(1).unwrap().clone();
    let layout = graph.layout.unwrap();
    assert_eq!(layout.positions.len(), 4);
    assert_eq!(layout.content_width, 800.0);
}

#[test]
fn rejected_hint_becomes_validation_warning() {
    let mut e = engine(json!([
        { "visualization": { "type": "graph", "data": { "array": [1, 2, 3] } } }
    ]));
    let b = e.bundle(0).unwrap();
    assert_eq!(b.canonical_type, CanonicalType::Array);
    assert!(b.validation_warnings.iter().any(|w| w.contains("rejected")));
}

#[test]
fn producer_findings_are_merged_without_duplicates() {
    let mut e = engine(json!([{
        "edgeCases": ["Empty array 'array'", "Producer note"],
        "visualization": { "type": "array", "data": { "array": [] } }
    }]));
    let b = e.bundle(0).unwrap();
    assert_eq!(
        b.edge_cases.iter().filter(|c| c.as_str() == "Empty array 'array'").count(),
        1
    );
    assert_eq!(b.edge_cases[1], "Producer note");
}

#[test]
fn animation_starts_at_cached_layout_and_ticks() {
    let mut e = mixed();
    let start = e.bundle(1).unwrap().layout.clone().unwrap();
    let id = e.animate_graph(1).unwrap();
    assert_eq!(e.animation_layout(), Some(start));
    let updates = e.tick_frame();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].task, id);
    assert_eq!(updates[0].iteration, 1);
    assert!(e.is_animating() || updates[0].state != SimulationState::Running);
}

#[test]
fn selecting_a_step_cancels_animation() {
    let mut e = mixed();
    e.animate_graph(1).unwrap();
    e.tick_frame();
    e.select_step(0).unwrap();
    assert_eq!(e.current_step(), Some(0));
    assert!(!e.is_animating());
    assert!(e.tick_frame().is_empty());
    assert!(e.animation_layout().is_none());
    assert!(!e.cancel_animation());
}

#[test]
fn animating_a_non_graph_step_is_a_layout_error() {
    let mut e = mixed();
    let err = e.animate_graph(0).unwrap_err();
    assert!(matches!(err, StepvizError::Layout(_)));
    assert!(err.to_string().contains("type 'array'"));
}

#[test]
fn settle_is_deterministic_and_matches_animation_end() {
    let mut a = mixed();
    let mut b = mixed();
    let settled = a.settle_graph(1).unwrap();
    assert_eq!(settled, b.settle_graph(1).unwrap());

    b.animate_graph(1).unwrap();
    while b.is_animating() {
        b.tick_frame();
    }
    assert_eq!(b.animation_layout(), Some(settled));
}

#[test]
fn seed_changes_graph_placement() {
    let steps = json!([{ "visualization": { "type": "graph", "data": expected_format(CanonicalType::Graph) } }]);
    let mut a = engine(steps.clone());
    let cfg = PipelineConfig {
        seed: 99,
        ..PipelineConfig::default()
    };
    let mut b = VisualizationEngine::new(steps_from_value(steps), cfg).unwrap();
    assert_ne!(a.bundle(0).unwrap().layout, b.bundle(0).unwrap().layout);
}

#[test]
fn from_json_str_accepts_both_shapes() {
    let arr = r#"[{ "stepNumber": 1, "visualization": { "data": { "array": [1] } } }]"#;
    let obj = r#"{ "steps": [{ "stepNumber": 1, "visualization": { "data": { "array": [1] } } }] }"#;
    assert_eq!(VisualizationEngine::from_json_str(arr, PipelineConfig::default()).unwrap().len(), 1);
    assert_eq!(VisualizationEngine::from_json_str(obj, PipelineConfig::default()).unwrap().len(), 1);
    let err = VisualizationEngine::from_json_str(r#"{ "nope": 1 }"#, PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, StepvizError::Validation(_)));
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = PipelineConfig::default();
    cfg.force_layout.max_iterations = 0;
    assert!(VisualizationEngine::new(Vec::new(), cfg).is_err());
}

#[test]
fn sequence_warnings_cover_loaded_steps() {
    let e = engine(json!([{ "stepNumber": 2 }, { "stepNumber": 1 }]));
    assert_eq!(e.sequence_warnings().len(), 1);
    assert!(engine(json!([])).sequence_warnings()[0].contains("empty"));
}

#[test]
fn render_view_borrows_bundle_fields() {
    let mut e = mixed();
    let b = e.bundle(3).unwrap();
    let v = serde_json::to_value(b.render()).unwrap();
    assert_eq!(v["canonicalType"], json!("tree"));
    assert!(v["layout"]["positions"].is_array());
    assert!(v["sanitizedData"].is_object());
}

#[test]
fn hybrid_graph_part_is_laid_out_and_settles() {
    let mut e = engine(json!([{ "visualization": { "data": {
        "arrays": [{ "name": "dist", "values": [0, 4, 2] }],
        "vertices": ["A", "B", "C"],
        "edges": [{ "from": "A", "to": "B" }, { "from": "B", "to": "C" }]
    } } }]));
    let b = e.bundle(0).unwrap().clone();
    assert_eq!(b.canonical_type, CanonicalType::Hybrid);
    assert_eq!(b.laid_out_graph().map(|g| g.vertices.len()), Some(3));
    let initial = b.layout.unwrap();
    let settled = e.settle_graph(0).unwrap();
    assert_eq!(settled.positions.len(), 3);
    assert_ne!(settled, initial);
}

#[test]
fn hybrid_tree_part_has_no_graph_to_settle() {
    let mut e = engine(json!([{ "visualization": { "data": {
        "arrays": [{ "name": "keys", "values": [1, 2] }],
        "nodes": [{ "id": "r", "value": 1 }]
    } } }]));
    let b = e.bundle(0).unwrap();
    assert!(b.layout.is_some());
    assert!(b.laid_out_graph().is_none());
    assert!(matches!(e.settle_graph(0), Err(StepvizError::Layout(_))));
}
