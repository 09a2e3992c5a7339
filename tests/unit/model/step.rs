use super::*;
use serde_json::json;

#[test]
fn full_step_parses() {
    let step: Step = serde_json::from_value(json!({
        "stepNumber": 3,
        "title": "Compare",
        "description": "Compare adjacent values",
        "visualization": { "type": "array", "data": { "array": [3, 1, 2] } },
        "variableStates": { "i": 0 },
        "edgeCases": ["empty input"],
        "pitfalls": "off by one",
        "validationWarnings": []
    }))
    .unwrap();
    assert_eq!(step.step_number, 3);
    assert_eq!(step.title, "Compare");
    assert_eq!(step.visualization.hint.as_deref(), Some("array"));
    assert_eq!(step.visualization.data, json!({ "array": [3, 1, 2] }));
    assert_eq!(step.variable_states, json!({ "i": 0 }));
    assert_eq!(step.edge_cases, vec!["empty input"]);
    assert_eq!(step.pitfalls, vec!["off by one"]);
}

#[test]
fn malformed_step_degrades_to_defaults() {
    let step: Step = serde_json::from_value(json!("not a step")).unwrap();
    assert_eq!(step, Step::default());

    let step: Step = serde_json::from_value(json!({ "stepNumber": "7", "title": 12 })).unwrap();
    assert_eq!(step.step_number, 7);
    assert_eq!(step.title, "");
}

#[test]
fn inline_visualization_data_is_collected() {
    let step = Step::from(json!({
        "visualization": { "type": "graph", "vertices": [], "edges": [] }
    }));
    assert_eq!(step.visualization.hint.as_deref(), Some("graph"));
    assert_eq!(
        step.visualization.data,
        json!({ "vertices": [], "edges": [] })
    );
}

#[test]
fn sequences_accept_bare_arrays_and_wrapped_objects() {
    let bare = steps_from_value(json!([{ "stepNumber": 1 }, { "stepNumber": 2 }]));
    assert_eq!(bare.len(), 2);
    let wrapped = steps_from_value(json!({ "steps": [{ "stepNumber": 1 }] }));
    assert_eq!(wrapped.len(), 1);
    assert!(steps_from_value(json!(5)).is_empty());
}

#[test]
fn serializes_camel_case() {
    let step = Step {
        step_number: 1,
        ..Step::default()
    };
    let v = serde_json::to_value(&step).unwrap();
    assert_eq!(v["stepNumber"], json!(1));
    assert!(v.get("variableStates").is_none());
    assert!(v.get("edgeCases").is_some());
}
