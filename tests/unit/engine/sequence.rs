use super::*;
use serde_json::json;

fn steps(numbers: &[u64]) -> Vec<Step> {
    numbers
        .iter()
        .map(|n| Step::from(json!({ "stepNumber": n })))
        .collect()
}

#[test]
fn empty_sequence_is_reported() {
    let w = sequence_warnings(&[]);
    assert_eq!(w.len(), 1);
    assert!(w[0].contains("empty"));
}

#[test]
fn consecutive_numbers_are_clean() {
    assert!(sequence_warnings(&steps(&[1, 2, 3])).is_empty());
}

#[test]
fn duplicates_and_reordering_are_reported() {
    let w = sequence_warnings(&steps(&[1, 2, 2, 1]));
    assert!(w.contains(&"Duplicate stepNumber 2 at steps 1 and 2".to_string()));
    assert!(w.contains(&"Duplicate stepNumber 1 at steps 0 and 3".to_string()));

    let w = sequence_warnings(&steps(&[1, 3, 2]));
    assert!(w.iter().any(|m| m.contains("Gap in step numbering: 1 is followed by 3")));
    assert!(w.iter().any(|m| m == "stepNumber 2 at step 2 comes after stepNumber 3 at step 1"));
}

#[test]
fn unnumbered_steps_are_skipped() {
    let w = sequence_warnings(&[Step::default(), Step::default()]);
    assert!(w.is_empty());
}
