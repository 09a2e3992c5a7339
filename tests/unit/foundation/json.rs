use super::*;
use serde_json::json;

#[test]
fn first_field_skips_null_and_respects_order() {
    let v = json!({ "table": null, "dp": [1], "matrix": [[1]] });
    let (key, _) = first_field(&v, &["table", "matrix", "dp"]).unwrap();
    assert_eq!(key, "matrix");
    assert!(first_field(&json!([1, 2]), &["a"]).is_none());
}

#[test]
fn indices_accept_integral_floats_and_strings() {
    assert_eq!(as_index(&json!(3)), Some(3));
    assert_eq!(as_index(&json!(3.0)), Some(3));
    assert_eq!(as_index(&json!(-2)), Some(-2));
    assert_eq!(as_index(&json!(" 4 ")), Some(4));
    assert_eq!(as_index(&json!(2.5)), None);
    assert_eq!(as_index(&json!(true)), None);
}

#[test]
fn ids_fold_numbers_and_trim_strings() {
    assert_eq!(as_id(&json!(5)), Some("5".to_string()));
    assert_eq!(as_id(&json!(" a ")), Some("a".to_string()));
    assert_eq!(as_id(&json!("")), None);
    assert_eq!(as_id(&json!(null)), None);
}

#[test]
fn string_list_accepts_scalar_or_array() {
    assert_eq!(string_list(Some(&json!("one"))), vec!["one"]);
    assert_eq!(string_list(Some(&json!(["a", 1, null]))), vec!["a", "1"]);
    assert!(string_list(None).is_empty());
}

#[test]
fn table_detection() {
    assert!(is_table(&json!([[1, 2], [3, 4]])));
    assert!(!is_table(&json!([1, 2])));
    assert!(!is_table(&json!([])));
}

#[test]
fn display_strips_string_quotes() {
    assert_eq!(display(&json!("x")), "x");
    assert_eq!(display(&json!(1.5)), "1.5");
    assert_eq!(display(&json!(null)), "");
}
