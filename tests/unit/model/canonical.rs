use super::*;

#[test]
fn wire_names_round_trip_through_hints() {
    for ty in CanonicalType::ALL {
        assert_eq!(CanonicalType::from_hint(ty.as_str()), Some(ty));
        assert_eq!(ty.to_string(), ty.as_str());
    }
}

#[test]
fn hint_spelling_is_lenient() {
    assert_eq!(
        CanonicalType::from_hint("Linked_List"),
        Some(CanonicalType::Linkedlist)
    );
    assert_eq!(
        CanonicalType::from_hint("hash-map"),
        Some(CanonicalType::Hashmap)
    );
    assert_eq!(CanonicalType::from_hint("MATRIX"), Some(CanonicalType::Dp));
    assert_eq!(CanonicalType::from_hint("sprite"), None);
}

#[test]
fn serde_uses_lowercase_names() {
    let s = serde_json::to_string(&CanonicalType::Linkedlist).unwrap();
    assert_eq!(s, "\"linkedlist\"");
    let back: CanonicalType = serde_json::from_str("\"dp\"").unwrap();
    assert_eq!(back, CanonicalType::Dp);
}

#[test]
fn from_str_reports_unknown_types() {
    let err = "sprite".parse::<CanonicalType>().unwrap_err();
    assert!(err.to_string().contains("sprite"));
}

#[test]
fn only_trees_and_graphs_are_spatial() {
    let spatial: Vec<_> = CanonicalType::ALL
        .into_iter()
        .filter(|t| t.is_spatial())
        .collect();
    assert_eq!(spatial, vec![CanonicalType::Tree, CanonicalType::Graph]);
}
