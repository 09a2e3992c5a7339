use super::*;
use crate::classify::classifier::TypeClassifier;
use crate::model::step::Visualization;
use crate::validate::validate;

#[test]
fn every_fixture_classifies_to_its_own_type() {
    let classifier = TypeClassifier::default();
    for ty in CanonicalType::ALL {
        let viz = Visualization::new(None, expected_format(ty));
        assert_eq!(classifier.classify_type(&viz), ty, "unhinted {ty}");

        let hinted = Visualization::new(Some(ty.as_str()), expected_format(ty));
        let c = classifier.classify(&hinted);
        assert!(c.hint_accepted, "hinted {ty}: {:?}", c.mismatch);
    }
}

#[test]
fn every_fixture_validates_cleanly() {
    for ty in CanonicalType::ALL {
        let r = validate(ty, &expected_format(ty));
        assert!(r.is_valid, "{ty}: {:?}", r.errors);
        assert!(r.errors.is_empty(), "{ty}");
        assert!(r.warnings.is_empty(), "{ty}: {:?}", r.warnings);
        assert_eq!(r.sanitized_data.canonical_type(), ty);
    }
}
