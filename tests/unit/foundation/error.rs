use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StepvizError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StepvizError::classification("x")
            .to_string()
            .contains("classification error:")
    );
    assert!(StepvizError::layout("x").to_string().contains("layout error:"));
    assert!(StepvizError::config("x").to_string().contains("config error:"));
    assert!(
        StepvizError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn out_of_range_names_index_and_len() {
    let err = StepvizError::StepOutOfRange { index: 7, len: 3 };
    assert_eq!(
        err.to_string(),
        "step 7 is out of range (sequence has 3 steps)"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StepvizError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn errors_map_into_category_taxonomy() {
    assert_eq!(
        StepvizError::validation("bad").category(),
        ErrorCategory::DataValidation
    );
    assert_eq!(
        StepvizError::layout("overflow").category(),
        ErrorCategory::Rendering
    );
    assert_eq!(
        StepvizError::StepOutOfRange { index: 1, len: 0 }.category(),
        ErrorCategory::NoData
    );
    assert_eq!(
        StepvizError::config("request timeout").category(),
        ErrorCategory::Network
    );
}

#[test]
fn serde_json_errors_convert() {
    let err: StepvizError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, StepvizError::Serde(_)));
}
