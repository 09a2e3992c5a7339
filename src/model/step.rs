use serde_json::Value;

use crate::foundation::json::{as_index, first_field, str_field, string_list};

/// One algorithm execution frame as produced by the upstream step service.
///
/// Deserialization never fails on shape: any JSON value converts into a `Step` with
/// missing or mistyped fields falling back to defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Value", rename_all = "camelCase")]
pub struct Step {
    /// Producer-assigned step number (1-based by convention).
    pub step_number: u64,
    /// Short title.
    pub title: String,
    /// Longer prose description.
    pub description: String,
    /// The payload this pipeline classifies, validates and lays out.
    pub visualization: Visualization,
    /// Variable snapshot, passed through untouched.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub variable_states: Value,
    /// Code highlight descriptor, passed through untouched.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub code_highlight: Value,
    /// Producer-reported edge cases.
    pub edge_cases: Vec<String>,
    /// Producer-reported pitfalls.
    pub pitfalls: Vec<String>,
    /// Producer-reported validation warnings.
    pub validation_warnings: Vec<String>,
}

/// Visualization payload: an optional type hint plus arbitrary data.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Visualization {
    /// Producer's type hint. Never trusted without verification.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Loosely-typed structure data.
    #[serde(default)]
    pub data: Value,
}

impl Visualization {
    /// Build a payload from a hint and data.
    pub fn new(hint: Option<&str>, data: Value) -> Self {
        Self {
            hint: hint.map(str::to_string),
            data,
        }
    }

    fn from_value(v: &Value) -> Self {
        match v {
            Value::Object(map) => {
                let hint = str_field(v, &["type", "kind"]);
                // Producers occasionally inline the data next to `type`.
                let data = match map.get("data") {
                    Some(d) if !d.is_null() => d.clone(),
                    _ => {
                        let mut rest = map.clone();
                        rest.remove("type");
                        rest.remove("kind");
                        Value::Object(rest)
                    }
                };
                Self { hint, data }
            }
            Value::Null => Self::default(),
            other => Self {
                hint: None,
                data: other.clone(),
            },
        }
    }
}

impl From<Value> for Step {
    fn from(v: Value) -> Self {
        let step_number = first_field(&v, &["stepNumber", "step_number", "step"])
            .and_then(|(_, n)| as_index(n))
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);
        let visualization = first_field(&v, &["visualization", "viz"])
            .map(|(_, viz)| Visualization::from_value(viz))
            .unwrap_or_default();
        let field = |keys: &[&'static str]| first_field(&v, keys).map(|(_, x)| x.clone());

        Self {
            step_number,
            title: str_field(&v, &["title"]).unwrap_or_default(),
            description: str_field(&v, &["description", "explanation"]).unwrap_or_default(),
            visualization,
            variable_states: field(&["variableStates", "variable_states", "variables"])
                .unwrap_or(Value::Null),
            code_highlight: field(&["codeHighlight", "code_highlight"]).unwrap_or(Value::Null),
            edge_cases: string_list(first_field(&v, &["edgeCases", "edge_cases"]).map(|f| f.1)),
            pitfalls: string_list(first_field(&v, &["pitfalls"]).map(|f| f.1)),
            validation_warnings: string_list(
                first_field(&v, &["validationWarnings", "validation_warnings"]).map(|f| f.1),
            ),
        }
    }
}

/// Parse a step sequence from either a JSON array of steps or `{ "steps": [...] }`.
pub fn steps_from_value(v: Value) -> Vec<Step> {
    match v {
        Value::Array(items) => items.into_iter().map(Step::from).collect(),
        Value::Object(mut map) => match map.remove("steps") {
            Some(Value::Array(items)) => items.into_iter().map(Step::from).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/step.rs"]
mod tests;
