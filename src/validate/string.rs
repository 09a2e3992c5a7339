use serde_json::Value;

use crate::classify::flags::{HASHMAP_KEYS, STRING_KEYS};
use crate::fallback::resolver::fallback_instance;
use crate::foundation::json::{first_field, kind_name};
use crate::model::canonical::CanonicalType;
use crate::model::data::{SanitizedData, StringData};
use crate::validate::array::{validate_pointers, validate_window};
use crate::validate::report::{Report, ValidationResult};

pub(crate) fn validate_string(data: &Value) -> ValidationResult {
    let mut report = Report::default();

    let text = match data {
        Value::String(s) => Some(s.as_str()),
        _ => match first_field(data, &STRING_KEYS) {
            Some((key, v)) => report.expect_string(v, key),
            None => None,
        },
    };
    let Some(text) = text else {
        report.missing_root("string");
        return report.finish(fallback_instance(CanonicalType::String));
    };

    let len = text.chars().count();
    match len {
        0 => report.edge_case("Empty string"),
        1 => report.edge_case("Single-character string"),
        _ => {}
    }

    // Position 0 stays addressable on an empty string: sliding-window code starts
    // both pointers there before reading anything.
    let pointers = match data.get("pointers") {
        Some(p) if !p.is_null() => validate_pointers(p, len, true, &mut report),
        _ => Vec::new(),
    };

    let mut highlights = Vec::new();
    if let Some((key, raw)) = first_field(data, &["highlights", "highlight", "highlighted"]) {
        let items: Vec<&Value> = match raw {
            Value::Array(items) => items.iter().collect(),
            Value::Number(_) => vec![raw],
            other => {
                report.expect_array(other, key);
                Vec::new()
            }
        };
        for (j, item) in items.into_iter().enumerate() {
            if let Some(i) = report.expect_index(item, len, &format!("{key}[{j}]")) {
                if !highlights.contains(&i) {
                    highlights.push(i);
                }
            }
        }
    }

    let window = data
        .get("window")
        .filter(|w| !w.is_null())
        .and_then(|w| validate_window(w, len, "string", "window", &mut report));

    let hash_map = match first_field(data, &HASHMAP_KEYS) {
        Some((_, Value::Object(m))) => Some(m.clone()),
        Some((key, other)) => {
            report.warn(key, format!("ignored: expected an object, got {}", kind_name(other)));
            None
        }
        None => None,
    };

    report.finish(SanitizedData::String(StringData {
        text: text.to_string(),
        pointers,
        highlights,
        window,
        hash_map,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/validate/string.rs"]
mod tests;
