use std::collections::BTreeMap;

use serde_json::Value;

use crate::fallback::resolver::fallback_instance;
use crate::foundation::json::{as_index, as_number, first_field, str_field};
use crate::model::canonical::CanonicalType;
use crate::model::data::{
    ArrayData, ArrayEntity, ArrayOperation, HighlightCategory, Highlights, Operation,
    OperationKind, Pointer, SanitizedData, Window,
};
use crate::validate::ValidationLimits;
use crate::validate::report::{Report, ValidationResult};

struct RawArray<'a> {
    field: String,
    name: String,
    values: Option<&'a Value>,
    highlights: Option<&'a Value>,
}

pub(crate) fn validate_array(data: &Value, limits: &ValidationLimits) -> ValidationResult {
    let mut report = Report::default();

    let Some(raw) = collect_raw_arrays(data, &mut report) else {
        report.missing_root("arrays");
        return report.finish(fallback_instance(CanonicalType::Array));
    };
    if raw.is_empty() {
        report.edge_case("No arrays to display");
    }

    let mut arrays = Vec::with_capacity(raw.len());
    for r in &raw {
        arrays.push(validate_entity(r, limits, &mut report));
    }

    let slots = arrays.iter().map(|a| a.values.len()).max().unwrap_or(0);
    let pointers = match data.get("pointers") {
        Some(p) if !p.is_null() => validate_pointers(p, slots, false, &mut report),
        _ => Vec::new(),
    };
    let operations = match data.get("operations") {
        Some(ops) if !ops.is_null() => validate_operations(ops, &arrays, &mut report),
        _ => Vec::new(),
    };

    for entity in &arrays {
        detect_patterns(entity, limits, &mut report);
    }

    report.finish(SanitizedData::Array(ArrayData {
        arrays,
        pointers,
        operations,
    }))
}

fn collect_raw_arrays<'a>(data: &'a Value, report: &mut Report) -> Option<Vec<RawArray<'a>>> {
    if data.is_array() {
        return Some(vec![RawArray {
            field: "array".to_string(),
            name: "array".to_string(),
            values: Some(data),
            highlights: None,
        }]);
    }

    if let Some(entries) = data.get("arrays").filter(|v| !v.is_null()) {
        let entries = report.expect_array(entries, "arrays")?;
        let raw = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let field = format!("arrays[{i}]");
                match entry {
                    Value::Array(_) => RawArray {
                        field,
                        name: format!("array{i}"),
                        values: Some(entry),
                        highlights: None,
                    },
                    _ => RawArray {
                        name: str_field(entry, &["name", "label", "id"])
                            .unwrap_or_else(|| format!("array{i}")),
                        values: first_field(entry, &["values", "array"]).map(|(_, v)| v),
                        highlights: entry.get("highlights").filter(|h| !h.is_null()),
                        field,
                    },
                }
            })
            .collect();
        return Some(raw);
    }

    match data.get("array") {
        Some(values @ Value::Array(_)) => Some(vec![RawArray {
            field: "array".to_string(),
            name: str_field(data, &["name"]).unwrap_or_else(|| "array".to_string()),
            values: Some(values),
            highlights: data.get("highlights").filter(|h| !h.is_null()),
        }]),
        Some(other) => {
            report.expect_array(other, "array");
            None
        }
        None => None,
    }
}

fn validate_entity(raw: &RawArray<'_>, limits: &ValidationLimits, report: &mut Report) -> ArrayEntity {
    let field = &raw.field;
    let values: Vec<Value> = match raw.values {
        None => {
            report.error(&format!("{field}.values"), "is required");
            Vec::new()
        }
        Some(v) => report
            .expect_array(v, &format!("{field}.values"))
            .cloned()
            .unwrap_or_default(),
    };
    let len = values.len();

    if len == 0 {
        report.edge_case(format!("Empty array '{}'", raw.name));
    }
    if len > limits.large_array {
        report.warn(
            &format!("{field}.values"),
            format!("{len} elements may render slowly"),
        );
        report.pitfall(format!(
            "Large array '{}' ({len} elements): quadratic algorithms will be slow to step through",
            raw.name
        ));
    }

    let mut highlights = Highlights::default();
    if let Some(h) = raw.highlights {
        if h.is_object() {
            highlights = validate_highlights(h, len, &raw.name, &format!("{field}.highlights"), report);
        } else {
            report.error(&format!("{field}.highlights"), "must be an object");
        }
    }

    ArrayEntity {
        name: raw.name.clone(),
        values,
        highlights,
    }
}

fn validate_highlights(h: &Value, len: usize, name: &str, field: &str, report: &mut Report) -> Highlights {
    let mut out = Highlights::default();

    if let Some(w) = h.get("window").filter(|w| !w.is_null()) {
        out.window = validate_window(w, len, name, &format!("{field}.window"), report);
    }

    for cat in HighlightCategory::ALL {
        let Some(raw) = h.get(cat.as_str()).filter(|v| !v.is_null()) else {
            continue;
        };
        let cat_field = format!("{field}.{}", cat.as_str());
        // A single bare index is accepted as a one-element list.
        let items: Vec<&Value> = match raw {
            Value::Array(items) => items.iter().collect(),
            Value::Number(_) => vec![raw],
            other => {
                report.expect_array(other, &cat_field);
                continue;
            }
        };
        let list = out.get_mut(cat);
        for (j, item) in items.into_iter().enumerate() {
            let Some(i) = report.expect_index(item, len, &format!("{cat_field}[{j}]")) else {
                continue;
            };
            if list.contains(&i) {
                report.warn(&cat_field, format!("duplicate index {i}"));
            } else {
                list.push(i);
            }
        }
    }
    out
}

pub(crate) fn validate_window(w: &Value, len: usize, name: &str, field: &str, report: &mut Report) -> Option<Window> {
    if !w.is_object() {
        report.error(field, "must be an object with start and end");
        return None;
    }
    let start = bound(w, "start", field, report);
    let end = bound(w, "end", field, report);
    let (start, end) = (start?, end?);

    let mut ok = true;
    if start > end {
        report.error(field, "start index cannot be greater than end index");
        report.pitfall(format!(
            "Off-by-one: window start ({start}) is after window end ({end}) in '{name}'"
        ));
        ok = false;
    }
    if start < 0 || end >= len as i64 {
        report.error(
            field,
            format!("window [{start}, {end}] out of bounds for length {len}"),
        );
        if end == len as i64 {
            report.pitfall(format!(
                "Off-by-one: window end ({end}) equals the length of '{name}'; the last valid index is {}",
                len.saturating_sub(1)
            ));
        }
        ok = false;
    }
    ok.then_some(Window {
        start: start as usize,
        end: end as usize,
    })
}

fn bound(w: &Value, key: &str, field: &str, report: &mut Report) -> Option<i64> {
    let v = report.require(w, key, &format!("{field}.{key}"))?;
    let i = as_index(v);
    if i.is_none() {
        report.error(&format!("{field}.{key}"), "must be an integer index");
    }
    i
}

/// Validate pointers against a collection of `len` elements. Accepts a list of pointer
/// objects or a `{name: position}` map. With `origin_on_empty`, position 0 stays valid
/// when the collection is empty.
pub(crate) fn validate_pointers(
    p: &Value,
    len: usize,
    origin_on_empty: bool,
    report: &mut Report,
) -> Vec<Pointer> {
    let slots = if origin_on_empty { len.max(1) } else { len };
    let mut raw: Vec<(String, String, Option<&Value>, Option<String>)> = Vec::new();
    match p {
        Value::Array(items) => {
            for (j, item) in items.iter().enumerate() {
                let field = format!("pointers[{j}]");
                if !item.is_object() {
                    report.error(&field, "must be an object");
                    continue;
                }
                let name = str_field(item, &["name", "label", "id"]).unwrap_or_else(|| format!("pointer{j}"));
                let pos = first_field(item, &["position", "index", "pos"]).map(|(_, v)| v);
                let color = str_field(item, &["color"]);
                raw.push((field, name, pos, color));
            }
        }
        Value::Object(map) => {
            for (name, pos) in map {
                raw.push((format!("pointers.{name}"), name.clone(), Some(pos), None));
            }
        }
        other => {
            report.expect_array(other, "pointers");
        }
    }

    let mut pointers = Vec::with_capacity(raw.len());
    for (field, name, pos, color) in raw {
        let Some(pos) = pos else {
            report.error(&format!("{field}.position"), "is required");
            continue;
        };
        if as_index(pos) == Some(len as i64) && len > 0 {
            report.pitfall(format!(
                "Off-by-one: pointer '{name}' sits one past the last index ({})",
                len - 1
            ));
        }
        if let Some(position) = report.expect_index(pos, slots, &format!("{field}.position")) {
            pointers.push(Pointer {
                name,
                position,
                color,
            });
        }
    }

    let mut by_position: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for p in &pointers {
        by_position.entry(p.position).or_default().push(&p.name);
    }
    for (pos, names) in by_position {
        if names.len() > 1 {
            let names: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
            report.edge_case(format!(
                "Pointers {} overlap at index {pos}",
                names.join(", ")
            ));
        }
    }
    pointers
}

fn validate_operations(ops: &Value, arrays: &[ArrayEntity], report: &mut Report) -> Vec<Operation> {
    let Some(items) = report.expect_array(ops, "operations") else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(items.len());
    for (k, op) in items.iter().enumerate() {
        let field = format!("operations[{k}]");
        match op {
            Value::String(s) => out.push(Operation::Label(s.clone())),
            Value::Object(_) => {
                if let Some(action) = validate_action(op, arrays, &field, report) {
                    out.push(Operation::Action(action));
                }
            }
            _ => report.error(&field, "must be a string or an object"),
        }
    }
    out
}

fn validate_action(op: &Value, arrays: &[ArrayEntity], field: &str, report: &mut Report) -> Option<ArrayOperation> {
    let Some(kind_raw) = str_field(op, &["type", "kind", "op"]) else {
        report.error(&format!("{field}.type"), "is required");
        return None;
    };
    let Some(kind) = OperationKind::parse(&kind_raw) else {
        report.error(
            &format!("{field}.type"),
            format!("unknown operation '{kind_raw}' (expected swap, compare, access, insert, delete or move)"),
        );
        return None;
    };

    let array = str_field(op, &["array", "target"]);
    let target = match &array {
        Some(name) => match arrays.iter().find(|a| &a.name == name) {
            Some(a) => a,
            None => {
                report.error(&format!("{field}.array"), format!("unknown array '{name}'"));
                return None;
            }
        },
        None => match arrays.first() {
            Some(a) => a,
            None => {
                report.error(field, "no array to apply the operation to");
                return None;
            }
        },
    };

    let raw_indices: Vec<&Value> = match op.get("indices") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) if !other.is_null() => {
            report.expect_array(other, &format!("{field}.indices"));
            return None;
        }
        _ => ["i", "j", "index"]
            .iter()
            .filter_map(|k| op.get(*k).filter(|v| !v.is_null()))
            .collect(),
    };

    let count = raw_indices.len();
    let arity_ok = match kind {
        OperationKind::Swap => count == 2,
        OperationKind::Compare => count >= 2,
        _ => true,
    };
    if !arity_ok {
        let need = if kind == OperationKind::Swap { "exactly 2" } else { "at least 2" };
        report.error(
            &format!("{field}.indices"),
            format!("{} requires {need} indices, got {count}", kind.as_str()),
        );
        return None;
    }

    let len = target.values.len();
    let mut indices = Vec::with_capacity(count);
    let mut ok = true;
    for (j, v) in raw_indices.into_iter().enumerate() {
        match report.expect_index(v, len, &format!("{field}.indices[{j}]")) {
            Some(i) => indices.push(i),
            None => ok = false,
        }
    }
    ok.then(|| ArrayOperation {
        kind,
        indices,
        array,
        description: str_field(op, &["description", "label"]),
    })
}

fn detect_patterns(entity: &ArrayEntity, limits: &ValidationLimits, report: &mut Report) {
    let name = &entity.name;
    let values = &entity.values;
    if values.is_empty() {
        return;
    }
    if values.len() == 1 {
        report.edge_case(format!("Single-element array '{name}'"));
    }

    let nums: Vec<f64> = values
        .iter()
        .filter(|v| v.is_number())
        .filter_map(as_number)
        .collect();
    let numeric = nums.len() == values.len();

    if numeric {
        if nums.iter().any(|n| *n < 0.0) {
            report.edge_case(format!("Array '{name}' contains negative values"));
        }
        if nums.iter().any(|n| n.abs() > limits.large_magnitude) {
            report.pitfall(format!(
                "Array '{name}' contains very large values: sums and products may overflow fixed-width integers"
            ));
        }
    }

    if values.len() < 2 {
        return;
    }
    if values.windows(2).all(|w| w[0] == w[1]) {
        report.edge_case(format!("All values in '{name}' are identical"));
        return;
    }
    if !numeric {
        return;
    }
    if nums.windows(2).all(|w| w[0] <= w[1]) {
        report.edge_case(format!("Array '{name}' is already sorted ascending"));
    } else if nums.windows(2).all(|w| w[0] >= w[1]) {
        report.edge_case(format!("Array '{name}' is sorted descending"));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/validate/array.rs"]
mod tests;
