use serde_json::Value;

use crate::classify::flags::TABLE_KEYS;
use crate::foundation::json::{as_index, first_field, is_table, string_list};
use crate::model::data::{Cell, DpData, SanitizedData};
use crate::validate::report::{Report, ValidationResult};

pub(crate) fn validate_dp(data: &Value) -> ValidationResult {
    let mut report = Report::default();

    let Some((field, rows)) = find_table(data, &mut report) else {
        report.warn(
            "matrix",
            format!("no 2-D table found (looked for {})", TABLE_KEYS.join(", ")),
        );
        return report.finish(SanitizedData::Dp(DpData::default()));
    };

    let cols = rows.iter().map(|r| r.as_array().map_or(0, Vec::len)).max().unwrap_or(0);
    let mut matrix = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let mut cells = match row {
            Value::Array(cells) => cells.clone(),
            other => {
                report.expect_array(other, &format!("{field}[{i}]"));
                Vec::new()
            }
        };
        if cells.len() < cols && row.is_array() {
            report.warn(
                &format!("{field}[{i}]"),
                format!("ragged row of {} cells padded to {cols}", cells.len()),
            );
        }
        cells.resize(cols, Value::Null);
        matrix.push(cells);
    }
    let n_rows = matrix.len();

    if n_rows == 0 || cols == 0 {
        report.edge_case("Empty DP table");
    } else if n_rows == 1 && cols == 1 {
        report.edge_case("1x1 DP table: only the base case is shown");
    }

    let current_cell = first_field(data, &["currentCell", "current"])
        .and_then(|(key, v)| cell(v, n_rows, cols, key, &mut report));

    let mut highlights = Vec::new();
    if let Some((key, raw)) = first_field(data, &["highlights", "highlightedCells"]) {
        if let Some(items) = report.expect_array(raw, key) {
            for (j, item) in items.iter().enumerate() {
                if let Some(c) = cell(item, n_rows, cols, &format!("{key}[{j}]"), &mut report) {
                    if !highlights.contains(&c) {
                        highlights.push(c);
                    }
                }
            }
        }
    }

    let row_labels = string_list(data.get("rowLabels"));
    let col_labels = string_list(data.get("colLabels"));
    if !row_labels.is_empty() && row_labels.len() != n_rows {
        report.warn("rowLabels", format!("{} labels for {n_rows} rows", row_labels.len()));
    }
    if !col_labels.is_empty() && col_labels.len() != cols {
        report.warn("colLabels", format!("{} labels for {cols} columns", col_labels.len()));
    }

    report.finish(SanitizedData::Dp(DpData {
        matrix,
        rows: n_rows,
        cols,
        current_cell,
        highlights,
        row_labels,
        col_labels,
    }))
}

/// First 2-D table in the payload. A 1-D `dp`/`memo` array becomes a single row.
fn find_table(data: &Value, report: &mut Report) -> Option<(String, Vec<Value>)> {
    if is_table(data) {
        return data.as_array().map(|rows| ("matrix".to_string(), rows.clone()));
    }
    for key in TABLE_KEYS {
        if let Some(v) = data.get(key).filter(|v| is_table(v)) {
            return v.as_array().map(|rows| (key.to_string(), rows.clone()));
        }
    }
    for key in ["dp", "memo"] {
        if let Some(Value::Array(row)) = data.get(key) {
            report.edge_case(format!("1-D `{key}` array shown as a single row"));
            return Some((key.to_string(), vec![Value::Array(row.clone())]));
        }
    }
    // An explicitly empty table is present, just empty.
    TABLE_KEYS
        .iter()
        .find_map(|k| data.get(*k).and_then(Value::as_array).filter(|a| a.is_empty()))
        .map(|_| ("matrix".to_string(), Vec::new()))
}

fn cell(v: &Value, rows: usize, cols: usize, field: &str, report: &mut Report) -> Option<Cell> {
    let (r, c) = match v {
        Value::Array(pair) if pair.len() == 2 => (&pair[0], &pair[1]),
        Value::Object(_) => {
            let r = first_field(v, &["row", "r", "i"]).map(|(_, x)| x);
            let c = first_field(v, &["col", "column", "c", "j"]).map(|(_, x)| x);
            match (r, c) {
                (Some(r), Some(c)) => (r, c),
                _ => {
                    report.error(field, "must have row and col");
                    return None;
                }
            }
        }
        Value::Null => return None,
        _ => {
            report.error(field, "must be {row, col} or [row, col]");
            return None;
        }
    };
    let (Some(r), Some(c)) = (as_index(r), as_index(c)) else {
        report.error(field, "row and col must be integers");
        return None;
    };
    let row = report.expect_range(r, 0, rows as i64 - 1, &format!("{field}.row"));
    let col = report.expect_range(c, 0, cols as i64 - 1, &format!("{field}.col"));
    Some(Cell {
        row: usize::try_from(row?).ok()?,
        col: usize::try_from(col?).ok()?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/validate/dp.rs"]
mod tests;
