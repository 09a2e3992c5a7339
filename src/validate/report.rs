use serde_json::Value;

use crate::foundation::json::{as_index, as_number, kind_name};
use crate::model::data::SanitizedData;

/// Outcome of validating one payload. Always produced, always carries renderable data.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub sanitized_data: SanitizedData,
    pub edge_cases: Vec<String>,
    pub pitfalls: Vec<String>,
}

/// Accumulates findings while a validator walks a payload.
///
/// Errors are field-qualified as `"<field>: <reason>"`. Edge cases, pitfalls and
/// warnings are de-duplicated in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
    edge_cases: Vec<String>,
    pitfalls: Vec<String>,
    fatal: bool,
}

impl Report {
    pub(crate) fn error(&mut self, field: &str, reason: impl AsRef<str>) {
        push_unique(&mut self.errors, format!("{field}: {}", reason.as_ref()));
    }

    /// Record that the payload's root collection is missing. The result will be
    /// invalid no matter what else is found.
    pub(crate) fn missing_root(&mut self, field: &str) {
        self.fatal = true;
        self.error(field, "is required");
    }

    pub(crate) fn warn(&mut self, field: &str, reason: impl AsRef<str>) {
        push_unique(&mut self.warnings, format!("{field}: {}", reason.as_ref()));
    }

    pub(crate) fn edge_case(&mut self, msg: impl Into<String>) {
        push_unique(&mut self.edge_cases, msg.into());
    }

    pub(crate) fn pitfall(&mut self, msg: impl Into<String>) {
        push_unique(&mut self.pitfalls, msg.into());
    }

    /// Fold another validator's findings into this one.
    pub(crate) fn absorb(&mut self, other: ValidationResult) {
        for e in other.errors {
            push_unique(&mut self.errors, e);
        }
        for w in other.warnings {
            push_unique(&mut self.warnings, w);
        }
        for e in other.edge_cases {
            push_unique(&mut self.edge_cases, e);
        }
        for p in other.pitfalls {
            push_unique(&mut self.pitfalls, p);
        }
    }

    pub(crate) fn finish(self, sanitized_data: SanitizedData) -> ValidationResult {
        ValidationResult {
            is_valid: !self.fatal && self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
            sanitized_data,
            edge_cases: self.edge_cases,
            pitfalls: self.pitfalls,
        }
    }

    // Shared primitives. Each returns the typed value on success and records a
    // field-qualified error otherwise.

    pub(crate) fn require<'a>(&mut self, obj: &'a Value, key: &str, field: &str) -> Option<&'a Value> {
        match obj.get(key) {
            Some(v) if !v.is_null() => Some(v),
            _ => {
                self.error(field, "is required");
                None
            }
        }
    }

    pub(crate) fn expect_array<'a>(&mut self, v: &'a Value, field: &str) -> Option<&'a Vec<Value>> {
        let arr = v.as_array();
        if arr.is_none() {
            self.error(field, format!("must be an array, got {}", kind_name(v)));
        }
        arr
    }

    pub(crate) fn expect_number(&mut self, v: &Value, field: &str) -> Option<f64> {
        let n = as_number(v);
        if n.is_none() {
            self.error(field, format!("must be a number, got {}", kind_name(v)));
        }
        n
    }

    pub(crate) fn expect_string<'a>(&mut self, v: &'a Value, field: &str) -> Option<&'a str> {
        let s = v.as_str();
        if s.is_none() {
            self.error(field, format!("must be a string, got {}", kind_name(v)));
        }
        s
    }

    /// Integer index in `[0, len)`. `len == 0` rejects every index.
    pub(crate) fn expect_index(&mut self, v: &Value, len: usize, field: &str) -> Option<usize> {
        let Some(i) = as_index(v) else {
            self.error(field, format!("must be an integer index, got {}", kind_name(v)));
            return None;
        };
        self.expect_range(i, 0, len as i64 - 1, field)
            .and_then(|i| usize::try_from(i).ok())
    }

    /// Inclusive numeric range check.
    pub(crate) fn expect_range(&mut self, v: i64, min: i64, max: i64, field: &str) -> Option<i64> {
        if v < min || v > max {
            if max < min {
                self.error(field, format!("index {v} out of bounds (no valid indices)"));
            } else {
                self.error(
                    field,
                    format!("index {v} out of bounds (valid range {min}..={max})"),
                );
            }
            return None;
        }
        Some(v)
    }
}

fn push_unique(list: &mut Vec<String>, msg: String) {
    if !list.contains(&msg) {
        list.push(msg);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/validate/report.rs"]
mod tests;
