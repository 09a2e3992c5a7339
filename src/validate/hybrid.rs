use serde_json::Value;

use crate::classify::flags::StructureFlags;
use crate::fallback::resolver::fallback_instance;
use crate::model::canonical::CanonicalType;
use crate::model::data::{HybridData, SanitizedData};
use crate::validate::report::{Report, ValidationResult};
use crate::validate::{ValidationLimits, validate_with};

/// Validate every structure present in the payload with its own validator and
/// merge the findings. Component errors keep their own field prefixes.
pub(crate) fn validate_hybrid(data: &Value, limits: &ValidationLimits) -> ValidationResult {
    let mut report = Report::default();
    let components = StructureFlags::scan(data).components();

    if components.is_empty() {
        report.missing_root("components");
        return report.finish(fallback_instance(CanonicalType::Hybrid));
    }
    if components.len() < 2 {
        report.warn(
            "components",
            format!("only '{}' is present; a hybrid needs two structures", components[0]),
        );
    }

    let mut parts = Vec::with_capacity(components.len());
    for ty in &components {
        let result = validate_with(*ty, data, limits);
        parts.push(result.sanitized_data.clone());
        report.absorb(result);
    }

    report.finish(SanitizedData::Hybrid(HybridData { components, parts }))
}

#[cfg(test)]
#[path = "../../tests/unit/validate/hybrid.rs"]
mod tests;
