/// User-facing failure categories shared by validation fallbacks and runtime errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    DataValidation,
    Rendering,
    Performance,
    Network,
    InvalidStructure,
    MissingFields,
    TypeMismatch,
    NoData,
    Generic,
}

// Checked in order; the first rule with a matching keyword wins.
const RULES: &[(ErrorCategory, &[&str])] = &[
    (
        ErrorCategory::Network,
        &["network", "fetch", "timeout", "timed out", "connection"],
    ),
    (
        ErrorCategory::Performance,
        &["performance", "too large", "too many", "memory", "slow", "exceeded"],
    ),
    (
        ErrorCategory::InvalidStructure,
        &[
            "invalid structure",
            "malformed",
            "parsing",
            "syntax",
            "at line",
            "references unknown",
            "cycle",
        ],
    ),
    (
        ErrorCategory::MissingFields,
        &["missing", "required", "undefined"],
    ),
    (
        ErrorCategory::TypeMismatch,
        &["type mismatch", "invalid type", "must be a", "expected", "type hint"],
    ),
    (
        ErrorCategory::NoData,
        &["no data", "empty", "null", "no steps", "out of range", "not found"],
    ),
    (
        ErrorCategory::Rendering,
        &["render", "layout", "canvas", "svg", "draw"],
    ),
    (
        ErrorCategory::DataValidation,
        &["validation", "invalid", "out of bounds", "bounds"],
    ),
];

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 9] = [
        ErrorCategory::DataValidation,
        ErrorCategory::Rendering,
        ErrorCategory::Performance,
        ErrorCategory::Network,
        ErrorCategory::InvalidStructure,
        ErrorCategory::MissingFields,
        ErrorCategory::TypeMismatch,
        ErrorCategory::NoData,
        ErrorCategory::Generic,
    ];

    /// Pattern-match a free-form message into a category. Never fails; unmatched
    /// messages are [`ErrorCategory::Generic`].
    pub fn from_message(msg: &str) -> Self {
        let lower = msg.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map_or(ErrorCategory::Generic, |(cat, _)| *cat)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::DataValidation => "data-validation",
            ErrorCategory::Rendering => "rendering",
            ErrorCategory::Performance => "performance",
            ErrorCategory::Network => "network",
            ErrorCategory::InvalidStructure => "invalid-structure",
            ErrorCategory::MissingFields => "missing-fields",
            ErrorCategory::TypeMismatch => "type-mismatch",
            ErrorCategory::NoData => "no-data",
            ErrorCategory::Generic => "generic",
        }
    }

    /// Short title for explanations.
    pub fn title(self) -> &'static str {
        match self {
            ErrorCategory::DataValidation => "Invalid visualization data",
            ErrorCategory::Rendering => "Could not draw this step",
            ErrorCategory::Performance => "Data too large to visualize smoothly",
            ErrorCategory::Network => "Step data could not be loaded",
            ErrorCategory::InvalidStructure => "Malformed data structure",
            ErrorCategory::MissingFields => "Required fields are missing",
            ErrorCategory::TypeMismatch => "Data does not match its declared type",
            ErrorCategory::NoData => "Nothing to visualize",
            ErrorCategory::Generic => "Something went wrong",
        }
    }

    pub(crate) fn suggestions(self) -> &'static [&'static str] {
        match self {
            ErrorCategory::DataValidation => &[
                "Check that highlight and pointer indices are within the array bounds",
                "Make sure window start is not after window end",
            ],
            ErrorCategory::Rendering => &["Try another step; the data itself may be fine"],
            ErrorCategory::Performance => &[
                "Reduce the input size for the visualization",
                "Show a representative slice of the data instead",
            ],
            ErrorCategory::Network => &["Retry loading the analysis"],
            ErrorCategory::InvalidStructure => &[
                "Make sure every edge names existing nodes",
                "Check the payload against the expected format below",
            ],
            ErrorCategory::MissingFields => &[
                "Add the structure's root collection (for example `nodes` for a tree)",
                "Compare the payload with the expected format below",
            ],
            ErrorCategory::TypeMismatch => &[
                "Set `type` to the structure the data actually contains",
                "Or omit `type` and let the structure be detected",
            ],
            ErrorCategory::NoData => &["Provide at least one step with visualization data"],
            ErrorCategory::Generic => &["Compare the payload with the expected format below"],
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fallback/category.rs"]
mod tests;
