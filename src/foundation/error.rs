use crate::fallback::category::ErrorCategory;

/// Convenience result type used across stepviz.
pub type StepvizResult<T> = Result<T, StepvizError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Payload problems never surface here: validators collect them into a
/// [`crate::ValidationResult`] instead. These variants cover caller mistakes and
/// configuration problems.
#[derive(thiserror::Error, Debug)]
pub enum StepvizError {
    /// Invalid caller-provided data outside the per-step validators.
    #[error("validation error: {0}")]
    Validation(String),

    /// A payload could not be classified at all.
    #[error("classification error: {0}")]
    Classification(String),

    /// Layout could not be computed for a step.
    #[error("layout error: {0}")]
    Layout(String),

    /// Invalid pipeline configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Requested step index does not exist in the loaded sequence.
    #[error("step {index} is out of range (sequence has {len} steps)")]
    StepOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of loaded steps.
        len: usize,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StepvizError {
    /// Build a [`StepvizError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StepvizError::Classification`] value.
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification(msg.into())
    }

    /// Build a [`StepvizError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`StepvizError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StepvizError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Map this error into the user-facing category taxonomy shared with the
    /// fallback resolver.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::DataValidation,
            Self::Classification(_) => ErrorCategory::TypeMismatch,
            Self::Layout(_) => ErrorCategory::Rendering,
            Self::StepOutOfRange { .. } => ErrorCategory::NoData,
            Self::Config(msg) | Self::Serde(msg) => ErrorCategory::from_message(msg),
            Self::Other(err) => ErrorCategory::from_message(&err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StepvizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
