//! Error types for the item model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while parsing or validating local item declarations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A field failed its declared constraint.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Value type tag outside the known set.
    #[error("unknown value type: {0}")]
    UnknownValueType(String),
}

impl ModelError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the offending field name for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            ModelError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
