//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction and message validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid value: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an invalid value validation error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Machine-readable error code for the wire protocol.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyField { .. } => "EMPTY_FIELD",
            ValidationError::InvalidValue { .. } => "INVALID_VALUE",
        }
    }
}
