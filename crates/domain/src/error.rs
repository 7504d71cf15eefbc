//! Domain error types.

use thiserror::Error;

use crate::order::TransitionError;

/// Errors raised before any store access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A field was present but its value is not acceptable.
    #[error("{field} {reason}")]
    Invalid { field: String, reason: &'static str },

    /// The supplied order status is not one of the known values.
    #[error("invalid order status: {0}")]
    UnknownStatus(String),

    /// The order status guard rejected the move.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl DomainError {
    pub fn required(field: impl Into<String>) -> Self {
        DomainError::Required {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: &'static str) -> Self {
        DomainError::Invalid {
            field: field.into(),
            reason,
        }
    }

    /// Returns the offending field name, if the error is about a field.
    pub fn field(&self) -> Option<&str> {
        match self {
            DomainError::Required { field } | DomainError::Invalid { field, .. } => Some(field),
            DomainError::UnknownStatus(_) => Some("status"),
            DomainError::Transition(_) => None,
        }
    }
}
