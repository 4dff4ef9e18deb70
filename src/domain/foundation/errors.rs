//! Error types for the domain layer.

use thiserror::Error;

/// Errors surfaced by session operations.
///
/// All of these are handled at the message-handler boundary; none escapes
/// to crash the shared process. A failed operation simply omits its
/// broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The presented token is not registered.
    #[error("unknown token")]
    Unauthorized,

    /// The acting identity lacks the master role.
    ///
    /// Handled as a silent no-op rather than surfaced to the client, so an
    /// unauthorized caller learns nothing about the room. The variant exists
    /// so handlers can make the early return explicit.
    #[error("master role required")]
    PermissionDenied,
}

/// Errors that occur while validating registration input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field '{field}' cannot be empty")]
    EmptyField { field: &'static str },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: &'static str) -> Self {
        ValidationError::EmptyField { field }
    }

    /// Name of the offending field, for field-keyed error responses.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyField { field } => field,
        }
    }
}
