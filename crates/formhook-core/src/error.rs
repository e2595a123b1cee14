//! Error types for payload reshaping.

use thiserror::Error;

/// Result type alias using `ReshapeError`.
pub type Result<T> = std::result::Result<T, ReshapeError>;

/// Failure to build an [`EventRecord`](crate::EventRecord) from a payload.
///
/// Only the fixed scalar fields can fail a reshape. Incomplete attribute or
/// trait triples are dropped without an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReshapeError {
    /// A required fixed field was absent or not a string (E1002).
    #[error("[E1002] Missing field: `{field}` must be a string, found {found}")]
    MissingField {
        /// Payload key of the offending field
        field: &'static str,
        /// What was found under the key instead of a string
        found: &'static str,
    },
}

impl ReshapeError {
    /// Returns the error code used in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "E1002",
        }
    }

    /// Returns the payload key that caused the failure.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field, .. } => field,
        }
    }
}
