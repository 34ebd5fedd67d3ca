//! Domain error model.

use thiserror::Error;

/// Result type used across the workflow domain.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation, missing
/// references, invariants). Infrastructure concerns belong elsewhere. Note
/// that "budget already approved" is deliberately NOT an error: idempotent
/// re-approval is reported as an informational outcome by the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// A required field was missing or malformed. No state was mutated.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced entity id does not exist. No state was mutated.
    #[error("not found")]
    NotFound,

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl WorkflowError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
