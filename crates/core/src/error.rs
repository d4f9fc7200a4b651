//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, bad arguments). Failures of an invoice source belong to the
/// source's own error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated (e.g. arithmetic overflow of a total).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A required argument was missing or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            DomainError::invalid_argument("invoice source is required").to_string(),
            "invalid argument: invoice source is required"
        );
        assert_eq!(
            DomainError::invariant("invoice total overflow").to_string(),
            "invariant violated: invoice total overflow"
        );
        assert_eq!(DomainError::not_found().to_string(), "not found");
    }
}
