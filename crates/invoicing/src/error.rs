use thiserror::Error;

use tally_core::DomainError;

/// Failure of an aggregate query over a source whose own error type is `E`.
#[derive(Debug, Error)]
pub enum QueryError<E> {
    /// The invoice source failed; its error is carried as-is.
    #[error("invoice source failed: {0}")]
    Source(#[source] E),

    /// Summation broke a domain invariant (overflow).
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl<E> QueryError<E> {
    pub fn source_error(&self) -> Option<&E> {
        match self {
            QueryError::Source(e) => Some(e),
            QueryError::Domain(_) => None,
        }
    }

    /// Recover the source's error, if that is what failed.
    pub fn into_source(self) -> Option<E> {
        match self {
            QueryError::Source(e) => Some(e),
            QueryError::Domain(_) => None,
        }
    }
}
