//! Error types for the vector-search retrieval adapter.

use crate::RetryableError;

/// Retrieval-specific error conditions.
///
/// Every variant means the similarity search could not be answered. An empty
/// result set is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RetrievalErrorKind {
    /// The request did not complete within the configured timeout
    #[display("Vector search timed out after {} ms", _0)]
    Timeout(u64),
    /// The vector-search service could not be reached
    #[display("Vector search unreachable: {}", _0)]
    Connect(String),
    /// Any other transport failure
    #[display("Vector search request failed: {}", _0)]
    Http(String),
    /// The service answered with a non-success status
    #[display("Vector search returned HTTP {}: {}", status_code, message)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// The configured collection does not exist
    #[display("Collection '{}' not found", _0)]
    CollectionNotFound(String),
    /// The response body could not be decoded
    #[display("Failed to decode vector search response: {}", _0)]
    Deserialization(String),
}

impl RetrievalErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            RetrievalErrorKind::Timeout(_) | RetrievalErrorKind::Connect(_) => true,
            RetrievalErrorKind::Status { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Retrieval error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyteller_error::{RetrievalError, RetrievalErrorKind, RetryableError};
///
/// let err = RetrievalError::new(RetrievalErrorKind::Timeout(10_000));
/// assert!(err.is_retryable());
/// assert!(format!("{}", err).contains("timed out"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Retrieval Error: {} at line {} in {}", kind, line, file)]
pub struct RetrievalError {
    /// The kind of error that occurred
    pub kind: RetrievalErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RetrievalError {
    /// Create a new RetrievalError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RetrievalErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl RetryableError for RetrievalError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for retrieval operations.
pub type RetrievalResult<T> = std::result::Result<T, RetrievalError>;
