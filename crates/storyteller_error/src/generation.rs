//! Error types for the chat-completion generation adapter.

use crate::RetryableError;

/// Generation-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// No API key was found; raised before any network call
    #[display("{} environment variable not set", _0)]
    MissingCredential(String),
    /// The request did not complete within the configured timeout
    #[display("Chat completion timed out after {} ms", _0)]
    Timeout(u64),
    /// The chat-completion service could not be reached
    #[display("Chat completion service unreachable: {}", _0)]
    Connect(String),
    /// Any other transport failure
    #[display("Chat completion request failed: {}", _0)]
    Http(String),
    /// The API answered with a non-success status
    #[display("Chat completion API error {}: {}", status_code, message)]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message returned by the API
        message: String,
    },
    /// The response carried no usable text
    #[display("Chat completion returned no content")]
    EmptyCompletion,
    /// The response body could not be decoded
    #[display("Failed to decode chat completion: {}", _0)]
    Deserialization(String),
    /// The outbound request could not be assembled
    #[display("Builder error: {}", _0)]
    Builder(String),
}

impl GenerationErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationErrorKind::Timeout(_) | GenerationErrorKind::Connect(_) => true,
            GenerationErrorKind::Api { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyteller_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingCredential(
///     "OPENAI_API_KEY".to_string(),
/// ));
/// assert!(!err.is_retryable());
/// assert!(format!("{}", err).contains("OPENAI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for generation operations.
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;
