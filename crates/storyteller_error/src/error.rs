//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, HttpError, RetrievalError};

/// Every error condition a Storyteller crate can surface.
///
/// # Examples
///
/// ```
/// use storyteller_error::{StorytellerError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: StorytellerError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StorytellerErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Vector-search retrieval error
    #[from(RetrievalError)]
    Retrieval(RetrievalError),
    /// Chat-completion generation error
    #[from(GenerationError)]
    Generation(GenerationError),
}

/// Storyteller error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyteller_error::{ConfigError, StorytellerErrorKind, StorytellerResult};
///
/// fn might_fail() -> StorytellerResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), StorytellerErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyteller Error: {}", _0)]
pub struct StorytellerError(Box<StorytellerErrorKind>);

impl StorytellerError {
    /// Create a new error from a kind.
    pub fn new(kind: StorytellerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorytellerErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to StorytellerErrorKind
impl<T> From<T> for StorytellerError
where
    T: Into<StorytellerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyteller operations.
pub type StorytellerResult<T> = std::result::Result<T, StorytellerError>;
