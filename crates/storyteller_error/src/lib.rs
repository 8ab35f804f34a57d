//! Error types for the Storyteller webhook service.
//!
//! This crate provides the error types shared by every Storyteller crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Retrieval and generation failures are kept apart so the webhook can answer
//! with the matching fallback sentence.
//!
//! # Examples
//!
//! ```
//! use storyteller_error::{ConfigError, StorytellerResult};
//!
//! fn load() -> StorytellerResult<String> {
//!     Err(ConfigError::new("missing [server] section"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod http;
mod retrieval;
mod retry;

pub use config::ConfigError;
pub use error::{StorytellerError, StorytellerErrorKind, StorytellerResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use http::HttpError;
pub use retrieval::{RetrievalError, RetrievalErrorKind, RetrievalResult};
pub use retry::RetryableError;
