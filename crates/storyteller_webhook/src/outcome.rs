//! Terminal state of one request.

use crate::FallbackMessages;

/// How a request ended.
#[derive(Debug, Clone, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// An answer for the caller
    Answered(String),
    /// Empty query
    Clarify,
    /// Search returned nothing usable
    NothingFound,
    /// Retrieval failed
    Unavailable,
    /// Generation failed
    GenerationFailed,
    /// Unexpected failure
    Internal,
}

impl Outcome {
    /// Text sent to the caller.
    pub fn message<'a>(&'a self, messages: &'a FallbackMessages) -> &'a str {
        match self {
            Self::Answered(text) => text,
            Self::Clarify => &messages.clarification,
            Self::NothingFound => &messages.nothing_found,
            Self::Unavailable => &messages.unavailable,
            Self::GenerationFailed => &messages.generation_failed,
            Self::Internal => &messages.internal,
        }
    }

    /// Whether the caller got a real answer.
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered(_))
    }
}
