//! Adapter traits for the Storyteller webhook service.
//!
//! The webhook pipeline never talks to a concrete vector database or language
//! model. It receives a [`StoryRetriever`] and a [`StoryGenerator`] at
//! construction time, which keeps handlers testable and lets a deployment
//! swap backends without touching request handling.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod retry;
mod traits;

pub use retry::RetryPolicy;
pub use traits::{DEFAULT_SEARCH_LIMIT, StoryGenerator, StoryRetriever};
