//! Core data types for the Storyteller webhook service.
//!
//! This crate provides the request-scoped data shared by the retrieval and
//! generation adapters: chat turns and the story documents returned by a
//! similarity search.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod role;
mod story;

pub use message::Message;
pub use role::Role;
pub use story::{SNIPPET_CHARS, StoryDocument, UNKNOWN_TITLE, dedup_stories, truncate_chars};
