//! Trait definitions for retrieval and generation backends.

use async_trait::async_trait;
use storyteller_core::{Message, StoryDocument};
use storyteller_error::{GenerationResult, RetrievalResult};

/// Number of documents requested when a caller does not say otherwise.
pub const DEFAULT_SEARCH_LIMIT: usize = 3;

/// Similarity search over a fixed, named collection of stories.
#[async_trait]
pub trait StoryRetriever: Send + Sync {
    /// Return up to `limit` documents nearest to `query`, nearest first.
    ///
    /// Zero matches is `Ok(vec![])`. Transport failures (timeout, refused
    /// connection, non-success status) are `Err`, so callers can tell
    /// "nothing found" apart from "service unavailable".
    async fn search(&self, query: &str, limit: usize) -> RetrievalResult<Vec<StoryDocument>>;

    /// Name of the collection being searched.
    fn collection_name(&self) -> &str;
}

/// Text generation from a remote language model.
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Generate a reply to `prompt` given the prior turns in `history`.
    ///
    /// On success both the user prompt and the model reply are appended to
    /// `history` in place. Callers wanting to keep their history unchanged
    /// must pass a copy. On failure `history` is left as it was.
    async fn generate(&self, prompt: &str, history: &mut Vec<Message>)
    -> GenerationResult<String>;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}
