//! Story documents returned by a similarity search.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Title used when a document carries no `title` metadata.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Number of leading characters that identify a chunk when collapsing duplicates.
pub const SNIPPET_CHARS: usize = 200;

/// One entry of a similarity search, nearest-first.
///
/// # Examples
///
/// ```
/// use serde_json::{json, Map};
/// use storyteller_core::StoryDocument;
///
/// let mut metadata = Map::new();
/// metadata.insert("title".to_string(), json!("The Brave Knight"));
/// metadata.insert("author".to_string(), json!("Anonymous"));
///
/// let doc = StoryDocument::new(None, "Once upon a time...", metadata, Some(0.12));
/// assert_eq!(doc.title(), "The Brave Knight");
///
/// let untitled = StoryDocument::new(None, "A chunk", Map::new(), None);
/// assert_eq!(untitled.title(), "Unknown Title");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct StoryDocument {
    /// Identifier assigned by the collection, if returned
    id: Option<String>,
    /// Story title taken from metadata
    title: String,
    /// Document body
    text: String,
    /// Free-form metadata (author, year, genre, ...)
    metadata: Map<String, Value>,
    /// Distance to the query embedding, smaller is nearer
    distance: Option<f32>,
}

impl StoryDocument {
    /// Build a document, deriving the title from the `title` metadata entry.
    pub fn new(
        id: Option<String>,
        text: impl Into<String>,
        metadata: Map<String, Value>,
        distance: Option<f32>,
    ) -> Self {
        let title = metadata
            .get("title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();

        Self {
            id,
            title,
            text: text.into(),
            metadata,
            distance,
        }
    }

    /// Whether the body has any non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The first `max_chars` characters of the body.
    pub fn snippet(&self, max_chars: usize) -> &str {
        truncate_chars(&self.text, max_chars)
    }

    /// String-valued metadata lookup.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    fn dedup_key(&self) -> (String, String) {
        (self.title.clone(), self.snippet(SNIPPET_CHARS).to_string())
    }
}

/// Collapse chunks sharing a title and leading snippet, keeping the first.
///
/// Order is preserved, so a nearest-first list stays nearest-first.
pub fn dedup_stories(stories: Vec<StoryDocument>) -> Vec<StoryDocument> {
    let mut seen = HashSet::new();
    stories
        .into_iter()
        .filter(|story| seen.insert(story.dedup_key()))
        .collect()
}

/// Truncate to at most `max_chars` characters without splitting a code point.
///
/// # Examples
///
/// ```
/// use storyteller_core::truncate_chars;
///
/// assert_eq!(truncate_chars("héllo", 2), "hé");
/// assert_eq!(truncate_chars("hi", 10), "hi");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
