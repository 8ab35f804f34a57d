//! Wire types for the Chroma HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use storyteller_core::{StoryDocument, dedup_stories};

/// A collection as listed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Server-assigned identifier
    pub id: String,
    /// Collection name
    pub name: String,
    /// Collection metadata
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// Body of `POST /collections/{id}/query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Texts to embed and search for
    pub query_texts: Vec<String>,
    /// Results per query text
    pub n_results: usize,
    /// Fields to return
    pub include: Vec<String>,
}

impl QueryRequest {
    /// Single-text query returning documents, metadata and distances.
    pub fn single(query: impl Into<String>, n_results: usize) -> Self {
        Self {
            query_texts: vec![query.into()],
            n_results,
            include: vec![
                "documents".to_string(),
                "metadatas".to_string(),
                "distances".to_string(),
            ],
        }
    }
}

/// Response of a query: one row per query text, nearest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Document ids
    #[serde(default)]
    pub ids: Vec<Vec<String>>,
    /// Document bodies
    #[serde(default)]
    pub documents: Option<Vec<Vec<Option<String>>>>,
    /// Document metadata
    #[serde(default)]
    pub metadatas: Option<Vec<Vec<Option<Map<String, Value>>>>>,
    /// Distances to the query embedding
    #[serde(default)]
    pub distances: Option<Vec<Vec<Option<f32>>>>,
}

impl QueryResponse {
    /// Stories of the first query row, duplicates collapsed.
    pub fn into_stories(self) -> Vec<StoryDocument> {
        let ids = self.ids.into_iter().next().unwrap_or_default();
        let documents = first_row(self.documents);
        let metadatas = first_row(self.metadatas);
        let distances = first_row(self.distances);

        let stories = documents
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                StoryDocument::new(
                    ids.get(i).cloned(),
                    text.unwrap_or_default(),
                    metadatas.get(i).cloned().flatten().unwrap_or_default(),
                    distances.get(i).copied().flatten(),
                )
            })
            .collect();

        dedup_stories(stories)
    }
}

fn first_row<T>(rows: Option<Vec<Vec<T>>>) -> Vec<T> {
    rows.and_then(|rows| rows.into_iter().next())
        .unwrap_or_default()
}

/// Body of `POST /collections/{id}/get`, used to peek at stored chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetRequest {
    /// Maximum number of records
    pub limit: usize,
    /// Fields to return
    pub include: Vec<String>,
}

impl GetRequest {
    /// Peek at up to `limit` records' documents and metadata.
    pub fn peek(limit: usize) -> Self {
        Self {
            limit,
            include: vec!["documents".to_string(), "metadatas".to_string()],
        }
    }
}

/// Response of a get: flat, unordered records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GetResponse {
    /// Record ids
    #[serde(default)]
    pub ids: Vec<String>,
    /// Record bodies
    #[serde(default)]
    pub documents: Option<Vec<Option<String>>>,
    /// Record metadata
    #[serde(default)]
    pub metadatas: Option<Vec<Option<Map<String, Value>>>>,
}

impl GetResponse {
    /// Records as stories, without collapsing duplicates.
    pub fn into_stories(self) -> Vec<StoryDocument> {
        let documents = self.documents.unwrap_or_default();
        let metadatas = self.metadatas.unwrap_or_default();
        self.ids
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                StoryDocument::new(
                    Some(id),
                    documents.get(i).cloned().flatten().unwrap_or_default(),
                    metadatas.get(i).cloned().flatten().unwrap_or_default(),
                    None,
                )
            })
            .collect()
    }
}
