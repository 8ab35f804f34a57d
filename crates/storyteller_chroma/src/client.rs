//! HTTP client for the Chroma API.

use crate::{
    ChromaConfig, CollectionInfo, CollectionSummary, GetRequest, GetResponse, QueryRequest,
    QueryResponse,
};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use storyteller_core::StoryDocument;
use storyteller_error::{RetrievalError, RetrievalErrorKind, RetrievalResult};
use storyteller_interface::StoryRetriever;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument, warn};

/// Client for one Chroma server and its story collection.
#[derive(Debug)]
pub struct ChromaClient {
    config: ChromaConfig,
    client: reqwest::Client,
    collection_id: RwLock<Option<String>>,
}

impl ChromaClient {
    /// Create a client. No request is made until the first search.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip(config), fields(base_url = %config.base_url(), collection = %config.collection))]
    pub fn new(config: ChromaConfig) -> RetrievalResult<Self> {
        debug!("Creating Chroma client");
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                RetrievalError::new(RetrievalErrorKind::Http(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self {
            config,
            client,
            collection_id: RwLock::new(None),
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ChromaConfig {
        &self.config
    }

    /// Check that the server answers.
    #[instrument(skip(self))]
    pub async fn heartbeat(&self) -> RetrievalResult<()> {
        let url = self.url(&["heartbeat"])?;
        let _: serde_json::Value = self.send(self.client.get(url)).await?;
        debug!("Chroma server is healthy");
        Ok(())
    }

    /// List every collection on the server.
    #[instrument(skip(self))]
    pub async fn list_collections(&self) -> RetrievalResult<Vec<CollectionInfo>> {
        let url = self.url(&["collections"])?;
        self.send(self.client.get(url)).await
    }

    /// Look up a collection by name.
    #[instrument(skip(self))]
    pub async fn collection(&self, name: &str) -> RetrievalResult<CollectionInfo> {
        let url = self.url(&["collections", name])?;
        self.send(self.client.get(url)).await.map_err(|e| {
            let missing = matches!(
                &e.kind,
                RetrievalErrorKind::Status { status_code, message }
                    if *status_code == 404 || message.contains("does not exist")
            );
            if missing {
                RetrievalError::new(RetrievalErrorKind::CollectionNotFound(name.to_string()))
            } else {
                e
            }
        })
    }

    /// Id of the configured collection, resolved on first use and cached.
    pub async fn collection_id(&self) -> RetrievalResult<String> {
        if let Some(id) = self.collection_id.read().await.as_ref() {
            return Ok(id.clone());
        }

        let mut cached = self.collection_id.write().await;
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }
        let info = self.collection(&self.config.collection).await?;
        debug!(collection = %info.name, id = %info.id, "Resolved collection");
        *cached = Some(info.id.clone());
        Ok(info.id)
    }

    /// Drop a cached collection id so the next lookup resolves it again.
    async fn forget_collection_id(&self, stale: &str) {
        let mut cached = self.collection_id.write().await;
        if cached.as_deref() == Some(stale) {
            warn!(collection = %self.config.collection, id = %stale, "Cached collection id is stale");
            *cached = None;
        }
    }

    /// Number of records in a collection.
    #[instrument(skip(self))]
    pub async fn count(&self, collection_id: &str) -> RetrievalResult<u64> {
        let url = self.url(&["collections", collection_id, "count"])?;
        self.send(self.client.get(url)).await
    }

    /// Up to `limit` stored records, in storage order.
    #[instrument(skip(self))]
    pub async fn peek(&self, collection_id: &str, limit: usize) -> RetrievalResult<Vec<StoryDocument>> {
        let url = self.url(&["collections", collection_id, "get"])?;
        let response: GetResponse = self
            .send(self.client.post(url).json(&GetRequest::peek(limit)))
            .await?;
        Ok(response.into_stories())
    }

    /// Similarity search over the configured collection, without retry.
    ///
    /// A 404 for a cached collection id means the collection was recreated;
    /// the id is resolved again and the query repeated once.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn query(&self, query: &str, limit: usize) -> RetrievalResult<Vec<StoryDocument>> {
        let id = self.collection_id().await?;
        let response = match self.query_collection(&id, query, limit).await {
            Err(e) if matches!(e.kind, RetrievalErrorKind::Status { status_code: 404, .. }) => {
                self.forget_collection_id(&id).await;
                let fresh = self.collection_id().await?;
                if fresh == id {
                    return Err(e);
                }
                self.query_collection(&fresh, query, limit).await?
            }
            result => result?,
        };
        let stories = response.into_stories();
        debug!(results = stories.len(), "Query complete");
        Ok(stories)
    }

    async fn query_collection(
        &self,
        collection_id: &str,
        query: &str,
        limit: usize,
    ) -> RetrievalResult<QueryResponse> {
        let url = self.url(&["collections", collection_id, "query"])?;
        self.send(self.client.post(url).json(&QueryRequest::single(query, limit)))
            .await
    }

    /// API URL with each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> RetrievalResult<Url> {
        let base = self.config.base_url();
        let mut url = Url::parse(&base).map_err(|e| {
            RetrievalError::new(RetrievalErrorKind::Http(format!(
                "Invalid base URL {}: {}",
                base, e
            )))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                RetrievalError::new(RetrievalErrorKind::Http(format!(
                    "Base URL {} cannot carry a path",
                    base
                )))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Count plus up to `max_titles` case-insensitively unique sample titles.
    #[instrument(skip(self, info), fields(collection = %info.name))]
    pub async fn summarize_collection(
        &self,
        info: &CollectionInfo,
        max_titles: usize,
        peek_limit: usize,
    ) -> RetrievalResult<CollectionSummary> {
        let count = self.count(&info.id).await?;
        let records = self.peek(&info.id, peek_limit.max(max_titles)).await?;

        let mut seen = HashSet::new();
        let titles = records
            .iter()
            .filter_map(|record| record.metadata_str("title"))
            .map(str::trim)
            .filter(|title| !title.is_empty() && seen.insert(title.to_lowercase()))
            .take(max_titles)
            .map(str::to_string)
            .collect();

        Ok(CollectionSummary::new(info.name.clone(), count, titles))
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> RetrievalResult<T> {
        let response = request.send().await.map_err(|e| {
            error!("Chroma request failed: {}", e);
            let kind = if e.is_timeout() {
                RetrievalErrorKind::Timeout(self.config.timeout_ms)
            } else if e.is_connect() {
                RetrievalErrorKind::Connect(e.to_string())
            } else {
                RetrievalErrorKind::Http(e.to_string())
            };
            RetrievalError::new(kind)
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, "Chroma returned error");
            return Err(RetrievalError::new(RetrievalErrorKind::Status {
                status_code: status.as_u16(),
                message,
            }));
        }

        response.json().await.map_err(|e| {
            error!("Failed to decode Chroma response: {}", e);
            RetrievalError::new(RetrievalErrorKind::Deserialization(e.to_string()))
        })
    }
}

#[async_trait]
impl StoryRetriever for ChromaClient {
    #[instrument(skip(self, query), fields(collection = %self.config.collection))]
    async fn search(&self, query: &str, limit: usize) -> RetrievalResult<Vec<StoryDocument>> {
        self.config
            .retry
            .execute(|| self.query(query, limit))
            .await
    }

    fn collection_name(&self) -> &str {
        &self.config.collection
    }
}
