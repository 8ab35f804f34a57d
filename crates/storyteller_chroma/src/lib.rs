//! Chroma vector-search adapter for Storyteller.
//!
//! Implements [`StoryRetriever`](storyteller_interface::StoryRetriever) over
//! the Chroma HTTP API (v1). The collection id is resolved by name on first
//! use and cached, so a database that is down at startup only degrades the
//! requests made while it is down.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod dto;
mod summary;

pub use client::ChromaClient;
pub use config::ChromaConfig;
pub use dto::{CollectionInfo, GetRequest, GetResponse, QueryRequest, QueryResponse};
pub use summary::CollectionSummary;
