//! Connection settings for a Chroma server.

use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storyteller_interface::RetryPolicy;

/// Connection settings for a Chroma server and the collection to search.
///
/// # Example
///
/// ```
/// use storyteller_chroma::ChromaConfig;
///
/// let config = ChromaConfig::default()
///     .with_host("34.118.162.201".to_string())
///     .with_collection("stories".to_string());
/// assert_eq!(config.base_url(), "http://34.118.162.201:8000/api/v1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
pub struct ChromaConfig {
    /// URL scheme, "http" or "https"
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Host name or address
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port
    #[serde(default = "default_port")]
    pub port: u16,
    /// API prefix
    #[serde(default = "default_api_path")]
    pub api_path: String,
    /// Collection holding the story chunks
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Retry behaviour for transient failures
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_api_path() -> String {
    "/api/v1".to_string()
}

fn default_collection() -> String {
    "stories".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            api_path: default_api_path(),
            collection: default_collection(),
            timeout_ms: default_timeout_ms(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ChromaConfig {
    /// Base URL of the API, without a trailing slash
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.scheme,
            self.host,
            self.port,
            self.api_path.trim_matches('/')
        )
        .trim_end_matches('/')
        .to_string()
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
