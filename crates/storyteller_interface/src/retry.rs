//! Single-retry policy for outbound calls.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use storyteller_error::RetryableError;
use tokio_retry2::strategy::{FixedInterval, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

/// Whether a failed outbound call may be repeated once after a short pause.
///
/// Only errors reporting [`RetryableError::is_retryable`] are repeated, and
/// never more than once.
///
/// ```toml
/// [chroma.retry]
/// enabled = true
/// backoff_ms = 250
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Allow one retry for transient errors
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Upper bound of the jittered pause before the retry
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_backoff_ms() -> u64 {
    250
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Run `operation`, repeating it at most once on a transient error.
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RetryableError + Display,
    {
        let retries = if self.enabled { 1 } else { 0 };
        let strategy = FixedInterval::from_millis(self.backoff_ms)
            .map(jitter)
            .take(retries);

        Retry::spawn(strategy, || async {
            match operation().await {
                Ok(value) => Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Transient error, may retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => Err(RetryError::Permanent(e)),
            }
        })
        .await
    }
}
