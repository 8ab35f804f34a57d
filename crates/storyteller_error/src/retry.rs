//! Retry classification shared by the outbound adapters.

/// Trait for errors that support retry logic.
///
/// Transient errors like timeouts, refused connections, 429 or 5xx responses
/// return true. Permanent errors like a missing credential, 401 or 400 return
/// false and are surfaced immediately.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}
