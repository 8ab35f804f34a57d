//! Request counters for the webhook.

use crate::Outcome;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counts requests by outcome. Cheap to clone; clones share counters.
#[derive(Debug, Clone)]
pub struct WebhookMetrics {
    inner: Arc<WebhookMetricsInner>,
}

#[derive(Debug)]
struct WebhookMetricsInner {
    requests: AtomicU64,
    answered: AtomicU64,
    clarifications: AtomicU64,
    nothing_found: AtomicU64,
    unavailable: AtomicU64,
    generation_failures: AtomicU64,
    internal_errors: AtomicU64,

    last_answer: parking_lot::Mutex<Option<Instant>>,
}

impl Default for WebhookMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl WebhookMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(WebhookMetricsInner {
                requests: AtomicU64::new(0),
                answered: AtomicU64::new(0),
                clarifications: AtomicU64::new(0),
                nothing_found: AtomicU64::new(0),
                unavailable: AtomicU64::new(0),
                generation_failures: AtomicU64::new(0),
                internal_errors: AtomicU64::new(0),
                last_answer: parking_lot::Mutex::new(None),
            }),
        }
    }

    /// Records one finished request.
    pub fn record(&self, outcome: &Outcome) {
        self.inner.requests.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Answered(_) => {
                *self.inner.last_answer.lock() = Some(Instant::now());
                &self.inner.answered
            }
            Outcome::Clarify => &self.inner.clarifications,
            Outcome::NothingFound => &self.inner.nothing_found,
            Outcome::Unavailable => &self.inner.unavailable,
            Outcome::GenerationFailed => &self.inner.generation_failures,
            Outcome::Internal => &self.inner.internal_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Total requests handled.
    pub fn requests(&self) -> u64 {
        self.inner.requests.load(Ordering::Relaxed)
    }

    /// Requests answered with a real result.
    pub fn answered(&self) -> u64 {
        self.inner.answered.load(Ordering::Relaxed)
    }

    /// Time since the last answered request.
    pub fn time_since_answer(&self) -> Option<Duration> {
        self.inner.last_answer.lock().map(|instant| instant.elapsed())
    }

    /// Share of requests answered with a real result (0.0 - 1.0).
    pub fn answer_rate(&self) -> f64 {
        let requests = self.requests();
        if requests == 0 {
            return 1.0;
        }
        self.answered() as f64 / requests as f64
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        MetricsSnapshot {
            requests: self.requests(),
            answered: self.answered(),
            clarifications: load(&self.inner.clarifications),
            nothing_found: load(&self.inner.nothing_found),
            unavailable: load(&self.inner.unavailable),
            generation_failures: load(&self.inner.generation_failures),
            internal_errors: load(&self.inner.internal_errors),
            seconds_since_answer: self.time_since_answer().map(|d| d.as_secs()),
            answer_rate: self.answer_rate(),
        }
    }
}

/// Serializable snapshot of webhook metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Requests handled
    pub requests: u64,
    /// Requests answered with a result
    pub answered: u64,
    /// Requests answered with the clarification sentence
    pub clarifications: u64,
    /// Searches with no usable match
    pub nothing_found: u64,
    /// Retrieval failures
    pub unavailable: u64,
    /// Generation failures
    pub generation_failures: u64,
    /// Panics and other unexpected failures
    pub internal_errors: u64,
    /// Seconds since the last answered request
    pub seconds_since_answer: Option<u64>,
    /// Share of requests answered with a result
    pub answer_rate: f64,
}
