//! HTTP routes for the webhook endpoints, health and metrics.

use crate::{Endpoint, EndpointConfig, FallbackMessages, WebhookMetrics};
use axum::{
    Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use storyteller_interface::{StoryGenerator, StoryRetriever};
use tracing::{info, warn};

/// State of the health and metrics routes.
#[derive(Debug, Clone)]
pub struct ApiState {
    metrics: WebhookMetrics,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(metrics: WebhookMetrics) -> Self {
        Self { metrics }
    }
}

/// Every configured endpoint sharing one retriever, one generator and one set of counters.
#[derive(Debug)]
pub struct Webhook {
    endpoints: Vec<Arc<Endpoint>>,
    metrics: WebhookMetrics,
}

impl Webhook {
    /// Bind each endpoint configuration to the shared adapters.
    pub fn new(
        configs: &[EndpointConfig],
        defaults: &FallbackMessages,
        retriever: Arc<dyn StoryRetriever>,
        generator: Arc<dyn StoryGenerator>,
    ) -> Self {
        let metrics = WebhookMetrics::new();
        let endpoints = configs
            .iter()
            .map(|config| {
                Arc::new(Endpoint::new(
                    config.clone(),
                    defaults,
                    Arc::clone(&retriever),
                    Arc::clone(&generator),
                    metrics.clone(),
                ))
            })
            .collect();
        Self { endpoints, metrics }
    }

    /// Shared request counters.
    pub fn metrics(&self) -> &WebhookMetrics {
        &self.metrics
    }

    /// Configured endpoints.
    pub fn endpoints(&self) -> &[Arc<Endpoint>] {
        &self.endpoints
    }

    /// One POST route per endpoint plus `GET /health` and `GET /metrics`.
    pub fn router(&self) -> Router {
        let mut router = Router::new();
        for endpoint in &self.endpoints {
            info!(path = endpoint.path(), mode = %endpoint.config().mode, "Registering endpoint");
            let path = endpoint.path().to_string();
            let endpoint = Arc::clone(endpoint);
            router = router.route(
                &path,
                post(move |body: Result<Bytes, BytesRejection>| handle(endpoint, body)),
            );
        }
        router.merge(create_api_router(ApiState::new(self.metrics.clone())))
    }
}

/// Unreadable, oversized and non-JSON bodies all count as an empty payload.
async fn handle(
    endpoint: Arc<Endpoint>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<Value>) {
    let payload = match body {
        Ok(body) => serde_json::from_slice(&body).unwrap_or_else(|e| {
            warn!(path = endpoint.path(), error = %e, "Request body is not JSON, treating as empty");
            Value::Null
        }),
        Err(e) => {
            warn!(path = endpoint.path(), error = %e, "Request body could not be read, treating as empty");
            Value::Null
        }
    };
    (StatusCode::OK, Json(endpoint.handle(&payload).await))
}

/// Creates the health and metrics router.
pub fn create_api_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Get current metrics snapshot.
async fn get_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.metrics.snapshot()))
}
