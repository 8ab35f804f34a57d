//! Tests for the chat-completion client against an in-process mock API.

use axum::{Json, Router, extract::State, http::HeaderMap, http::StatusCode, routing::post};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storyteller_core::{Message, Role};
use storyteller_error::GenerationErrorKind;
use storyteller_interface::{RetryPolicy, StoryGenerator};
use storyteller_openai::{OpenAiClient, OpenAiConfig};

#[derive(Clone)]
struct MockApi {
    status: StatusCode,
    body: Value,
    delay: Duration,
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl MockApi {
    fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn completions(
    State(mock): State<MockApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    mock.requests.lock().unwrap().push((auth, body));
    tokio::time::sleep(mock.delay).await;
    (mock.status, Json(mock.body.clone()))
}

async fn spawn_mock(mock: MockApi) -> String {
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(mock);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn completion(text: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 5, "completion_tokens": 7, "total_tokens": 12}
    })
}

fn config(base_url: String) -> OpenAiConfig {
    OpenAiConfig::new(base_url, "gpt-4o-mini").with_retry(RetryPolicy {
        enabled: true,
        backoff_ms: 1,
    })
}

#[tokio::test]
async fn test_generate_sends_history_and_appends_reply() -> anyhow::Result<()> {
    let mock = MockApi::new(StatusCode::OK, completion("Once upon a time..."));
    let base_url = spawn_mock(mock.clone()).await;
    let client = OpenAiClient::with_api_key(
        config(base_url)
            .with_system_prompt(Some("You are a skilled storyteller.".to_string()))
            .with_max_tokens(Some(300)),
        Some("sk-test".to_string()),
    )?;

    let mut history = vec![Message::user("hi"), Message::assistant("hello")];
    let story = client.generate("Tell me a story about a dragon", &mut history).await?;

    assert_eq!(story, "Once upon a time...");
    assert_eq!(history.len(), 4);
    assert_eq!(history[2], Message::user("Tell me a story about a dragon"));
    assert_eq!(history[3].role, Role::Assistant);
    assert_eq!(history[3].content, "Once upon a time...");

    let requests = mock.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["max_tokens"], 300);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["content"], "hi");
    assert_eq!(messages[3]["role"], "user");
    assert_eq!(messages[3]["content"], "Tell me a story about a dragon");
    Ok(())
}

#[tokio::test]
async fn test_missing_credential_fails_before_network() -> anyhow::Result<()> {
    let mock = MockApi::new(StatusCode::OK, completion("unused"));
    let base_url = spawn_mock(mock.clone()).await;
    let client = OpenAiClient::with_api_key(config(base_url), None)?;
    assert!(!client.has_credential());

    let mut history = Vec::new();
    let err = client.generate("dragon", &mut history).await.unwrap_err();

    assert_eq!(
        err.kind,
        GenerationErrorKind::MissingCredential("OPENAI_API_KEY".to_string())
    );
    assert!(history.is_empty());
    assert_eq!(mock.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() -> anyhow::Result<()> {
    let mock = MockApi::new(
        StatusCode::UNAUTHORIZED,
        json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}),
    );
    let base_url = spawn_mock(mock.clone()).await;
    let client = OpenAiClient::with_api_key(config(base_url), Some("bad".to_string()))?;

    let err = client.generate("dragon", &mut Vec::new()).await.unwrap_err();

    assert_eq!(
        err.kind,
        GenerationErrorKind::Api {
            status_code: 401,
            message: "Incorrect API key provided".to_string(),
        }
    );
    assert_eq!(mock.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_server_error_is_retried_once() -> anyhow::Result<()> {
    let mock = MockApi::new(StatusCode::SERVICE_UNAVAILABLE, json!({}));
    let base_url = spawn_mock(mock.clone()).await;
    let client = OpenAiClient::with_api_key(config(base_url), Some("sk".to_string()))?;

    let err = client.generate("dragon", &mut Vec::new()).await.unwrap_err();

    assert!(matches!(
        err.kind,
        GenerationErrorKind::Api {
            status_code: 503,
            ..
        }
    ));
    assert_eq!(mock.calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_reported_as_typed_failure() -> anyhow::Result<()> {
    let mut mock = MockApi::new(StatusCode::OK, completion("too late"));
    mock.delay = Duration::from_secs(2);
    let base_url = spawn_mock(mock.clone()).await;
    let client = OpenAiClient::with_api_key(
        config(base_url)
            .with_timeout_ms(200)
            .with_retry(RetryPolicy::disabled()),
        Some("sk".to_string()),
    )?;

    let mut history = Vec::new();
    let err = client.generate("dragon", &mut history).await.unwrap_err();

    assert_eq!(err.kind, GenerationErrorKind::Timeout(200));
    assert!(history.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_blank_completion_leaves_history_untouched() -> anyhow::Result<()> {
    let mock = MockApi::new(StatusCode::OK, completion("   "));
    let base_url = spawn_mock(mock).await;
    let client = OpenAiClient::with_api_key(config(base_url), Some("sk".to_string()))?;

    let mut history = vec![Message::user("earlier")];
    let err = client.generate("dragon", &mut history).await.unwrap_err();

    assert_eq!(err.kind, GenerationErrorKind::EmptyCompletion);
    assert_eq!(history, vec![Message::user("earlier")]);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_failure() -> anyhow::Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = OpenAiClient::with_api_key(
        config(format!("http://{}/v1", addr)).with_retry(RetryPolicy::disabled()),
        Some("sk".to_string()),
    )?;

    let err = client.generate("dragon", &mut Vec::new()).await.unwrap_err();
    assert!(matches!(
        err.kind,
        GenerationErrorKind::Connect(_) | GenerationErrorKind::Http(_)
    ));
    Ok(())
}
