use crate::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    OpenAiConfig,
};
use async_trait::async_trait;
use storyteller_core::Message;
use storyteller_error::{GenerationError, GenerationErrorKind, GenerationResult};
use storyteller_interface::StoryGenerator;
use tracing::instrument;

/// Client for an OpenAI-compatible chat-completion API
///
/// A missing credential does not prevent construction; every request then
/// fails with [`GenerationErrorKind::MissingCredential`] before touching the
/// network.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client, reading the API key from `config.api_key_env`
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip(config), fields(base_url = %config.base_url, model = %config.model))]
    pub fn new(config: OpenAiConfig) -> GenerationResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!(
                api_key_env = %config.api_key_env,
                "No API key found, generation requests will fail"
            );
        }
        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit API key
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(base_url = %config.base_url, model = %config.model))]
    pub fn with_api_key(config: OpenAiConfig, api_key: Option<String>) -> GenerationResult<Self> {
        tracing::debug!("Creating chat completion client");
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Http(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Whether an API key is available
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Assemble the outbound request: system prompt, history, then the new prompt
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be built.
    pub fn build_request(
        &self,
        prompt: &str,
        history: &[Message],
    ) -> GenerationResult<ChatCompletionRequest> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        if let Some(system) = &self.config.system_prompt {
            messages.push(Message::system(system.clone()));
        }
        messages.extend(history.iter().cloned());
        messages.push(Message::user(prompt));

        ChatCompletionRequestBuilder::default()
            .model(self.config.model.clone())
            .messages(messages)
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Builder(format!(
                    "Failed to build request: {}",
                    e
                )))
            })
    }

    /// Send a chat completion request
    #[instrument(skip(self, request), fields(model = %request.model, messages = request.messages.len()))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> GenerationResult<ChatCompletionResponse> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::MissingCredential(
                self.config.api_key_env.clone(),
            ))
        })?;

        let url = self.config.completions_url();
        tracing::debug!("Sending chat completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|parsed| parsed.error.message)
                .unwrap_or(body);
            tracing::error!(status = %status, "Chat completion API returned error");
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status_code: status.as_u16(),
                message,
            }));
        }

        let result = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            GenerationError::new(GenerationErrorKind::Deserialization(e.to_string()))
        })?;

        tracing::debug!("Chat completion successful");
        Ok(result)
    }

    fn transport_error(&self, e: reqwest::Error) -> GenerationError {
        tracing::error!("Request failed: {}", e);
        let kind = if e.is_timeout() {
            GenerationErrorKind::Timeout(self.config.timeout_ms)
        } else if e.is_connect() {
            GenerationErrorKind::Connect(e.to_string())
        } else {
            GenerationErrorKind::Http(e.to_string())
        };
        GenerationError::new(kind)
    }
}

#[async_trait]
impl StoryGenerator for OpenAiClient {
    #[instrument(skip(self, prompt, history), fields(model = %self.config.model, history = history.len()))]
    async fn generate(
        &self,
        prompt: &str,
        history: &mut Vec<Message>,
    ) -> GenerationResult<String> {
        let request = self.build_request(prompt, history)?;

        let response = self
            .config
            .retry
            .execute(|| self.chat_completion(&request))
            .await?;

        let reply = response
            .first_text()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyCompletion))?
            .to_string();

        history.push(Message::user(prompt));
        history.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
