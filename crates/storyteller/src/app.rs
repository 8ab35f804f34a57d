//! Wiring configuration to adapters and the webhook.

use crate::StorytellerConfig;
use std::sync::Arc;
use storyteller_chroma::ChromaClient;
use storyteller_error::StorytellerResult;
use storyteller_openai::OpenAiClient;
use storyteller_webhook::Webhook;
use tracing::info;

/// Build the Chroma client described by `config`.
///
/// # Errors
///
/// Returns error if the HTTP client cannot be initialized.
pub fn chroma_client(config: &StorytellerConfig) -> StorytellerResult<ChromaClient> {
    Ok(ChromaClient::new(config.chroma().clone())?)
}

/// Build the chat-completion client described by `config`.
///
/// A missing API key is logged, not fatal: generation endpoints then answer
/// with their failure sentence.
///
/// # Errors
///
/// Returns error if the HTTP client cannot be initialized.
pub fn openai_client(config: &StorytellerConfig) -> StorytellerResult<OpenAiClient> {
    Ok(OpenAiClient::new(config.openai().clone())?)
}

/// Build every configured endpoint over one shared retriever and generator.
///
/// No network request is made; the database is contacted on first search.
///
/// # Errors
///
/// Returns error if a client cannot be initialized.
pub fn build_webhook(config: &StorytellerConfig) -> StorytellerResult<Webhook> {
    let retriever = Arc::new(chroma_client(config)?);
    let generator = Arc::new(openai_client(config)?);
    info!(
        chroma = %config.chroma().base_url(),
        collection = %config.chroma().collection,
        model = %config.openai().model,
        credential = generator.has_credential(),
        "Adapters ready"
    );

    Ok(Webhook::new(
        config.endpoints(),
        config.messages(),
        retriever,
        generator,
    ))
}
