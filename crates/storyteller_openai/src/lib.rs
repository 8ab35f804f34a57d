//! OpenAI-compatible chat-completion adapter for Storyteller.
//!
//! Implements [`StoryGenerator`](storyteller_interface::StoryGenerator) on top
//! of the `/chat/completions` endpoint shared by OpenAI and compatible
//! servers.
//!
//! # Example
//!
//! ```rust,no_run
//! use storyteller_core::Message;
//! use storyteller_interface::StoryGenerator;
//! use storyteller_openai::{OpenAiClient, OpenAiConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads the key from OPENAI_API_KEY
//!     let client = OpenAiClient::new(OpenAiConfig::default())?;
//!
//!     let mut history = vec![Message::system("You are a skilled storyteller.")];
//!     let story = client.generate("Tell me a story about a dragon", &mut history).await?;
//!     println!("{story}");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod request;
mod response;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
pub use request::{ChatCompletionRequest, ChatCompletionRequestBuilder};
pub use response::{ApiErrorBody, ApiErrorDetail, ChatCompletionResponse, Choice, ChoiceMessage, Usage};
