//! Story search and generation webhook for conversational agents.
//!
//! This crate ties the Storyteller pieces together: layered configuration,
//! the Chroma retriever, the OpenAI generator and the webhook routes.
//!
//! # Example
//!
//! ```no_run
//! use storyteller::{StorytellerConfig, build_webhook};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorytellerConfig::load(None)?;
//! let webhook = build_webhook(&config)?;
//! storyteller_webhook::serve(config.server().addr()?, webhook.router()).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod observability;

pub use app::{build_webhook, chroma_client, openai_client};
pub use config::{ServerConfig, StorytellerConfig};
pub use observability::{LoggingConfig, init_logging};
