//! Storyteller CLI binary.
//!
//! - Serve the webhook endpoints
//! - Search the story collection or generate a story from the terminal
//! - Inspect the collections on the Chroma server

use clap::Parser;
use storyteller::{LoggingConfig, StorytellerConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, generate_story, list_collections, search_stories, serve_webhook};

    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    init_logging(
        &LoggingConfig::default()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )?;

    let config = StorytellerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => {
            serve_webhook(&config, host, port).await?;
        }

        Commands::Search { query, limit } => {
            search_stories(&config, &query, limit).await?;
        }

        Commands::Generate { prompt } => {
            generate_story(&config, &prompt).await?;
        }

        Commands::Collections { max_titles, peek } => {
            list_collections(&config, max_titles, peek).await?;
        }
    }

    Ok(())
}
