//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storyteller - story search and generation webhook for conversational agents
#[derive(Parser, Debug)]
#[command(name = "storyteller")]
#[command(about = "Story search and generation webhook for conversational agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file replacing ./storyteller.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the webhook server
    Serve {
        /// Interface to bind, overriding [server] host
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding [server] port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Search the story collection once
    Search {
        /// Text to search for
        query: String,

        /// Maximum number of stories
        #[arg(long, default_value = "3")]
        limit: usize,
    },

    /// Generate one story
    Generate {
        /// Prompt sent to the model
        prompt: String,
    },

    /// List collections with their size and sample titles
    Collections {
        /// Maximum number of titles per collection
        #[arg(long, default_value = "25")]
        max_titles: usize,

        /// Number of records inspected for titles
        #[arg(long, default_value = "5000")]
        peek: usize,
    },
}
