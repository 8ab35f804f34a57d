//! Command-line interface module.

mod collections;
mod commands;
mod generate;
mod search;
mod serve;

pub use collections::list_collections;
pub use commands::{Cli, Commands};
pub use generate::generate_story;
pub use search::search_stories;
pub use serve::serve_webhook;
