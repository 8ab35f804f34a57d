//! `storyteller search`

use storyteller::{StorytellerConfig, chroma_client};
use storyteller_core::SNIPPET_CHARS;
use storyteller_error::StorytellerResult;
use storyteller_interface::StoryRetriever;

/// Print the stories nearest to `query`.
pub async fn search_stories(
    config: &StorytellerConfig,
    query: &str,
    limit: usize,
) -> StorytellerResult<()> {
    let client = chroma_client(config)?;
    let stories = client.search(query, limit).await?;

    if stories.is_empty() {
        println!("No stories found in '{}'.", client.collection_name());
        return Ok(());
    }

    for (i, story) in stories.iter().enumerate() {
        match story.distance() {
            Some(distance) => println!("{}. {} (distance {:.3})", i + 1, story.title(), distance),
            None => println!("{}. {}", i + 1, story.title()),
        }
        for key in ["author", "year", "genre"] {
            if let Some(value) = story.metadata_str(key) {
                println!("   {}: {}", key, value);
            }
        }
        println!("   {}", story.snippet(SNIPPET_CHARS).trim());
        println!();
    }
    Ok(())
}
