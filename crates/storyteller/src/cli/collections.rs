//! `storyteller collections`

use storyteller::{StorytellerConfig, chroma_client};
use storyteller_error::StorytellerResult;
use tracing::info;

/// Print every collection with its record count and sample titles.
pub async fn list_collections(
    config: &StorytellerConfig,
    max_titles: usize,
    peek: usize,
) -> StorytellerResult<()> {
    let client = chroma_client(config)?;
    client.heartbeat().await?;
    info!(server = %config.chroma().base_url(), "Connected to Chroma");

    let collections = client.list_collections().await?;
    if collections.is_empty() {
        println!("No collections.");
        return Ok(());
    }

    for info in &collections {
        let summary = client.summarize_collection(info, max_titles, peek).await?;
        println!("{} ({} records)", summary.name(), summary.count());
        for title in summary.titles() {
            println!("  - {}", title);
        }
    }
    Ok(())
}
