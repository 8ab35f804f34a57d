//! `storyteller generate`

use storyteller::{StorytellerConfig, openai_client};
use storyteller_error::StorytellerResult;
use storyteller_interface::StoryGenerator;

/// Print one generated story.
pub async fn generate_story(config: &StorytellerConfig, prompt: &str) -> StorytellerResult<()> {
    let client = openai_client(config)?;
    let mut history = Vec::new();
    let story = client.generate(prompt, &mut history).await?;
    println!("{}", story);
    Ok(())
}
