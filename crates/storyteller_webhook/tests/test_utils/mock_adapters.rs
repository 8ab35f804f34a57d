//! Mock retriever and generator for pipeline tests.

use async_trait::async_trait;
use serde_json::{Map, json};
use std::sync::{Arc, Mutex};
use storyteller_core::{Message, StoryDocument};
use storyteller_error::{
    GenerationError, GenerationErrorKind, GenerationResult, RetrievalError, RetrievalErrorKind,
    RetrievalResult,
};
use storyteller_interface::{StoryGenerator, StoryRetriever};

/// Story with a title and body.
pub fn story(title: &str, text: &str) -> StoryDocument {
    let mut metadata = Map::new();
    metadata.insert("title".to_string(), json!(title));
    StoryDocument::new(None, text, metadata, None)
}

/// What the mock retriever answers.
#[derive(Debug, Clone)]
pub enum RetrieverBehavior {
    /// Always return these stories
    Stories(Vec<StoryDocument>),
    /// Always fail
    Error(RetrievalErrorKind),
    /// Panic inside the call
    Panic,
}

/// Mock retriever recording every call.
#[derive(Debug, Clone)]
pub struct MockRetriever {
    behavior: RetrieverBehavior,
    calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockRetriever {
    pub fn new(behavior: RetrieverBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_stories(stories: Vec<StoryDocument>) -> Self {
        Self::new(RetrieverBehavior::Stories(stories))
    }

    pub fn failing(kind: RetrievalErrorKind) -> Self {
        Self::new(RetrieverBehavior::Error(kind))
    }

    /// Number of searches made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// `(query, limit)` of every search.
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryRetriever for MockRetriever {
    async fn search(&self, query: &str, limit: usize) -> RetrievalResult<Vec<StoryDocument>> {
        self.calls.lock().unwrap().push((query.to_string(), limit));
        match &self.behavior {
            RetrieverBehavior::Stories(stories) => Ok(stories.clone()),
            RetrieverBehavior::Error(kind) => Err(RetrievalError::new(kind.clone())),
            RetrieverBehavior::Panic => panic!("mock retriever panicked"),
        }
    }

    fn collection_name(&self) -> &str {
        "mock_stories"
    }
}

/// What the mock generator answers.
#[derive(Debug, Clone)]
pub enum GeneratorBehavior {
    /// Always reply with this text
    Reply(String),
    /// Reply with the prompt prefixed by "Story: "
    Echo,
    /// Always fail
    Error(GenerationErrorKind),
}

/// Mock generator recording every prompt.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    behavior: GeneratorBehavior,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    pub fn new(behavior: GeneratorBehavior) -> Self {
        Self {
            behavior,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(GeneratorBehavior::Reply(text.into()))
    }

    pub fn echo() -> Self {
        Self::new(GeneratorBehavior::Echo)
    }

    pub fn failing(kind: GenerationErrorKind) -> Self {
        Self::new(GeneratorBehavior::Error(kind))
    }

    /// Number of generations requested.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryGenerator for MockGenerator {
    async fn generate(
        &self,
        prompt: &str,
        history: &mut Vec<Message>,
    ) -> GenerationResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = match &self.behavior {
            GeneratorBehavior::Reply(text) => text.clone(),
            GeneratorBehavior::Echo => format!("Story: {}", prompt),
            GeneratorBehavior::Error(kind) => return Err(GenerationError::new(kind.clone())),
        };
        history.push(Message::user(prompt));
        history.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
