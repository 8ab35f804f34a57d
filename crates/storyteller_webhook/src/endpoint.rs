//! One configured webhook route and its pipeline.

use crate::{
    EnvelopeFormat, ExtractedField, FallbackMessages, FallbackOverrides, FieldSpec, Outcome,
    RequestNormalizer, ResponseFormatter, WebhookMetrics, join_fields, render,
};
use derive_getters::Getters;
use derive_setters::Setters;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use storyteller_core::{StoryDocument, truncate_chars};
use storyteller_error::ConfigError;
use storyteller_interface::{DEFAULT_SEARCH_LIMIT, StoryGenerator, StoryRetriever};
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// Story text passed to the summary prompt is cut to this many characters.
const SUMMARY_SOURCE_CHARS: usize = 500;

/// What an endpoint does with the normalized query.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EndpointMode {
    /// Similarity search, answering with the matching documents
    #[default]
    Search,
    /// Render the prompt template and answer with the model reply
    Generate,
    /// Summarize the nearest story, or write a new one when nothing matches
    Recommend,
}

/// Configuration of one webhook route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
pub struct EndpointConfig {
    /// Route path, starting with `/`
    pub path: String,
    /// Pipeline to run
    #[serde(default)]
    pub mode: EndpointMode,
    /// Payload fields making up the query
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    /// Response envelope, used for answers and fallbacks alike
    #[serde(default)]
    pub envelope: EnvelopeFormat,
    /// Number of documents requested from the retriever
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Text placed before the joined documents
    #[serde(default)]
    pub prefix: String,
    /// Text placed between documents
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Generation prompt; `{query}` and every field name are substituted
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Summary prompt for recommendations; `{title}`, `{text}` and `{query}`
    #[serde(default = "default_summary_prompt")]
    pub summary_prompt: String,
    /// Recommendation answer; `{title}` and `{summary}`
    #[serde(default = "default_presentation")]
    pub presentation: String,
    /// Sentences replacing the global fallbacks on this route
    #[serde(default)]
    pub messages: FallbackOverrides,
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_separator() -> String {
    "\n\n".to_string()
}

fn default_prompt() -> String {
    "{query}".to_string()
}

fn default_summary_prompt() -> String {
    "Summarize this story in 1-2 sentences: {text}".to_string()
}

fn default_presentation() -> String {
    "I have a story called '{title}'. Here's a brief summary: {summary}".to_string()
}

impl EndpointConfig {
    /// Route at `path` with default settings.
    pub fn new(path: impl Into<String>, mode: EndpointMode) -> Self {
        Self {
            path: path.into(),
            mode,
            fields: Vec::new(),
            envelope: EnvelopeFormat::default(),
            limit: default_limit(),
            prefix: String::new(),
            separator: default_separator(),
            prompt: default_prompt(),
            summary_prompt: default_summary_prompt(),
            presentation: default_presentation(),
            messages: FallbackOverrides::default(),
        }
    }

    /// Check settings that cannot be expressed in the type.
    ///
    /// # Errors
    ///
    /// Returns error if the path does not start with `/`, the limit is zero,
    /// or the endpoint has no fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::new(format!(
                "Endpoint path '{}' must start with '/'",
                self.path
            )));
        }
        if self.limit == 0 {
            return Err(ConfigError::new(format!(
                "Endpoint {} has limit 0",
                self.path
            )));
        }
        if self.fields.is_empty() {
            return Err(ConfigError::new(format!(
                "Endpoint {} has no fields",
                self.path
            )));
        }
        Ok(())
    }
}

/// Validate every endpoint and reject duplicate paths.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate_endpoints(endpoints: &[EndpointConfig]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for endpoint in endpoints {
        endpoint.validate()?;
        if !seen.insert(endpoint.path.as_str()) {
            return Err(ConfigError::new(format!(
                "Duplicate endpoint path {}",
                endpoint.path
            )));
        }
    }
    Ok(())
}

/// A configured route bound to its adapters.
#[derive(Getters)]
pub struct Endpoint {
    /// Route configuration
    config: EndpointConfig,
    #[getter(skip)]
    normalizer: RequestNormalizer,
    #[getter(skip)]
    formatter: Box<dyn ResponseFormatter>,
    /// Fallback sentences with this route's overrides applied
    messages: FallbackMessages,
    #[getter(skip)]
    retriever: Arc<dyn StoryRetriever>,
    #[getter(skip)]
    generator: Arc<dyn StoryGenerator>,
    #[getter(skip)]
    metrics: WebhookMetrics,
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("path", &self.config.path)
            .field("mode", &self.config.mode)
            .field("formatter", &self.formatter)
            .field("collection", &self.retriever.collection_name())
            .field("model", &self.generator.model_name())
            .finish()
    }
}

impl Endpoint {
    /// Bind `config` to the shared adapters.
    pub fn new(
        config: EndpointConfig,
        defaults: &FallbackMessages,
        retriever: Arc<dyn StoryRetriever>,
        generator: Arc<dyn StoryGenerator>,
        metrics: WebhookMetrics,
    ) -> Self {
        Self {
            normalizer: RequestNormalizer::new(config.fields.clone()),
            formatter: config.envelope.formatter(),
            messages: defaults.merged(&config.messages),
            config,
            retriever,
            generator,
            metrics,
        }
    }

    /// Route path.
    pub fn path(&self) -> &str {
        &self.config.path
    }

    /// Answer one request. Always returns an envelope.
    pub async fn handle(&self, payload: &Value) -> Value {
        let span = info_span!(
            "webhook",
            request_id = %Uuid::new_v4(),
            path = %self.config.path,
            mode = %self.config.mode
        );

        async {
            let outcome = match AssertUnwindSafe(self.run(payload)).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(_) => {
                    error!("Request pipeline panicked");
                    Outcome::Internal
                }
            };
            self.metrics.record(&outcome);
            info!(outcome = outcome.as_ref(), "Responded");
            self.formatter.format(outcome.message(&self.messages))
        }
        .instrument(span)
        .await
    }

    /// Run the pipeline for `payload` without formatting the result.
    pub async fn run(&self, payload: &Value) -> Outcome {
        let fields = self.normalizer.extract(payload);
        let query = join_fields(&fields);
        if query.is_empty() {
            debug!("Empty query, asking for clarification");
            return Outcome::Clarify;
        }
        debug!(query = %query, "Normalized request");

        match self.config.mode {
            EndpointMode::Search => self.search(&query).await,
            EndpointMode::Generate => self.generate(&query, &fields).await,
            EndpointMode::Recommend => self.recommend(&query, &fields).await,
        }
    }

    async fn search(&self, query: &str) -> Outcome {
        match self.retriever.search(query, self.config.limit).await {
            Ok(stories) => self.render_documents(&stories),
            Err(e) => {
                error!(error = %e, collection = self.retriever.collection_name(), "Retrieval failed");
                Outcome::Unavailable
            }
        }
    }

    fn render_documents(&self, stories: &[StoryDocument]) -> Outcome {
        let texts: Vec<&str> = stories
            .iter()
            .filter(|story| !story.is_blank())
            .take(self.config.limit)
            .map(|story| story.text().trim())
            .collect();

        if texts.is_empty() {
            info!(returned = stories.len(), "No usable documents");
            return Outcome::NothingFound;
        }
        Outcome::Answered(format!(
            "{}{}",
            self.config.prefix,
            texts.join(&self.config.separator)
        ))
    }

    async fn generate(&self, query: &str, fields: &[ExtractedField]) -> Outcome {
        let prompt = render(&self.config.prompt, &template_values(query, fields));
        self.complete(&prompt).await
    }

    async fn recommend(&self, query: &str, fields: &[ExtractedField]) -> Outcome {
        let stories = match self.retriever.search(query, self.config.limit).await {
            Ok(stories) => stories,
            Err(e) => {
                error!(error = %e, collection = self.retriever.collection_name(), "Retrieval failed");
                return Outcome::Unavailable;
            }
        };

        let Some(nearest) = stories.iter().find(|story| !story.is_blank()) else {
            info!("No stored story matches, writing a new one");
            return self.generate(query, fields).await;
        };

        let mut values = template_values(query, fields);
        values.insert("title", nearest.title());
        values.insert("text", truncate_chars(nearest.text(), SUMMARY_SOURCE_CHARS));
        let summary_prompt = render(&self.config.summary_prompt, &values);

        match self.complete(&summary_prompt).await {
            Outcome::Answered(summary) => {
                let presentation = HashMap::from([
                    ("query", query),
                    ("title", nearest.title().as_str()),
                    ("summary", summary.as_str()),
                ]);
                Outcome::Answered(render(&self.config.presentation, &presentation))
            }
            other => other,
        }
    }

    async fn complete(&self, prompt: &str) -> Outcome {
        let mut history = Vec::new();
        match self.generator.generate(prompt, &mut history).await {
            Ok(reply) if !reply.trim().is_empty() => Outcome::Answered(reply.trim().to_string()),
            Ok(_) => {
                warn!(model = self.generator.model_name(), "Model returned a blank reply");
                Outcome::GenerationFailed
            }
            Err(e) => {
                error!(error = %e, model = self.generator.model_name(), "Generation failed");
                Outcome::GenerationFailed
            }
        }
    }
}

fn template_values<'a>(query: &'a str, fields: &'a [ExtractedField]) -> HashMap<&'a str, &'a str> {
    let mut values: HashMap<&str, &str> = fields
        .iter()
        .map(|field| (field.name.as_str(), field.value.as_str()))
        .collect();
    values.insert("query", query);
    values
}
