//! User-facing fallback sentences.

use serde::{Deserialize, Serialize};

/// Fixed sentences sent instead of an answer.
///
/// Raw error text never reaches the caller; one of these does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackMessages {
    /// The request carried nothing to search or generate from
    #[serde(default = "default_clarification")]
    pub clarification: String,
    /// The search succeeded with no usable match
    #[serde(default = "default_nothing_found")]
    pub nothing_found: String,
    /// The vector database could not be reached or answered with an error
    #[serde(default = "default_unavailable")]
    pub unavailable: String,
    /// The language model could not produce a reply
    #[serde(default = "default_generation_failed")]
    pub generation_failed: String,
    /// Anything else, including a panic in the pipeline
    #[serde(default = "default_internal")]
    pub internal: String,
}

fn default_clarification() -> String {
    "It seems the details for the story were unclear. Let's try again!".to_string()
}

fn default_nothing_found() -> String {
    "I searched the archives, but couldn't find anything matching that specific combination."
        .to_string()
}

fn default_unavailable() -> String {
    "Sorry, the story database is currently unavailable.".to_string()
}

fn default_generation_failed() -> String {
    "Sorry, I couldn't come up with a story right now.".to_string()
}

fn default_internal() -> String {
    "Something went wrong while I was searching for stories. I've noted the issue.".to_string()
}

impl Default for FallbackMessages {
    fn default() -> Self {
        Self {
            clarification: default_clarification(),
            nothing_found: default_nothing_found(),
            unavailable: default_unavailable(),
            generation_failed: default_generation_failed(),
            internal: default_internal(),
        }
    }
}

impl FallbackMessages {
    /// These messages with every set override applied.
    ///
    /// ```
    /// use storyteller_webhook::{FallbackMessages, FallbackOverrides};
    ///
    /// let overrides = FallbackOverrides {
    ///     generation_failed: Some("Error: unable to generate story.".to_string()),
    ///     ..Default::default()
    /// };
    /// let merged = FallbackMessages::default().merged(&overrides);
    /// assert_eq!(merged.generation_failed, "Error: unable to generate story.");
    /// assert_eq!(merged.unavailable, FallbackMessages::default().unavailable);
    /// ```
    pub fn merged(&self, overrides: &FallbackOverrides) -> Self {
        let pick = |over: &Option<String>, base: &String| {
            over.clone().unwrap_or_else(|| base.clone())
        };
        Self {
            clarification: pick(&overrides.clarification, &self.clarification),
            nothing_found: pick(&overrides.nothing_found, &self.nothing_found),
            unavailable: pick(&overrides.unavailable, &self.unavailable),
            generation_failed: pick(&overrides.generation_failed, &self.generation_failed),
            internal: pick(&overrides.internal, &self.internal),
        }
    }
}

/// Per-endpoint replacements for [`FallbackMessages`]. Unset entries keep the global sentence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FallbackOverrides {
    /// Replaces [`FallbackMessages::clarification`]
    #[serde(default)]
    pub clarification: Option<String>,
    /// Replaces [`FallbackMessages::nothing_found`]
    #[serde(default)]
    pub nothing_found: Option<String>,
    /// Replaces [`FallbackMessages::unavailable`]
    #[serde(default)]
    pub unavailable: Option<String>,
    /// Replaces [`FallbackMessages::generation_failed`]
    #[serde(default)]
    pub generation_failed: Option<String>,
    /// Replaces [`FallbackMessages::internal`]
    #[serde(default)]
    pub internal: Option<String>,
}
