//! Response envelopes expected by conversational platforms.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt::Debug;

/// Wraps an answer in the JSON shape a platform expects.
pub trait ResponseFormatter: Debug + Send + Sync {
    /// Build the response body for `message`.
    fn format(&self, message: &str) -> Value;
}

/// Dialogflow CX fulfillment shape.
///
/// ```
/// use serde_json::json;
/// use storyteller_webhook::{FulfillmentFormatter, ResponseFormatter};
///
/// assert_eq!(
///     FulfillmentFormatter.format("Hello"),
///     json!({"fulfillment_response": {"messages": [{"text": {"text": ["Hello"]}}]}})
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FulfillmentFormatter;

impl ResponseFormatter for FulfillmentFormatter {
    fn format(&self, message: &str) -> Value {
        json!({
            "fulfillment_response": {
                "messages": [{"text": {"text": [message]}}]
            }
        })
    }
}

/// Single key object, e.g. `{"story": "..."}` or `{"fulfillmentText": "..."}`.
#[derive(Debug, Clone)]
pub struct KeyValueFormatter {
    key: String,
}

impl KeyValueFormatter {
    /// Formatter writing the message under `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Key the message is written under.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl ResponseFormatter for KeyValueFormatter {
    fn format(&self, message: &str) -> Value {
        let mut body = serde_json::Map::new();
        body.insert(self.key.clone(), Value::String(message.to_string()));
        Value::Object(body)
    }
}

/// Envelope selection in endpoint configuration.
///
/// ```toml
/// envelope = { kind = "key_value", key = "story_snippet" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnvelopeFormat {
    /// `fulfillment_response.messages[0].text.text[0]`
    #[default]
    Fulfillment,
    /// `{"<key>": message}`
    KeyValue {
        /// Response key
        key: String,
    },
}

impl EnvelopeFormat {
    /// Formatter for this envelope.
    pub fn formatter(&self) -> Box<dyn ResponseFormatter> {
        match self {
            Self::Fulfillment => Box::new(FulfillmentFormatter),
            Self::KeyValue { key } => Box::new(KeyValueFormatter::new(key.clone())),
        }
    }
}
