//! Field extraction from loosely typed webhook payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// A field to pull out of the payload.
///
/// `path` is dotted (`sessionInfo.parameters.theme`); numeric segments index
/// into arrays (`messages.0.text`).
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use storyteller_webhook::FieldSpec;
///
/// let spec = FieldSpec::new("sessionInfo.parameters.username").with_default("Adventurer");
/// assert_eq!(spec.name(), "username");
///
/// let payload = json!({"sessionInfo": {"parameters": {}}});
/// assert_eq!(spec.extract(&payload), "Adventurer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Dotted lookup path
    pub path: String,
    /// Placeholder name in prompt templates, defaults to the last path segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Value used when the field is missing, not a string, or blank
    #[serde(default)]
    pub default: String,
}

impl FieldSpec {
    /// Field at `path` with an empty default.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            default: String::new(),
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Set the template name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Template name of this field.
    pub fn name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => self.path.rsplit('.').next().unwrap_or(&self.path),
        }
    }

    /// Value at the path, trimmed, or the default.
    pub fn extract(&self, payload: &Value) -> String {
        match lookup(payload, &self.path).and_then(Value::as_str).map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => self.default.trim().to_string(),
        }
    }
}

fn lookup<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(payload, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// One extracted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedField {
    /// Template name
    pub name: String,
    /// Extracted or default value, possibly empty
    pub value: String,
}

/// Turns a payload into a query string.
///
/// Never fails: a payload missing every field yields an empty query, which
/// callers answer with a clarification request.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use storyteller_webhook::{FieldSpec, RequestNormalizer};
///
/// let normalizer = RequestNormalizer::new(vec![
///     FieldSpec::new("protagonist"),
///     FieldSpec::new("theme"),
///     FieldSpec::new("moral"),
/// ]);
/// let payload = json!({"protagonist": "A", "theme": "B", "moral": "C"});
/// assert_eq!(normalizer.normalize(&payload), "A B C");
/// assert_eq!(normalizer.normalize(&json!(null)), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestNormalizer {
    fields: Vec<FieldSpec>,
}

impl RequestNormalizer {
    /// Normalizer over the given fields, in order.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Configured fields.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Every configured field with its value.
    pub fn extract(&self, payload: &Value) -> Vec<ExtractedField> {
        self.fields
            .iter()
            .map(|spec| {
                let value = spec.extract(payload);
                trace!(path = %spec.path, value = %value, "Extracted field");
                ExtractedField {
                    name: spec.name().to_string(),
                    value,
                }
            })
            .collect()
    }

    /// Non-empty field values joined with single spaces.
    pub fn normalize(&self, payload: &Value) -> String {
        join_fields(&self.extract(payload))
    }
}

/// Join non-empty values with single spaces.
pub fn join_fields(fields: &[ExtractedField]) -> String {
    fields
        .iter()
        .map(|field| field.value.as_str())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
