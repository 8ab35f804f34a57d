//! Webhook pipeline for the Storyteller service.
//!
//! Every request runs the same linear pipeline:
//!
//! 1. [`RequestNormalizer`] pulls configured fields out of the JSON payload
//!    and joins them into a query string.
//! 2. The endpoint calls the injected [`StoryRetriever`] and/or
//!    [`StoryGenerator`] depending on its [`EndpointMode`].
//! 3. A [`ResponseFormatter`] wraps the answer, or a fixed fallback sentence,
//!    in the envelope the calling platform expects.
//!
//! Handlers always answer with status 200. Failures are reported inside the
//! envelope and their detail is only logged.
//!
//! [`StoryRetriever`]: storyteller_interface::StoryRetriever
//! [`StoryGenerator`]: storyteller_interface::StoryGenerator

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod endpoint;
mod envelope;
mod messages;
mod metrics;
mod normalize;
mod outcome;
mod router;
mod server;
mod template;

pub use endpoint::{Endpoint, EndpointConfig, EndpointMode, validate_endpoints};
pub use envelope::{EnvelopeFormat, FulfillmentFormatter, KeyValueFormatter, ResponseFormatter};
pub use messages::{FallbackMessages, FallbackOverrides};
pub use metrics::{MetricsSnapshot, WebhookMetrics};
pub use normalize::{ExtractedField, FieldSpec, RequestNormalizer, join_fields};
pub use outcome::Outcome;
pub use router::{ApiState, Webhook};
pub use server::{serve, shutdown_signal};
pub use template::render;
