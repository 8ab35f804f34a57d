//! Layered configuration for the Storyteller service.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from storyteller.toml)
//! - `~/.config/storyteller/storyteller.toml` and `./storyteller.toml`, or the
//!   file given with `--config`
//! - `STORYTELLER__SECTION__KEY` environment variables
//! - `CHROMA_HOST`, `CHROMA_PORT`, `COLLECTION_NAME` and `PORT`

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use storyteller_chroma::ChromaConfig;
use storyteller_error::{ConfigError, StorytellerResult};
use storyteller_openai::OpenAiConfig;
use storyteller_webhook::{EndpointConfig, FallbackMessages, validate_endpoints};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../storyteller.toml");

/// Legacy variables and the keys they set.
const LEGACY_VARIABLES: [(&str, &str); 4] = [
    ("CHROMA_HOST", "chroma.host"),
    ("CHROMA_PORT", "chroma.port"),
    ("COLLECTION_NAME", "chroma.collection"),
    ("PORT", "server.port"),
];

/// Listen address of the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns error if `host` is not an IP address.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Invalid listen address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }
}

/// Complete service configuration.
///
/// # Example
///
/// ```no_run
/// use storyteller::StorytellerConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StorytellerConfig::load(None)?;
/// println!("{} endpoints", config.endpoints().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct StorytellerConfig {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    chroma: ChromaConfig,
    #[serde(default)]
    openai: OpenAiConfig,
    #[serde(default)]
    messages: FallbackMessages,
    #[serde(default)]
    endpoints: Vec<EndpointConfig>,
}

impl StorytellerConfig {
    /// Load from every source, reading the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a source cannot be read or parsed, or validation fails.
    pub fn load(path: Option<&Path>) -> StorytellerResult<Self> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Load from every source with an explicit environment.
    ///
    /// # Errors
    ///
    /// Returns error if a source cannot be read or parsed, or validation fails.
    #[instrument(skip(env), fields(path = ?path.map(Path::display)))]
    pub fn load_with_env(
        path: Option<&Path>,
        env: HashMap<String, String>,
    ) -> StorytellerResult<Self> {
        let mut builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        builder = add_user_files(builder, path);

        builder = builder.add_source(
            Environment::with_prefix("STORYTELLER")
                .separator("__")
                .source(Some(env.clone())),
        );

        for (variable, key) in LEGACY_VARIABLES {
            let value = env.get(variable).filter(|value| !value.trim().is_empty());
            if value.is_some() {
                debug!(variable, key, "Applying legacy environment variable");
            }
            builder = builder
                .set_override_option(key, value.cloned())
                .map_err(|e| ConfigError::new(format!("Failed to apply {}: {}", variable, e)))?;
        }

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        debug!(endpoints = config.endpoints.len(), "Configuration loaded");
        Ok(config)
    }

    /// Check the loaded values.
    ///
    /// # Errors
    ///
    /// Returns error if the listen address is invalid, there are no
    /// endpoints, or an endpoint is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.addr()?;
        if self.endpoints.is_empty() {
            return Err(ConfigError::new("No endpoints configured"));
        }
        validate_endpoints(&self.endpoints)
    }
}

fn add_user_files(
    mut builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    if let Some(path) = path {
        debug!(path = %path.display(), "Using configuration file");
        return builder.add_source(File::from(path).format(FileFormat::Toml));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("storyteller/storyteller.toml");
        builder = builder.add_source(File::from(user_config).required(false));
    }
    builder.add_source(File::with_name("storyteller").required(false))
}
