//! Configuration file parsing for the server.
//!
//! Loads bind address, provider settings, rate-limit budgets and extractor
//! limits from TOML. The provider credential is never read from the file;
//! it comes from the `OPENAI_API_KEY` environment variable.

use menucheck_extractor::ExtractorConfig;
use menucheck_gatekeeper::{RateLimitConfig, DEFAULT_MAX_TRACKED_KEYS};
use menucheck_llm::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the provider credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    pub bind_port: u16,

    /// Provider API base URL
    pub provider_endpoint: String,

    /// Provider model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// HTTP timeout for one provider call (seconds)
    pub provider_timeout_secs: u64,

    /// Budget of the menu analysis endpoint
    pub parse_menu_limit: RateLimitConfig,

    /// Budget of the suggestion endpoint
    pub suggest_limit: RateLimitConfig,

    /// Tracked clients before expired windows are purged
    pub max_tracked_keys: usize,

    /// Acquisition and extraction limits
    pub extractor: ExtractorConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 3000,
            provider_endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            provider_timeout_secs: DEFAULT_TIMEOUT_SECS,
            parse_menu_limit: RateLimitConfig::extraction(),
            suggest_limit: RateLimitConfig::suggestion(),
            max_tracked_keys: DEFAULT_MAX_TRACKED_KEYS,
            extractor: ExtractorConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }
        if self.provider_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "provider_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_tracked_keys == 0 {
            return Err(ConfigError::Invalid(
                "max_tracked_keys must be greater than 0".to_string(),
            ));
        }
        self.parse_menu_limit
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("parse_menu_limit: {}", e)))?;
        self.suggest_limit
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("suggest_limit: {}", e)))?;
        self.extractor
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("extractor: {}", e)))?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Read the provider credential from the environment
    ///
    /// Returns `None` when the variable is unset or blank.
    pub fn api_key_from_env() -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}
