//! Configuration for input acquisition and extraction

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 12 MiB
const DEFAULT_MAX_ARTIFACT_BYTES: usize = 12 * 1024 * 1024;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum combined input length handed to extraction (characters)
    pub max_text_length: usize,

    /// Maximum size of one uploaded image or PDF (bytes)
    pub max_artifact_bytes: usize,

    /// Maximum time for the extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Maximum time for recognizing an upload (seconds)
    pub recognition_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Get the recognition timeout as a Duration
    pub fn recognition_timeout(&self) -> Duration {
        Duration::from_secs(self.recognition_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.max_artifact_bytes == 0 {
            return Err("max_artifact_bytes must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        if self.recognition_timeout_secs == 0 {
            return Err("recognition_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 18_000,
            max_artifact_bytes: DEFAULT_MAX_ARTIFACT_BYTES,
            extraction_timeout_secs: 90,
            recognition_timeout_secs: 90,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: shorter inputs and timeouts
    pub fn aggressive() -> Self {
        Self {
            max_text_length: 8_000,
            max_artifact_bytes: 4 * 1024 * 1024,
            extraction_timeout_secs: 30,
            recognition_timeout_secs: 30,
        }
    }

    /// Lenient preset: longer timeouts for slow providers
    pub fn lenient() -> Self {
        Self {
            extraction_timeout_secs: 180,
            recognition_timeout_secs: 180,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
