//! Rate limit budgets

use serde::{Deserialize, Serialize};

/// Request budget for one logical endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    pub max_requests: u32,

    /// Window length in milliseconds
    pub window_ms: u64,
}

impl RateLimitConfig {
    /// Create a budget
    pub fn new(max_requests: u32, window_ms: u64) -> Self {
        Self {
            max_requests,
            window_ms,
        }
    }

    /// Budget for the menu extraction endpoint: 15 requests per minute
    pub fn extraction() -> Self {
        Self::new(15, 60_000)
    }

    /// Budget for the allergen suggestion endpoint: 30 requests per minute
    pub fn suggestion() -> Self {
        Self::new(30, 60_000)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_requests == 0 {
            return Err("max_requests must be greater than 0".to_string());
        }
        if self.window_ms == 0 {
            return Err("window_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(RateLimitConfig::extraction().validate().is_ok());
        assert!(RateLimitConfig::suggestion().validate().is_ok());
        assert!(RateLimitConfig::suggestion().max_requests > RateLimitConfig::extraction().max_requests);
    }

    #[test]
    fn test_invalid_budgets() {
        assert!(RateLimitConfig::new(0, 1_000).validate().is_err());
        assert!(RateLimitConfig::new(5, 0).validate().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let config: RateLimitConfig = toml::from_str("max_requests = 3\nwindow_ms = 500").unwrap();
        assert_eq!(config, RateLimitConfig::new(3, 500));
    }
}
