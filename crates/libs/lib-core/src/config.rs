//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! There is no global instance: the server builds one [`Config`] at startup and
//! hands it to handlers through application state.
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::from_env().expect("invalid environment");
//! config.validate().expect("invalid configuration");
//! ```

use lib_utils::{get_env, get_env_or, get_env_parse_or};

/// Default chat-completion model used by the AI assistant.
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

/// Upper bound accepted for `AI_MAX_TOKENS`
const MAX_AI_TOKENS: u32 = 16_384;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// JWT token validity period in hours
    ///
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub jwt_expiration_hours: i64,

    /// API key for the completion provider. `None` disables the AI assistant.
    pub openai_api_key: Option<String>,

    /// Model name passed to the completion provider
    pub ai_model: String,

    /// Upper bound on a single completion call, in seconds
    pub ai_timeout_secs: u64,

    /// Maximum reply length in tokens
    pub ai_max_tokens: u32,

    /// Sampling temperature for chat replies
    pub ai_temperature: f32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = get_env("JWT_SECRET").map_err(|e| e.to_string())?;

        let jwt_expiration_hours = get_env_parse_or("JWT_EXPIRATION_HOURS", 24)
            .map_err(|_| "JWT_EXPIRATION_HOURS must be a valid number".to_string())?;

        let openai_api_key = get_env("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let ai_model = get_env_or("AI_MODEL", DEFAULT_AI_MODEL);

        let ai_timeout_secs = get_env_parse_or("AI_TIMEOUT_SECS", 30)
            .map_err(|_| "AI_TIMEOUT_SECS must be a whole number of seconds".to_string())?;

        let ai_max_tokens = get_env_parse_or("AI_MAX_TOKENS", 500)
            .map_err(|_| "AI_MAX_TOKENS must be a valid number".to_string())?;

        let ai_temperature = get_env_parse_or("AI_TEMPERATURE", 0.7)
            .map_err(|_| "AI_TEMPERATURE must be a valid number".to_string())?;

        Ok(Self {
            jwt_secret,
            jwt_expiration_hours,
            openai_api_key,
            ai_model,
            ai_timeout_secs,
            ai_max_tokens,
            ai_temperature,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".to_string());
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err("JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string());
        }

        if self.ai_model.trim().is_empty() {
            return Err("AI_MODEL cannot be empty".to_string());
        }

        if self.ai_timeout_secs == 0 || self.ai_timeout_secs > 300 {
            return Err("AI_TIMEOUT_SECS must be between 1 and 300".to_string());
        }

        if self.ai_max_tokens == 0 || self.ai_max_tokens > MAX_AI_TOKENS {
            return Err(format!("AI_MAX_TOKENS must be between 1 and {}", MAX_AI_TOKENS));
        }

        if !(0.0..=2.0).contains(&self.ai_temperature) {
            return Err("AI_TEMPERATURE must be between 0 and 2".to_string());
        }

        Ok(())
    }

    /// Whether a completion provider key is configured.
    pub fn ai_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
            jwt_expiration_hours: 24,
            openai_api_key: None,
            ai_model: DEFAULT_AI_MODEL.to_string(),
            ai_timeout_secs: 30,
            ai_max_tokens: 500,
            ai_temperature: 0.7,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
        assert!(!valid_config().ai_enabled());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = Config { jwt_secret: "short".to_string(), ..valid_config() };
        assert_eq!(
            config.validate().unwrap_err(),
            "JWT_SECRET must be at least 32 characters long"
        );
    }

    #[test]
    fn test_ai_timeout_bounds() {
        let config = Config { ai_timeout_secs: 0, ..valid_config() };
        assert!(config.validate().is_err());

        let config = Config { ai_timeout_secs: 301, ..valid_config() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_tokens_bounds() {
        let config = Config { ai_max_tokens: 0, ..valid_config() };
        assert!(config.validate().is_err());

        let config = Config { ai_max_tokens: MAX_AI_TOKENS + 1, ..valid_config() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_temperature_bounds() {
        let config = Config { ai_temperature: 2.5, ..valid_config() };
        assert!(config.validate().is_err());
    }
}
