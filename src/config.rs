//! Configuration management for the OpenLearn testkit.
//!
//! This module handles loading and validating configuration from environment variables.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the testkit.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the OpenLearn platform (also the find-courses landing page)
    pub base_url: String,

    /// API token for the platform's operational config API
    pub api_token: String,

    /// WebDriver endpoint for browser-backed checks; `None` disables them
    pub webdriver_url: Option<String>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// TTL in seconds for the cached rate-limit configuration (default: 300)
    pub rate_limit_cache_ttl: u64,

    /// Page readiness timeout in seconds (default: 30)
    pub page_load_timeout: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENLEARN_BASE_URL`: Base URL of the platform
    /// - `OPENLEARN_API_TOKEN`: Token for the config API
    ///
    /// Optional environment variables:
    /// - `WEBDRIVER_URL`: WebDriver endpoint (unset disables browser checks)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `RATE_LIMIT_CACHE_TTL`: Config cache TTL in seconds (default: 300)
    /// - `PAGE_LOAD_TIMEOUT`: Page readiness timeout in seconds (default: 30)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let base_url = env::var("OPENLEARN_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("OPENLEARN_BASE_URL".to_string()))?;

        let api_token = env::var("OPENLEARN_API_TOKEN")
            .map_err(|_| ConfigError::MissingVar("OPENLEARN_API_TOKEN".to_string()))?;

        // Validate base URL format
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "OPENLEARN_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        // Validate API token is not empty
        if api_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "OPENLEARN_API_TOKEN".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let webdriver_url = env::var("WEBDRIVER_URL").ok();

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let rate_limit_cache_ttl = Self::parse_env_u64("RATE_LIMIT_CACHE_TTL", 300)?;
        let page_load_timeout = Self::parse_env_u64("PAGE_LOAD_TIMEOUT", 30)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            base_url,
            api_token,
            webdriver_url,
            request_timeout,
            rate_limit_cache_ttl,
            page_load_timeout,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::new(),
            api_token: String::new(),
            webdriver_url: None,
            request_timeout: 10,
            rate_limit_cache_ttl: 300,
            page_load_timeout: 30,
            log_level: "info".to_string(),
        }
    }
}
