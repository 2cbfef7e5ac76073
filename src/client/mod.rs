//! Synchronous HTTP client for the platform configuration API.
//!
//! The client wraps [`ureq`] with the auth header, timeout, and error
//! mapping shared by every endpoint. Async callers should go through
//! [`AsyncPlatformClient`], which runs the blocking calls on a worker
//! thread.

mod async_wrapper;
pub use async_wrapper::{AsyncPlatformClient, AsyncPlatformClientImpl};

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{PlatformApiError, PlatformApiResult};
use crate::metrics::ClientMetrics;
use crate::throttle::RateLimitConfiguration;

/// REST path for the rate-limit configuration resource.
const RATE_LIMIT_CONFIG_PATH: &str = "/api/v1/config/rate_limit";

/// Blocking client for the platform configuration API.
pub struct PlatformClient {
    agent: ureq::Agent,
    base_url: String,
    api_token: String,
    metrics: ClientMetrics,
}

impl PlatformClient {
    /// Create a new PlatformClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            agent,
            base_url: config.base_url.clone(),
            api_token: config.api_token.clone(),
            metrics: ClientMetrics::new(),
        }
    }

    /// Create a PlatformClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_token: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            agent,
            base_url,
            api_token,
            metrics: ClientMetrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &ClientMetrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a GET request with authentication.
    fn get(&self, path: &str) -> Result<ureq::Response, PlatformApiError> {
        let start = Instant::now();
        let url = self.build_url(path);

        tracing::debug!("GET {}", url);
        let result = self
            .agent
            .get(&url)
            .set("x-openlearn-api-token", &self.api_token)
            .set("Content-Type", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        let duration = start.elapsed();
        if result.is_err() {
            self.metrics.record_error();
        }
        self.metrics.record_request(duration);

        result
    }

    /// Execute a POST request with authentication and JSON body.
    fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<ureq::Response, PlatformApiError> {
        let start = Instant::now();
        let url = self.build_url(path);

        tracing::debug!("POST {}", url);
        let result = self
            .agent
            .post(&url)
            .set("x-openlearn-api-token", &self.api_token)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        let duration = start.elapsed();
        if result.is_err() {
            self.metrics.record_error();
        }
        self.metrics.record_request(duration);

        result
    }

    /// Map a ureq error to a PlatformApiError.
    fn map_error(&self, error: ureq::Error) -> PlatformApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => PlatformApiError::Unauthorized,
                    404 => PlatformApiError::NotFound(message),
                    429 => PlatformApiError::RateLimited,
                    _ => PlatformApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    PlatformApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    PlatformApiError::Timeout
                } else {
                    PlatformApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    // ==================== Rate-Limit Configuration ====================

    /// Get the currently effective rate-limit configuration record.
    ///
    /// Returns `Ok(None)` when no record has ever been persisted; the
    /// API reports that case as 404.
    pub fn current_rate_limit_config(
        &self,
    ) -> PlatformApiResult<Option<RateLimitConfiguration>> {
        let path = format!("{}/current", RATE_LIMIT_CONFIG_PATH);
        let response = match self.get(&path) {
            Ok(response) => response,
            Err(PlatformApiError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        let body = response
            .into_string()
            .map_err(|e| PlatformApiError::HttpError(e.to_string()))?;

        let config: RateLimitConfiguration =
            serde_json::from_str(&body).map_err(PlatformApiError::JsonError)?;
        Ok(Some(config))
    }

    /// Persist a new rate-limit configuration record.
    ///
    /// The record becomes the current one: the server stamps it with a
    /// change date greater than any existing record's.
    pub fn create_rate_limit_config(
        &self,
        enabled: bool,
        changed_by: Option<&str>,
    ) -> PlatformApiResult<RateLimitConfiguration> {
        let body = serde_json::json!({
            "enabled": enabled,
            "changed_by": changed_by,
        });

        let response = self.post(RATE_LIMIT_CONFIG_PATH, &body)?;
        let body = response
            .into_string()
            .map_err(|e| PlatformApiError::HttpError(e.to_string()))?;

        let config: RateLimitConfiguration =
            serde_json::from_str(&body).map_err(PlatformApiError::JsonError)?;
        Ok(config)
    }
}
