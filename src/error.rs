//! Error types for the OpenLearn testkit.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the OpenLearn platform API.
#[derive(Error, Debug)]
pub enum PlatformApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// The platform API itself throttled the request
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors produced by a throttle check.
#[derive(Error, Debug)]
pub enum ThrottleError {
    /// Rate limiting is active and at least one throttle rejected the request.
    /// The wait hint is the largest hint offered by a rejecting throttle.
    #[error("request was throttled{}", wait_hint(.wait))]
    Throttled { wait: Option<Duration> },

    /// The rate-limit configuration could not be resolved.
    #[error("rate limit configuration unavailable: {0}")]
    Config(#[from] PlatformApiError),
}

fn wait_hint(wait: &Option<Duration>) -> String {
    match wait {
        Some(w) => format!(", expected available in {}s", w.as_secs()),
        None => String::new(),
    }
}

/// Errors surfaced by page objects and browser sessions.
#[derive(Error, Debug)]
pub enum PageError {
    /// Failure reported by the underlying browser-automation backend,
    /// passed through with its original message.
    #[error("browser automation error: {0}")]
    Driver(String),

    /// The page never satisfied its readiness predicate within the timeout.
    #[error("page not ready after {timeout:?}")]
    ReadinessTimeout { timeout: Duration },

    /// The page has no URL and cannot be visited directly.
    #[error("page has no URL and cannot be visited directly")]
    NotVisitable,
}

/// Convenience type alias for Results with PlatformApiError
pub type PlatformApiResult<T> = Result<T, PlatformApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ThrottleError
pub type ThrottleResult<T> = Result<T, ThrottleError>;

/// Convenience type alias for Results with PageError
pub type PageResult<T> = Result<T, PageError>;
