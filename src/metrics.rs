//! Basic metrics instrumentation.
//!
//! Provides counters for HTTP traffic against the platform API and for
//! throttle-gate decisions. Counters are relaxed atomics and cheap to clone.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for the platform HTTP client.
#[derive(Debug, Clone)]
pub struct ClientMetrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,
}

impl Default for ClientMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }
}

/// Metrics collector for throttle-gate decisions.
#[derive(Debug, Clone)]
pub struct GateMetrics {
    /// Total number of throttle checks performed
    checks_total: Arc<AtomicU64>,

    /// Checks that passed with rate limiting active
    allowed_total: Arc<AtomicU64>,

    /// Checks rejected by a throttle
    throttled_total: Arc<AtomicU64>,

    /// Checks short-circuited because rate limiting was suspended
    suspended_total: Arc<AtomicU64>,

    /// Checks that failed because the configuration could not be resolved
    config_errors_total: Arc<AtomicU64>,
}

/// Point-in-time snapshot of gate metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateMetricsSnapshot {
    pub checks_total: u64,
    pub allowed_total: u64,
    pub throttled_total: u64,
    pub suspended_total: u64,
    pub config_errors_total: u64,
}

impl Default for GateMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl GateMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            checks_total: Arc::new(AtomicU64::new(0)),
            allowed_total: Arc::new(AtomicU64::new(0)),
            throttled_total: Arc::new(AtomicU64::new(0)),
            suspended_total: Arc::new(AtomicU64::new(0)),
            config_errors_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a check that passed with rate limiting active.
    pub fn record_allowed(&self) {
        self.checks_total.fetch_add(1, Ordering::Relaxed);
        self.allowed_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a check rejected by a throttle.
    pub fn record_throttled(&self) {
        self.checks_total.fetch_add(1, Ordering::Relaxed);
        self.throttled_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a check skipped because rate limiting was suspended.
    pub fn record_suspended(&self) {
        self.checks_total.fetch_add(1, Ordering::Relaxed);
        self.suspended_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a check that failed on configuration resolution.
    pub fn record_config_error(&self) {
        self.checks_total.fetch_add(1, Ordering::Relaxed);
        self.config_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a consistent-enough snapshot of all counters.
    pub fn snapshot(&self) -> GateMetricsSnapshot {
        GateMetricsSnapshot {
            checks_total: self.checks_total.load(Ordering::Relaxed),
            allowed_total: self.allowed_total.load(Ordering::Relaxed),
            throttled_total: self.throttled_total.load(Ordering::Relaxed),
            suspended_total: self.suspended_total.load(Ordering::Relaxed),
            config_errors_total: self.config_errors_total.load(Ordering::Relaxed),
        }
    }
}
