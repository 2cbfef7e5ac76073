//! OpenLearn Testkit - acceptance-test plumbing for the OpenLearn platform.
//!
//! This library packages two pieces of the platform's test infrastructure
//! as reusable components: a configuration-aware throttle gate that
//! reproduces the platform's rate-limiting kill switch, and page objects
//! for browser-level acceptance checks, starting with the course
//! discovery page.
//!
//! # Architecture
//!
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **client**: HTTP client for the platform configuration API
//! - **throttle**: Throttle gate, policies, and configuration stores
//! - **pages**: Page objects and the browser session abstraction
//! - **metrics**: Counters for HTTP traffic and gate decisions

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pages;
pub mod throttle;

pub use client::PlatformClient;
pub use config::Config;
pub use error::{ConfigError, PageError, PlatformApiError, ThrottleError};
pub use metrics::{ClientMetrics, GateMetrics, GateMetricsSnapshot};
pub use pages::{BrowserSession, FindCoursesPage, PageObject, WebDriverSession};
pub use throttle::{
    ApiRequest, CachedRateLimitConfigStore, HttpRateLimitConfigStore,
    InMemoryRateLimitConfigStore, RateLimitConfigStore, RateLimitConfiguration,
    RateLimitingState, SlidingWindowThrottle, Throttle, ThrottleDecision, ThrottleGate,
    ThrottleRate,
};
