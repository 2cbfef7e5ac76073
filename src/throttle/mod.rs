//! Configuration-aware request throttling.
//!
//! This module reproduces the platform's rate-limiting kill switch: a
//! persisted [`RateLimitConfiguration`] record can switch rate limiting
//! off for every API endpoint at once, without a deploy. The
//! [`ThrottleGate`] reads that record through a [`RateLimitConfigStore`]
//! and only consults its [`Throttle`] policies while rate limiting is
//! active.

pub mod config;
pub mod gate;
pub mod http_store;
pub mod policy;
pub mod rate;
pub mod request;
pub mod store;

pub use config::RateLimitConfiguration;
pub use gate::{RateLimitingState, ThrottleGate};
pub use http_store::HttpRateLimitConfigStore;
pub use policy::{SlidingWindowThrottle, Throttle, ThrottleDecision};
pub use rate::{RateParseError, ThrottleRate};
pub use request::ApiRequest;
pub use store::{CachedRateLimitConfigStore, InMemoryRateLimitConfigStore, RateLimitConfigStore};
