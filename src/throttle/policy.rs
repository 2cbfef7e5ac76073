//! Throttle policies.
//!
//! A [`Throttle`] decides, for one request, whether the caller is
//! inside its allowed rate. Policies are deliberately unaware of the
//! kill switch; [`ThrottleGate`](super::ThrottleGate) consults the
//! persisted configuration before any policy runs.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::rate::{RateParseError, ThrottleRate};
use super::request::ApiRequest;

/// Outcome of a single throttle's check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// The request fits within this throttle's rate
    Allowed,

    /// The request exceeds this throttle's rate; `wait` estimates how
    /// long until a slot frees up, when the policy can tell
    Rejected { wait: Option<Duration> },
}

impl ThrottleDecision {
    /// Whether this decision lets the request through.
    pub fn is_allowed(&self) -> bool {
        matches!(self, ThrottleDecision::Allowed)
    }
}

/// A rate-limiting policy applied to incoming requests.
///
/// Implementations must track their own state internally; the gate
/// calls `check` concurrently from many tasks.
#[async_trait]
pub trait Throttle: Send + Sync {
    /// Check whether this request may proceed, recording it if allowed.
    async fn check(&self, request: &ApiRequest) -> ThrottleDecision;
}

/// Sliding-window throttle keeping a per-caller timestamp history.
///
/// Each allowed request is recorded; a request is rejected when the
/// caller already has `num_requests` timestamps younger than the
/// window. The wait hint is the time until the oldest of those
/// timestamps ages out.
pub struct SlidingWindowThrottle {
    rate: ThrottleRate,
    history: RwLock<HashMap<String, VecDeque<Instant>>>,
}

impl SlidingWindowThrottle {
    /// Create a throttle enforcing the given rate.
    pub fn new(rate: ThrottleRate) -> Self {
        Self {
            rate,
            history: RwLock::new(HashMap::new()),
        }
    }

    /// Create a throttle from a `"<count>/<period>"` rate string.
    pub fn from_rate(rate: &str) -> Result<Self, RateParseError> {
        Ok(Self::new(ThrottleRate::parse(rate)?))
    }

    /// The rate this throttle enforces.
    pub fn rate(&self) -> ThrottleRate {
        self.rate
    }
}

#[async_trait]
impl Throttle for SlidingWindowThrottle {
    async fn check(&self, request: &ApiRequest) -> ThrottleDecision {
        let now = Instant::now();
        let mut history = self.history.write().await;
        let timestamps = history.entry(request.ident()).or_default();

        // Drop entries that have aged out of the window.
        while let Some(&oldest) = timestamps.front() {
            if now.duration_since(oldest) >= self.rate.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }

        if timestamps.len() < self.rate.num_requests as usize {
            timestamps.push_back(now);
            ThrottleDecision::Allowed
        } else {
            let wait = timestamps
                .front()
                .map(|&oldest| (oldest + self.rate.window).saturating_duration_since(now));
            ThrottleDecision::Rejected { wait }
        }
    }
}
