//! The throttle gate: configuration-aware throttle checking.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{ThrottleError, ThrottleResult};
use crate::metrics::GateMetrics;

use super::config::RateLimitConfiguration;
use super::policy::{Throttle, ThrottleDecision};
use super::request::ApiRequest;
use super::store::RateLimitConfigStore;

/// Whether rate limiting is currently enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitingState {
    /// Throttle policies run on every request
    Active,

    /// A persisted record switched rate limiting off
    Suspended,
}

impl RateLimitingState {
    /// Derive the state from the current configuration record.
    ///
    /// Only an explicit `enabled = false` record suspends rate
    /// limiting; no record at all means it stays active.
    pub fn from_config(config: Option<&RateLimitConfiguration>) -> Self {
        match config {
            Some(record) if !record.enabled => RateLimitingState::Suspended,
            _ => RateLimitingState::Active,
        }
    }

    /// Whether throttle policies should run in this state.
    pub fn is_active(&self) -> bool {
        matches!(self, RateLimitingState::Active)
    }
}

/// Entry point for request throttling.
///
/// The gate consults the persisted configuration before any policy
/// runs: when the current record disables rate limiting, every request
/// passes without touching a throttle. Otherwise each configured
/// throttle is checked in turn.
///
/// The gate holds its throttles behind trait objects, so tests can
/// inject fakes for both the store and the policies.
pub struct ThrottleGate {
    store: Arc<dyn RateLimitConfigStore>,
    throttles: Vec<Arc<dyn Throttle>>,
    metrics: GateMetrics,
}

impl ThrottleGate {
    /// Create a gate over a configuration store and a set of throttles.
    pub fn new(store: Arc<dyn RateLimitConfigStore>, throttles: Vec<Arc<dyn Throttle>>) -> Self {
        Self {
            store,
            throttles,
            metrics: GateMetrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &GateMetrics {
        &self.metrics
    }

    /// Report whether rate limiting is currently enforced.
    pub async fn rate_limiting_state(&self) -> ThrottleResult<RateLimitingState> {
        let config = self.store.current().await?;
        Ok(RateLimitingState::from_config(config.as_ref()))
    }

    /// Check every throttle against the request.
    ///
    /// Returns `Ok(())` when rate limiting is suspended or every
    /// throttle allows the request. When one or more throttles reject
    /// it, every remaining throttle is still evaluated (each needs to
    /// record the attempt), and the error carries the largest wait hint
    /// any rejecting throttle offered.
    ///
    /// # Errors
    ///
    /// [`ThrottleError::Throttled`] when a throttle rejects the
    /// request, [`ThrottleError::Config`] when the configuration
    /// store cannot answer.
    pub async fn check_throttles(&self, request: &ApiRequest) -> ThrottleResult<()> {
        let disabled = match self.store.is_rate_limiting_disabled().await {
            Ok(disabled) => disabled,
            Err(e) => {
                tracing::warn!("Failed to resolve rate-limit configuration: {}", e);
                self.metrics.record_config_error();
                return Err(ThrottleError::Config(e));
            }
        };

        if disabled {
            tracing::debug!("Rate limiting disabled by configuration, skipping throttle checks");
            self.metrics.record_suspended();
            return Ok(());
        }

        let mut rejected = false;
        let mut max_wait: Option<Duration> = None;

        for throttle in &self.throttles {
            match throttle.check(request).await {
                ThrottleDecision::Allowed => {}
                ThrottleDecision::Rejected { wait } => {
                    rejected = true;
                    if let Some(wait) = wait {
                        max_wait = Some(max_wait.map_or(wait, |current| current.max(wait)));
                    }
                }
            }
        }

        if rejected {
            tracing::debug!("Request throttled (ident: {}, wait: {:?})", request.ident(), max_wait);
            self.metrics.record_throttled();
            return Err(ThrottleError::Throttled { wait: max_wait });
        }

        self.metrics.record_allowed();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::throttle::store::InMemoryRateLimitConfigStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Throttle double returning a fixed decision and counting calls.
    struct FixedThrottle {
        decision: ThrottleDecision,
        calls: AtomicUsize,
    }

    impl FixedThrottle {
        fn allowing() -> Arc<Self> {
            Arc::new(Self {
                decision: ThrottleDecision::Allowed,
                calls: AtomicUsize::new(0),
            })
        }

        fn rejecting(wait: Option<Duration>) -> Arc<Self> {
            Arc::new(Self {
                decision: ThrottleDecision::Rejected { wait },
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Throttle for FixedThrottle {
        async fn check(&self, _request: &ApiRequest) -> ThrottleDecision {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.decision
        }
    }

    fn request() -> ApiRequest {
        ApiRequest::anonymous("127.0.0.1")
    }

    #[tokio::test]
    async fn test_no_configuration_keeps_throttles_running() {
        let store = Arc::new(InMemoryRateLimitConfigStore::new());
        let throttle = FixedThrottle::rejecting(None);
        let gate = ThrottleGate::new(store, vec![throttle.clone()]);

        let result = gate.check_throttles(&request()).await;
        assert!(matches!(result, Err(ThrottleError::Throttled { .. })));
        assert_eq!(throttle.calls(), 1);
    }

    #[tokio::test]
    async fn test_disabled_configuration_short_circuits() {
        let store = Arc::new(InMemoryRateLimitConfigStore::new());
        store.create(false, None);
        let throttle = FixedThrottle::rejecting(None);
        let gate = ThrottleGate::new(store, vec![throttle.clone()]);

        gate.check_throttles(&request()).await.unwrap();
        assert_eq!(throttle.calls(), 0);
    }

    #[tokio::test]
    async fn test_enabled_configuration_delegates() {
        let store = Arc::new(InMemoryRateLimitConfigStore::new());
        store.create(true, None);
        let throttle = FixedThrottle::allowing();
        let gate = ThrottleGate::new(store, vec![throttle.clone()]);

        gate.check_throttles(&request()).await.unwrap();
        assert_eq!(throttle.calls(), 1);
    }

    #[tokio::test]
    async fn test_every_throttle_runs_even_after_rejection() {
        let store = Arc::new(InMemoryRateLimitConfigStore::new());
        let first = FixedThrottle::rejecting(Some(Duration::from_secs(10)));
        let second = FixedThrottle::allowing();
        let third = FixedThrottle::rejecting(Some(Duration::from_secs(30)));
        let gate = ThrottleGate::new(store, vec![first.clone(), second.clone(), third.clone()]);

        let result = gate.check_throttles(&request()).await;
        match result {
            Err(ThrottleError::Throttled { wait }) => {
                assert_eq!(wait, Some(Duration::from_secs(30)));
            }
            other => panic!("expected throttled, got {:?}", other),
        }
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
        assert_eq!(third.calls(), 1);
    }

    #[tokio::test]
    async fn test_wait_hint_absent_when_no_throttle_offers_one() {
        let store = Arc::new(InMemoryRateLimitConfigStore::new());
        let gate = ThrottleGate::new(store, vec![FixedThrottle::rejecting(None)]);

        match gate.check_throttles(&request()).await {
            Err(ThrottleError::Throttled { wait }) => assert!(wait.is_none()),
            other => panic!("expected throttled, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_hintless_rejection_does_not_erase_other_hints() {
        let store = Arc::new(InMemoryRateLimitConfigStore::new());
        let gate = ThrottleGate::new(
            store,
            vec![
                FixedThrottle::rejecting(None),
                FixedThrottle::rejecting(Some(Duration::from_secs(5))),
            ],
        );

        match gate.check_throttles(&request()).await {
            Err(ThrottleError::Throttled { wait }) => {
                assert_eq!(wait, Some(Duration::from_secs(5)));
            }
            other => panic!("expected throttled, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_gate_without_throttles_allows() {
        let store = Arc::new(InMemoryRateLimitConfigStore::new());
        let gate = ThrottleGate::new(store, Vec::new());

        gate.check_throttles(&request()).await.unwrap();
    }

    #[tokio::test]
    async fn test_rate_limiting_state_reporting() {
        let store = Arc::new(InMemoryRateLimitConfigStore::new());
        let gate = ThrottleGate::new(store.clone(), Vec::new());

        assert_eq!(
            gate.rate_limiting_state().await.unwrap(),
            RateLimitingState::Active
        );

        store.create(false, None);
        assert_eq!(
            gate.rate_limiting_state().await.unwrap(),
            RateLimitingState::Suspended
        );

        store.create(true, None);
        assert_eq!(
            gate.rate_limiting_state().await.unwrap(),
            RateLimitingState::Active
        );
    }

    #[tokio::test]
    async fn test_metrics_track_decisions() {
        let store = Arc::new(InMemoryRateLimitConfigStore::new());
        let gate = ThrottleGate::new(store.clone(), vec![FixedThrottle::rejecting(None)]);

        let _ = gate.check_throttles(&request()).await;
        store.create(false, None);
        gate.check_throttles(&request()).await.unwrap();

        let snapshot = gate.metrics().snapshot();
        assert_eq!(snapshot.checks_total, 2);
        assert_eq!(snapshot.throttled_total, 1);
        assert_eq!(snapshot.suspended_total, 1);
        assert_eq!(snapshot.allowed_total, 0);
    }
}
