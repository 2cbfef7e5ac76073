use crate::client::AsyncPlatformClient;
use crate::error::PlatformApiResult;
use crate::throttle::config::RateLimitConfiguration;
use crate::throttle::store::RateLimitConfigStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Configuration store backed by the platform API.
///
/// This store delegates resolution to the AsyncPlatformClient,
/// providing a clean abstraction layer between the throttle gate and
/// the underlying HTTP client. Production deployments wrap it in a
/// [`CachedRateLimitConfigStore`](super::CachedRateLimitConfigStore).
pub struct HttpRateLimitConfigStore {
    client: Arc<dyn AsyncPlatformClient>,
}

impl HttpRateLimitConfigStore {
    /// Create a new HttpRateLimitConfigStore with the given client.
    pub fn new(client: Arc<dyn AsyncPlatformClient>) -> Self {
        Self { client }
    }

    /// Persist a new configuration record through the platform API.
    ///
    /// The record is stamped server-side and becomes the current one.
    pub async fn publish(
        &self,
        enabled: bool,
        changed_by: Option<String>,
    ) -> PlatformApiResult<RateLimitConfiguration> {
        self.client.create_rate_limit_config(enabled, changed_by).await
    }
}

#[async_trait]
impl RateLimitConfigStore for HttpRateLimitConfigStore {
    async fn current(&self) -> PlatformApiResult<Option<RateLimitConfiguration>> {
        self.client.current_rate_limit_config().await
    }
}
