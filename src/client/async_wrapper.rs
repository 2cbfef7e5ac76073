//! Async wrapper around synchronous PlatformClient.
//!
//! This module provides an async interface to the synchronous PlatformClient by
//! using `tokio::task::spawn_blocking` to run HTTP operations on a dedicated
//! thread pool, preventing blocking of the async runtime.

use crate::client::PlatformClient;
use crate::error::{PlatformApiError, PlatformApiResult};
use crate::throttle::RateLimitConfiguration;
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for platform configuration API operations.
///
/// This trait provides async versions of the PlatformClient methods,
/// internally using `tokio::task::spawn_blocking` to avoid
/// blocking the async runtime with synchronous HTTP calls.
#[async_trait]
pub trait AsyncPlatformClient: Send + Sync {
    async fn current_rate_limit_config(&self) -> PlatformApiResult<Option<RateLimitConfiguration>>;

    async fn create_rate_limit_config(
        &self,
        enabled: bool,
        changed_by: Option<String>,
    ) -> PlatformApiResult<RateLimitConfiguration>;
}

/// Async wrapper around synchronous PlatformClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool, preventing blocking
/// the async runtime.
#[derive(Clone)]
pub struct AsyncPlatformClientImpl {
    client: Arc<PlatformClient>,
}

impl AsyncPlatformClientImpl {
    pub fn new(client: PlatformClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncPlatformClient for AsyncPlatformClientImpl {
    async fn current_rate_limit_config(&self) -> PlatformApiResult<Option<RateLimitConfiguration>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.current_rate_limit_config())
            .await
            .map_err(|e| PlatformApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn create_rate_limit_config(
        &self,
        enabled: bool,
        changed_by: Option<String>,
    ) -> PlatformApiResult<RateLimitConfiguration> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || {
            client.create_rate_limit_config(enabled, changed_by.as_deref())
        })
        .await
        .map_err(|e| PlatformApiError::HttpError(format!("Task join error: {}", e)))?
    }
}
