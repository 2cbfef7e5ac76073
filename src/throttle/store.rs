//! Rate-limit configuration stores.
//!
//! A store answers one question: which persisted configuration record
//! is currently in effect? The gate only ever consults the store
//! through [`RateLimitConfigStore`], so tests can swap in fakes and
//! production can layer a cache over the API-backed store.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::PlatformApiResult;

use super::config::RateLimitConfiguration;

/// Store of persisted rate-limit configuration records.
///
/// Provides abstraction over configuration storage and retrieval,
/// enabling different implementations (API-backed, cached, in-memory).
#[async_trait]
pub trait RateLimitConfigStore: Send + Sync {
    /// Resolve the currently effective configuration record.
    ///
    /// Returns `Ok(None)` when no record has ever been persisted.
    async fn current(&self) -> PlatformApiResult<Option<RateLimitConfiguration>>;

    /// Whether the current record switches rate limiting off.
    ///
    /// Absent configuration leaves rate limiting on: only an explicit
    /// `enabled = false` record disables it.
    async fn is_rate_limiting_disabled(&self) -> PlatformApiResult<bool> {
        let current = self.current().await?;
        Ok(matches!(current, Some(config) if !config.enabled))
    }
}

/// In-memory store holding records in insertion order.
///
/// Used by tests and local tooling; resolution follows the same rule
/// as the platform: greatest change date wins, ties go to the record
/// written last.
#[derive(Default)]
pub struct InMemoryRateLimitConfigStore {
    records: RwLock<Vec<RateLimitConfiguration>>,
}

impl InMemoryRateLimitConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record as-is, keeping its change date.
    pub fn insert(&self, record: RateLimitConfiguration) {
        if let Ok(mut records) = self.records.write() {
            records.push(record);
        }
    }

    /// Append a new record stamped with the current time and return it.
    pub fn create(
        &self,
        enabled: bool,
        changed_by: Option<&str>,
    ) -> RateLimitConfiguration {
        let record = RateLimitConfiguration {
            enabled,
            change_date: Utc::now(),
            changed_by: changed_by.map(str::to_string),
        };
        self.insert(record.clone());
        record
    }
}

#[async_trait]
impl RateLimitConfigStore for InMemoryRateLimitConfigStore {
    async fn current(&self) -> PlatformApiResult<Option<RateLimitConfiguration>> {
        if let Ok(records) = self.records.read() {
            Ok(RateLimitConfiguration::current_of(&records).cloned())
        } else {
            Ok(None)
        }
    }
}

/// A cached resolution with a timestamp.
#[derive(Debug, Clone)]
struct CachedEntry {
    value: Option<RateLimitConfiguration>,
    inserted_at: Instant,
}

/// Read-through cache over another store.
///
/// The resolved answer, including the no-record answer, is held for the
/// configured TTL so hot request paths do not hit the backing store on
/// every check. Store errors are never cached.
pub struct CachedRateLimitConfigStore {
    inner: Arc<dyn RateLimitConfigStore>,
    ttl: Duration,
    slot: RwLock<Option<CachedEntry>>,
}

impl CachedRateLimitConfigStore {
    /// Create a cache over `inner` with the specified TTL in seconds.
    pub fn new(inner: Arc<dyn RateLimitConfigStore>, ttl_seconds: u64) -> Self {
        Self {
            inner,
            ttl: Duration::from_secs(ttl_seconds),
            slot: RwLock::new(None),
        }
    }

    /// Drop the cached answer so the next read hits the backing store.
    ///
    /// Call this after writing a new configuration record to make it
    /// visible before the TTL elapses.
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    /// Get the TTL duration for this cache.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn cached(&self) -> Option<Option<RateLimitConfiguration>> {
        let now = Instant::now();

        if let Ok(slot) = self.slot.read() {
            if let Some(entry) = slot.as_ref() {
                if now.duration_since(entry.inserted_at) < self.ttl {
                    return Some(entry.value.clone());
                }
            }
        }

        None
    }
}

#[async_trait]
impl RateLimitConfigStore for CachedRateLimitConfigStore {
    async fn current(&self) -> PlatformApiResult<Option<RateLimitConfiguration>> {
        if let Some(value) = self.cached() {
            return Ok(value);
        }

        let value = self.inner.current().await?;

        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(CachedEntry {
                value: value.clone(),
                inserted_at: Instant::now(),
            });
        }

        Ok(value)
    }
}
