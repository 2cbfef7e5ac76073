use async_trait::async_trait;
use chrono::Utc;
use openlearn_testkit::error::{PlatformApiError, PlatformApiResult};
use openlearn_testkit::throttle::{RateLimitConfigStore, RateLimitConfiguration};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock configuration store for testing.
///
/// Provides an in-memory implementation of RateLimitConfigStore that can be
/// easily configured with records, told to fail, and tracks method calls
/// for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockRateLimitConfigStore {
    records: Arc<Mutex<Vec<RateLimitConfiguration>>>,
    unavailable: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockRateLimitConfigStore {
    /// Create a new empty MockRateLimitConfigStore.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            unavailable: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a record to the mock store, keeping its change date.
    pub fn add_record(&self, record: RateLimitConfiguration) {
        let mut records = self.records.lock().unwrap();
        records.push(record);
    }

    /// Append a record stamped with the current time.
    pub fn create(&self, enabled: bool) -> RateLimitConfiguration {
        let record = RateLimitConfiguration {
            enabled,
            change_date: Utc::now(),
            changed_by: None,
        };
        self.add_record(record.clone());
        record
    }

    /// When set, every call fails with a timeout error.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// Remove all records from the store.
    pub fn clear(&self) {
        let mut records = self.records.lock().unwrap();
        records.clear();
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        let mut counts = self.call_counts.lock().unwrap();
        counts.clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockRateLimitConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimitConfigStore for MockRateLimitConfigStore {
    async fn current(&self) -> PlatformApiResult<Option<RateLimitConfiguration>> {
        self.track_call("current");

        if *self.unavailable.lock().unwrap() {
            return Err(PlatformApiError::Timeout);
        }

        let records = self.records.lock().unwrap();
        Ok(RateLimitConfiguration::current_of(&records).cloned())
    }
}
