//! Persisted rate-limit configuration records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted rate-limit configuration record.
///
/// Records are append-only: changing the setting means writing a new
/// record, never editing an old one. The record with the greatest
/// [`change_date`](Self::change_date) is the current one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateLimitConfiguration {
    /// Whether rate limiting is enforced while this record is current
    pub enabled: bool,

    /// When this record was created
    pub change_date: DateTime<Utc>,

    /// Who created this record, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
}

impl RateLimitConfiguration {
    /// Create a record stamped with the current time.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            change_date: Utc::now(),
            changed_by: None,
        }
    }

    /// Attach the author of the change.
    pub fn with_changed_by(mut self, changed_by: impl Into<String>) -> Self {
        self.changed_by = Some(changed_by.into());
        self
    }

    /// Pick the current record out of a set: the one with the greatest
    /// change date. When several share that date, the last-written one
    /// wins.
    pub fn current_of(records: &[RateLimitConfiguration]) -> Option<&RateLimitConfiguration> {
        records.iter().max_by_key(|record| record.change_date)
    }
}
