//! CacheEntry - A cached completion addressed by request fingerprint

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::CompletionResult;

/// Fixed time-to-live for cached completions (24 hours)
pub const CACHE_TTL_SECS: i64 = 86_400;

/// Cached completion with its creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub response: CompletionResult,
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time
    pub fn new(response: CompletionResult) -> Self {
        Self {
            response,
            timestamp: Utc::now(),
        }
    }

    /// An entry older than `ttl` is logically absent.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.timestamp < ttl
    }
}
