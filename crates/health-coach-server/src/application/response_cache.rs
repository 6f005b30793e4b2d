//! Response Cache
//!
//! TTL-bounded completion cache over a [`CacheStore`]. Reads fail open;
//! write failures are returned so the caller can apply its persistence policy.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use health_coach::{CacheEntry, CacheStore, CompletionResult, DomainError};

use crate::telemetry::truncate_for_log;

pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Fresh cached completion for `key`, if any.
    ///
    /// Storage errors are logged and reported as a miss.
    pub async fn lookup(&self, key: &str) -> Option<CompletionResult> {
        self.lookup_at(key, Utc::now()).await
    }

    pub async fn lookup_at(&self, key: &str, now: DateTime<Utc>) -> Option<CompletionResult> {
        let entry = match self.store.get(key).await {
            Ok(entry) => entry?,
            Err(e) => {
                tracing::warn!(
                    cache_key = %truncate_for_log(key),
                    error = %e,
                    "Cache read failed, treating as miss"
                );
                return None;
            }
        };

        if entry.is_fresh(now, self.ttl) {
            tracing::debug!(cache_key = %truncate_for_log(key), "Cache hit");
            Some(entry.response)
        } else {
            tracing::debug!(cache_key = %truncate_for_log(key), "Cache entry expired");
            None
        }
    }

    /// Upsert `{response, timestamp = now}` under `key`.
    pub async fn store(&self, key: &str, response: &CompletionResult) -> Result<(), DomainError> {
        self.store
            .put(key, &CacheEntry::new(response.clone()))
            .await
    }
}
