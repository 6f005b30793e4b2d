//! Cache Store Port
//!
//! Abstract interface for the response cache collection.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, CacheEntry};

/// Key-value store for cached completions, keyed by request fingerprint
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the raw entry, regardless of age
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, DomainError>;

    /// Insert or overwrite the entry for `key`
    async fn put(&self, key: &str, entry: &CacheEntry) -> Result<(), DomainError>;
}
