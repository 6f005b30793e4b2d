//! PostgreSQL implementation of CacheStore

use async_trait::async_trait;
use sqlx::PgPool;

use health_coach::{CacheEntry, CacheStore, DomainError};

use super::PgDocumentStore;

const COLLECTION: &str = "response_cache";

/// PostgreSQL implementation of CacheStore
pub struct PgCacheStore {
    documents: PgDocumentStore,
}

impl PgCacheStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            documents: PgDocumentStore::new(pool),
        }
    }
}

#[async_trait]
impl CacheStore for PgCacheStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, DomainError> {
        let Some(data) = self.documents.get(COLLECTION, key).await? else {
            return Ok(None);
        };

        serde_json::from_value(data)
            .map(Some)
            .map_err(|e| DomainError::Repository(format!("Corrupt cache entry {key}: {e}")))
    }

    async fn put(&self, key: &str, entry: &CacheEntry) -> Result<(), DomainError> {
        let data = serde_json::to_value(entry)
            .map_err(|e| DomainError::Repository(format!("Failed to encode cache entry: {e}")))?;
        self.documents.set(COLLECTION, key, &data).await
    }
}
