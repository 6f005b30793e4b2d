//! PostgreSQL document store
//!
//! One JSONB document per (collection, key) with get / set / merge-set.

use serde_json::Value;
use sqlx::PgPool;

use health_coach::DomainError;

/// Collection-addressed JSONB documents
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read a document
    pub async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, DomainError> {
        sqlx::query_scalar::<_, Value>(
            "SELECT data FROM documents WHERE collection = $1 AND doc_key = $2",
        )
        .bind(collection)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))
    }

    /// Replace a document
    pub async fn set(
        &self,
        collection: &str,
        key: &str,
        data: &Value,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, doc_key, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, doc_key)
            DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(key)
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    /// Merge top-level fields into a document, creating it if needed.
    /// Fields not present in `data` keep their stored values.
    pub async fn merge(
        &self,
        collection: &str,
        key: &str,
        data: &Value,
    ) -> Result<(), DomainError> {
        if !data.is_object() {
            return Err(DomainError::Repository(
                "merge data must be a JSON object".to_string(),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO documents (collection, doc_key, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, doc_key)
            DO UPDATE SET data = documents.data || EXCLUDED.data, updated_at = NOW()
            "#,
        )
        .bind(collection)
        .bind(key)
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }
}
