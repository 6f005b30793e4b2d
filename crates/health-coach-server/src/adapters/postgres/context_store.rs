//! PostgreSQL implementation of ContextStore

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;

use health_coach::{
    CallerIdentity, ChatTurn, ContextStore, DomainError, NutritionRequest, RoutineRequest, Stamped,
    UserContext,
};

use super::PgDocumentStore;

const COLLECTION: &str = "user_context";

/// PostgreSQL implementation of ContextStore
pub struct PgContextStore {
    documents: PgDocumentStore,
}

impl PgContextStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            documents: PgDocumentStore::new(pool),
        }
    }

    async fn merge_field<T: Serialize>(
        &self,
        identity: &CallerIdentity,
        field: &str,
        value: &T,
    ) -> Result<(), DomainError> {
        let value = serde_json::to_value(value)
            .map_err(|e| DomainError::Repository(format!("Failed to encode {field}: {e}")))?;

        let mut patch = serde_json::Map::new();
        patch.insert(field.to_string(), value);

        self.documents
            .merge(COLLECTION, identity.as_str(), &Value::Object(patch))
            .await
    }
}

#[async_trait]
impl ContextStore for PgContextStore {
    async fn get(&self, identity: &CallerIdentity) -> Result<Option<UserContext>, DomainError> {
        let Some(data) = self.documents.get(COLLECTION, identity.as_str()).await? else {
            return Ok(None);
        };

        serde_json::from_value(data)
            .map(Some)
            .map_err(|e| DomainError::Repository(format!("Corrupt user context: {e}")))
    }

    async fn merge_routine(
        &self,
        identity: &CallerIdentity,
        request: &RoutineRequest,
    ) -> Result<(), DomainError> {
        self.merge_field(identity, UserContext::ROUTINE_FIELD, &Stamped::now(request))
            .await
    }

    async fn merge_nutrition(
        &self,
        identity: &CallerIdentity,
        request: &NutritionRequest,
    ) -> Result<(), DomainError> {
        self.merge_field(identity, UserContext::NUTRITION_FIELD, &Stamped::now(request))
            .await
    }

    async fn merge_chat_turn(
        &self,
        identity: &CallerIdentity,
        message: &str,
        response: &str,
    ) -> Result<(), DomainError> {
        self.merge_field(identity, UserContext::CHAT_FIELD, &ChatTurn::now(message, response))
            .await
    }
}
