//! Chat - Free-form coaching conversation

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::ChatMessage;
use crate::domain::errors::DomainError;

/// Chat request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    /// Used only when no bearer token is supplied
    #[serde(default)]
    pub user_id: Option<String>,
    /// Accepted for client compatibility; not replayed to the model
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.message.trim().is_empty() {
            return Err(DomainError::validation("message must not be blank"));
        }
        Ok(())
    }
}
