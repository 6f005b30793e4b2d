//! Context Store Port
//!
//! Abstract interface for per-caller context persistence.

use async_trait::async_trait;

use crate::domain::{
    errors::DomainError, CallerIdentity, NutritionRequest, RoutineRequest, UserContext,
};

/// Repository interface for UserContext documents
///
/// Every `merge_*` writes only its own field (with a fresh timestamp) and
/// leaves sibling fields as they were.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Find the context for a caller
    async fn get(&self, identity: &CallerIdentity) -> Result<Option<UserContext>, DomainError>;

    /// Remember the caller's latest routine request
    async fn merge_routine(
        &self,
        identity: &CallerIdentity,
        request: &RoutineRequest,
    ) -> Result<(), DomainError>;

    /// Remember the caller's latest nutrition request
    async fn merge_nutrition(
        &self,
        identity: &CallerIdentity,
        request: &NutritionRequest,
    ) -> Result<(), DomainError>;

    /// Remember the caller's latest chat exchange
    async fn merge_chat_turn(
        &self,
        identity: &CallerIdentity,
        message: &str,
        response: &str,
    ) -> Result<(), DomainError>;
}
