//! Completion - The uniform result of every coaching flow

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Completion result returned to callers and stored in the response cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompletionResult {
    /// Generated coaching text
    pub output: String,
    /// Model identifier reported by the provider
    pub model: String,
    /// Unix time in seconds (fractional) when the completion was received
    pub timestamp: f64,
}

impl CompletionResult {
    /// Create a result stamped with the current time
    pub fn new(output: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            model: model.into(),
            timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
        }
    }
}
