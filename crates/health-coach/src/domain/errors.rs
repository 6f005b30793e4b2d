//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// Required configuration (e.g. the provider credential) is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The LLM provider answered with a non-success status
    #[error("LLM API error: {body}")]
    Upstream { status: u16, body: String },

    /// The LLM provider could not be reached
    #[error("Failed to connect to LLM API: {0}")]
    Transport(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl DomainError {
    /// HTTP status this error surfaces as.
    pub fn http_status(&self) -> u16 {
        match self {
            DomainError::Upstream { status, .. } if (100..=599).contains(status) => *status,
            DomainError::Transport(_) => 503,
            DomainError::Validation(_) => 400,
            _ => 500,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
