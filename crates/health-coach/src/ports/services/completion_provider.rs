//! Completion Provider Port
//!
//! Abstract interface for LLM completions. One prompt in, one
//! [`CompletionResult`] out; the persona and sampling parameters are fixed
//! per provider instance.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::DomainError, prompt_builder::COACH_PERSONA, ChatMessage, CompletionResult,
};

/// Process-wide sampling settings for every completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// Model requested from the provider
    pub model: String,
    /// System persona prepended to every prompt
    pub system_prompt: String,
    /// Temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Top-p sampling
    pub top_p: f32,
    pub stream: bool,
}

impl CompletionSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// System persona followed by the user prompt
    pub fn messages(&self, prompt: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(prompt),
        ]
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            system_prompt: COACH_PERSONA.to_string(),
            temperature: 0.5,
            top_p: 1.0,
            stream: false,
        }
    }
}

/// LLM completion provider
///
/// Implementations must fail with [`DomainError::Configuration`] before any
/// network activity when they have no credential, with
/// [`DomainError::Upstream`] on a non-success status, and with
/// [`DomainError::Transport`] when the provider cannot be reached.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete a single user prompt under the configured persona
    async fn complete(&self, prompt: &str) -> Result<CompletionResult, DomainError>;

    /// Get the provider name (e.g., "openai")
    fn provider_name(&self) -> &str;

    /// Get the model ID being requested
    fn model_id(&self) -> &str;
}
