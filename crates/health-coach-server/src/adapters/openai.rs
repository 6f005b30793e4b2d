//! OpenAI-compatible Completion Client
//!
//! Sends one chat-completion request per prompt using reqwest.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use health_coach::{
    ChatMessage, CompletionProvider, CompletionResult, CompletionSettings, DomainError,
};

use crate::config::AppConfig;
use crate::telemetry::truncate_for_log;

/// Chat-completion client for any OpenAI-compatible endpoint
pub struct OpenAiCompletionClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    settings: CompletionSettings,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    top_p: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Deserialize)]
struct ChatCompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompletionClient {
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.llm_timeout)
            .build()
            .map_err(|e| DomainError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.llm_api_url.clone(),
            api_key: config.llm_api_key.clone(),
            settings: config.completion.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<CompletionResult, DomainError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            DomainError::Configuration(
                "LLM API key not configured. Please set the LLM_API_KEY environment variable."
                    .to_string(),
            )
        })?;

        let request = ChatCompletionRequest {
            model: &self.settings.model,
            messages: self.settings.messages(prompt),
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
            stream: self.settings.stream,
        };

        tracing::info!(
            url = %self.api_url,
            model = %self.settings.model,
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Network error calling LLM API");
                DomainError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %truncate_for_log(&body),
                "LLM API returned an error"
            );
            return Err(DomainError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Unexpected(format!("Malformed LLM API response: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                DomainError::Unexpected("LLM API response contained no message content".to_string())
            })?;

        tracing::info!(model = %completion.model, "Received completion");

        Ok(CompletionResult::new(content, completion.model))
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        &self.settings.model
    }
}
