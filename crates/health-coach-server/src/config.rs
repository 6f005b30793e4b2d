//! Server configuration
//!
//! Loaded once at startup and shared read-only afterwards.

use std::str::FromStr;
use std::time::Duration;

use health_coach::{CompletionSettings, CACHE_TTL_SECS};
use thiserror::Error;

pub const DEFAULT_LLM_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Browser origins allowed to call the API
pub const ALLOWED_ORIGINS: [&str; 6] = [
    "https://bbxsh-93b83.web.app",
    "http://localhost:51295",
    "http://127.0.0.1:8000",
    "https://localhost:3000",
    "https://www.spir.health",
    "https://staging.spir.health",
];

/// What to do when caching or context persistence fails after a successful completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistencePolicy {
    /// Log the failure and still return the completion
    #[default]
    BestEffort,
    /// Fail the whole request
    Strict,
}

impl FromStr for PersistencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "best_effort" | "best-effort" => Ok(PersistencePolicy::BestEffort),
            "strict" => Ok(PersistencePolicy::Strict),
            _ => Err(format!("Unknown persistence policy: {}", s)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    pub llm_api_url: String,
    pub llm_api_key: Option<String>,
    /// Upper bound on a single provider call
    pub llm_timeout: Duration,
    pub completion: CompletionSettings,
    pub cache_ttl: chrono::Duration,
    pub persistence_policy: PersistencePolicy,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Build from a key lookup (secret store, environment, test map).
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_api_url = get("LLM_API_URL").unwrap_or_else(|| {
            tracing::warn!("LLM_API_URL is not set, using {}", DEFAULT_LLM_API_URL);
            DEFAULT_LLM_API_URL.to_string()
        });

        let llm_api_key = get("LLM_API_KEY");
        if llm_api_key.is_none() {
            tracing::error!("LLM_API_KEY is not set, completion requests will fail");
        }

        let llm_timeout = match get("LLM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    key: "LLM_TIMEOUT_SECS",
                    reason: format!("{e}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: "LLM_TIMEOUT_SECS",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        };

        let mut completion = CompletionSettings::default();
        if let Some(model) = get("LLM_MODEL") {
            completion = completion.with_model(model);
        }

        let persistence_policy = match get("PERSISTENCE_FAILURE_POLICY") {
            Some(raw) => raw.parse::<PersistencePolicy>().map_err(|reason| ConfigError::Invalid {
                key: "PERSISTENCE_FAILURE_POLICY",
                reason,
            })?,
            None => PersistencePolicy::default(),
        };

        Ok(Self {
            llm_api_url,
            llm_api_key,
            llm_timeout,
            completion,
            cache_ttl: chrono::Duration::seconds(CACHE_TTL_SECS),
            persistence_policy,
            allowed_origins: ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("llm_api_url", &self.llm_api_url)
            .field(
                "llm_api_key",
                &self.llm_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("llm_timeout", &self.llm_timeout)
            .field("completion", &self.completion)
            .field("cache_ttl", &self.cache_ttl)
            .field("persistence_policy", &self.persistence_policy)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.llm_api_url, DEFAULT_LLM_API_URL);
        assert!(config.llm_api_key.is_none());
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
        assert_eq!(config.cache_ttl, chrono::Duration::seconds(86_400));
        assert_eq!(config.persistence_policy, PersistencePolicy::BestEffort);
        assert_eq!(config.completion.model, "gpt-4o");
        assert_eq!(config.allowed_origins.len(), ALLOWED_ORIGINS.len());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("LLM_API_URL", "http://localhost:9000/v1/chat/completions"),
            ("LLM_API_KEY", "sk-test"),
            ("LLM_MODEL", "gpt-4o-mini"),
            ("LLM_TIMEOUT_SECS", "15"),
            ("PERSISTENCE_FAILURE_POLICY", "strict"),
        ])
        .unwrap();
        assert_eq!(config.llm_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.llm_timeout, Duration::from_secs(15));
        assert_eq!(config.persistence_policy, PersistencePolicy::Strict);
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = config_from(&[("LLM_API_KEY", "  ")]).unwrap();
        assert!(config.llm_api_key.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("LLM_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("LLM_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("PERSISTENCE_FAILURE_POLICY", "maybe")]).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = config_from(&[("LLM_API_KEY", "sk-very-secret")]).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
