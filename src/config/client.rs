//! Completion client configuration
//!
//! Settings for the controller-side `HttpCompletionClient`: where the
//! gateway's OpenAI-compatible surface lives, which model to request, and
//! which context policy the conversation controller applies. The credential
//! is deliberately absent here; it is injected separately so the client-side
//! object never embeds a secret.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::conversation::ContextPolicy;

/// Completion client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the gateway's completion surface
    /// (e.g. `http://localhost:3000/ai/v1`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with each completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional provider routing hint sent as the `x-llm-provider` header
    /// (e.g. `anthropic_vertex_ai`)
    pub provider_hint: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// How much conversation context each turn sends upstream
    #[serde(default)]
    pub context_policy: ContextPolicy,
}

impl ClientConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate client configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty()
            || !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
        {
            return Err(ValidationError::InvalidUrl("client.base_url"));
        }
        if self.model.is_empty() {
            return Err(ValidationError::MissingRequired("AI_CONSOLE__CLIENT__MODEL"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            provider_hint: None,
            timeout_secs: default_timeout(),
            context_policy: ContextPolicy::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/ai/v1".to_string()
}

fn default_model() -> String {
    "claude-3-5-sonnet@20240620".to_string()
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000/ai/v1");
        assert_eq!(config.model, "claude-3-5-sonnet@20240620");
        assert_eq!(config.context_policy, ContextPolicy::LatestOnly);
        assert!(config.provider_hint.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_model() {
        let config = ClientConfig {
            model: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let config = ClientConfig {
            base_url: "localhost:3000".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidUrl("client.base_url"))
        ));
    }
}
