//! HTTP completion client.
//!
//! Implements the `CompletionClient` port against an OpenAI-compatible
//! chat-completions surface - normally the forwarding gateway's reserved
//! prefix, so the credential this client carries is a session token, never
//! the upstream secret. Both the base URL and the credential provider are
//! injected at construction.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::ports::{
    CompletionClient, CompletionError, CompletionRequest, CompletionResponse, CredentialProvider,
    PROVIDER_HINT_HEADER,
};

/// Configuration for the HTTP completion client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the completion surface (e.g. `http://localhost:3000/ai/v1`).
    pub base_url: String,
    /// Optional provider routing hint.
    pub provider_hint: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpClientConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            provider_hint: None,
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the provider routing hint.
    pub fn with_provider_hint(mut self, hint: impl Into<String>) -> Self {
        self.provider_hint = Some(hint.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&ClientConfig> for HttpClientConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            provider_hint: config.provider_hint.clone(),
            timeout: config.timeout(),
        }
    }
}

/// Credential provider returning a fixed bearer token.
pub struct StaticCredential(Secret<String>);

impl StaticCredential {
    /// Wraps a bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Secret::new(token.into()))
    }
}

impl CredentialProvider for StaticCredential {
    fn bearer_token(&self) -> Secret<String> {
        self.0.clone()
    }
}

/// `CompletionClient` implementation over HTTP.
pub struct HttpCompletionClient {
    config: HttpClientConfig,
    credentials: Arc<dyn CredentialProvider>,
    client: Client,
}

impl HttpCompletionClient {
    /// Creates a client with the given configuration and credential source.
    pub fn new(config: HttpClientConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            credentials,
            client,
        }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn map_send_error(&self, err: reqwest::Error) -> CompletionError {
        if err.is_timeout() {
            CompletionError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if err.is_connect() {
            CompletionError::unreachable(format!("connection failed: {}", err))
        } else {
            CompletionError::unreachable(err.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let token = self.credentials.bearer_token();
        let mut outbound = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", token.expose_secret()))
            .header("Content-Type", "application/json")
            .json(&request);

        if let Some(ref hint) = self.config.provider_hint {
            outbound = outbound.header(PROVIDER_HINT_HEADER, hint);
        }

        let response = outbound.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(CompletionError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::upstream(status.as_u16(), message));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::malformed(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::malformed("no choices in response"))?;

        Ok(CompletionResponse {
            content: choice.message.content,
            model: completion.model,
        })
    }
}

// ----- Wire types -----

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: Option<String>,
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}
