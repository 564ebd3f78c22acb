//! Completion Client Port - interface to the completion service.
//!
//! The conversation controller talks to this port only; whether the other
//! side is the forwarding gateway, a direct provider API, or a test mock is
//! an adapter concern. The error taxonomy keeps "service down"
//! ([`CompletionError::Unreachable`]) distinguishable from "request rejected"
//! ([`CompletionError::Upstream`]).

use async_trait::async_trait;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

/// Provider routing hint header. Set by the client when configured, passed
/// through by the gateway for upstreams that route on it.
pub const PROVIDER_HINT_HEADER: &str = "x-llm-provider";

/// Port for issuing one completion request per conversation turn.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a single completion (request/response, no streaming).
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;
}

/// Supplies the bearer credential attached to outgoing completion requests.
///
/// Injected into clients at construction so no client object ever embeds a
/// fixed key. For the browser-analogue client this is the session token; the
/// real upstream credential is resolved server-side by the gateway.
pub trait CredentialProvider: Send + Sync {
    /// Resolve the current bearer credential.
    fn bearer_token(&self) -> Secret<String>;
}

/// A chat-completions request for one conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    /// Model identifier understood by the upstream service.
    pub model: String,
    /// Ordered message context for this turn.
    pub messages: Vec<ChatMessage>,
}

/// A message in the wire-level completion context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who authored this context entry.
    pub role: ChatRole,
    /// Entry content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a user context entry.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant context entry.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Role of a wire-level context entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instructions.
    System,
    /// User input.
    User,
    /// Assistant response.
    Assistant,
}

/// Response to a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Generated assistant text.
    pub content: String,
    /// Model that produced the response, when reported.
    pub model: Option<String>,
}

/// Completion client errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    /// The session/credential was rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The completion service could not be reached at all.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The request ran past the configured deadline.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// The service answered with a non-success status.
    #[error("upstream rejected the request (status {status}): {message}")]
    Upstream {
        /// HTTP status returned.
        status: u16,
        /// Error details, if any.
        message: String,
    },

    /// The service answered, but not with a parseable completion.
    #[error("malformed completion response: {0}")]
    Malformed(String),
}

impl CompletionError {
    /// Creates an unreachable error.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable(message.into())
    }

    /// Creates an upstream rejection error.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Creates a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Returns true if the failure happened before any upstream answer
    /// (service down, as opposed to request rejected).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_constructors_set_roles() {
        assert_eq!(ChatMessage::user("hi").role, ChatRole::User);
        assert_eq!(ChatMessage::assistant("hello").role, ChatRole::Assistant);
    }

    #[test]
    fn chat_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&ChatRole::System).unwrap(),
            "\"system\""
        );
    }

    #[test]
    fn request_serializes_to_chat_completions_shape() {
        let request = CompletionRequest {
            model: "test-model".to_string(),
            messages: vec![ChatMessage::user("hello")],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn transport_classification() {
        assert!(CompletionError::unreachable("refused").is_transport());
        assert!(CompletionError::Timeout { timeout_secs: 60 }.is_transport());

        assert!(!CompletionError::Unauthorized.is_transport());
        assert!(!CompletionError::upstream(500, "boom").is_transport());
        assert!(!CompletionError::malformed("not json").is_transport());
    }

    #[test]
    fn errors_display_their_context() {
        assert_eq!(
            CompletionError::upstream(503, "overloaded").to_string(),
            "upstream rejected the request (status 503): overloaded"
        );
        assert_eq!(
            CompletionError::Timeout { timeout_secs: 30 }.to_string(),
            "request timed out after 30s"
        );
    }
}
