//! Session Validator Port - the gate in front of the forwarding gateway.
//!
//! Identity management (login, token issuance, refresh) lives elsewhere; the
//! gateway only asks this port two things per request: is this session token
//! valid, and which upstream bearer credential does it resolve to. The
//! credential never leaves the server side.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

/// Port for validating inbound session tokens.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates a session token and resolves its upstream credential.
    async fn validate(&self, token: &str) -> Result<AuthenticatedSession, AuthError>;
}

/// A validated session with its server-side upstream credential.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// Subject identifier of the session owner.
    pub subject: String,
    /// Bearer credential for the upstream completion service.
    access_token: Secret<String>,
}

impl AuthenticatedSession {
    /// Creates a validated session.
    pub fn new(subject: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            access_token: Secret::new(access_token.into()),
        }
    }

    /// Exposes the upstream credential (for building the outbound request).
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }
}

/// Session validation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The token is unknown, expired, or malformed.
    #[error("invalid session token")]
    InvalidToken,

    /// The identity collaborator could not be reached.
    #[error("authentication service unavailable: {0}")]
    ServiceUnavailable(String),
}
