//! Static session validator.
//!
//! Single-session stand-in for a real identity collaborator: one accepted
//! session token, one upstream credential, both from configuration. Suitable
//! for development and single-operator deployments; anything multi-user wires
//! its own `SessionValidator` against a real identity provider.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use crate::config::{AuthConfig, ValidationError};
use crate::ports::{AuthError, AuthenticatedSession, SessionValidator};

/// Subject reported for the configured static session.
const STATIC_SUBJECT: &str = "console";

/// Session validator accepting exactly one configured token.
pub struct StaticSessionValidator {
    session_token: Secret<String>,
    upstream_api_key: Secret<String>,
}

impl StaticSessionValidator {
    /// Creates a validator from explicit values.
    pub fn new(session_token: impl Into<String>, upstream_api_key: impl Into<String>) -> Self {
        Self {
            session_token: Secret::new(session_token.into()),
            upstream_api_key: Secret::new(upstream_api_key.into()),
        }
    }

    /// Builds the validator from the auth configuration section.
    ///
    /// # Errors
    ///
    /// `MissingRequired` when the section is incomplete.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ValidationError> {
        let session_token = config.session_token.as_ref().ok_or(
            ValidationError::MissingRequired("AI_CONSOLE__AUTH__SESSION_TOKEN"),
        )?;
        let upstream_api_key = config.upstream_api_key.as_ref().ok_or(
            ValidationError::MissingRequired("AI_CONSOLE__AUTH__UPSTREAM_API_KEY"),
        )?;

        Ok(Self {
            session_token: session_token.clone(),
            upstream_api_key: upstream_api_key.clone(),
        })
    }
}

#[async_trait]
impl SessionValidator for StaticSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedSession, AuthError> {
        if token == self.session_token.expose_secret() {
            Ok(AuthenticatedSession::new(
                STATIC_SUBJECT,
                self.upstream_api_key.expose_secret().clone(),
            ))
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}
