//! Session authentication configuration
//!
//! Identity management proper (login, token issuance, refresh) is an external
//! collaborator. The gateway only needs enough configuration to drive the
//! built-in `StaticSessionValidator`: one accepted session token and the
//! upstream credential it resolves to. Deployments with a real identity
//! provider wire their own `SessionValidator` instead and can leave this
//! section empty.

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;

/// Session authentication configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    /// Session token accepted by the static validator
    pub session_token: Option<Secret<String>>,

    /// Upstream bearer credential resolved for a valid session
    pub upstream_api_key: Option<Secret<String>>,
}

impl AuthConfig {
    /// Check if the static validator is fully configured
    pub fn has_static_session(&self) -> bool {
        self.session_token.is_some() && self.upstream_api_key.is_some()
    }

    /// Validate auth configuration
    ///
    /// Both values are required: the binary has no other session collaborator
    /// to fall back on, and a gateway that cannot resolve an upstream
    /// credential cannot forward anything.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_token.is_none() {
            return Err(ValidationError::MissingRequired(
                "AI_CONSOLE__AUTH__SESSION_TOKEN",
            ));
        }
        if self.upstream_api_key.is_none() {
            return Err(ValidationError::MissingRequired(
                "AI_CONSOLE__AUTH__UPSTREAM_API_KEY",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_auth_config_fails_validation() {
        let config = AuthConfig::default();
        assert!(!config.has_static_session());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(
                "AI_CONSOLE__AUTH__SESSION_TOKEN"
            ))
        ));
    }

    #[test]
    fn test_missing_credential_fails_validation() {
        let config = AuthConfig {
            session_token: Some(Secret::new("session".to_string())),
            upstream_api_key: None,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(
                "AI_CONSOLE__AUTH__UPSTREAM_API_KEY"
            ))
        ));
    }

    #[test]
    fn test_full_auth_config_validates() {
        let config = AuthConfig {
            session_token: Some(Secret::new("session".to_string())),
            upstream_api_key: Some(Secret::new("sk-upstream".to_string())),
        };
        assert!(config.has_static_session());
        assert!(config.validate().is_ok());
    }
}
