//! Mock session validator for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{AuthError, AuthenticatedSession, SessionValidator};

/// Mock session validator backed by an in-memory token map.
///
/// Unknown tokens fail with `InvalidToken`; `failing()` simulates an
/// unavailable identity collaborator.
#[derive(Debug, Clone, Default)]
pub struct MockSessionValidator {
    sessions: Arc<Mutex<HashMap<String, AuthenticatedSession>>>,
    unavailable: bool,
}

impl MockSessionValidator {
    /// Creates a validator that rejects every token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token/session pair.
    pub fn with_session(self, token: impl Into<String>, session: AuthenticatedSession) -> Self {
        self.sessions.lock().unwrap().insert(token.into(), session);
        self
    }

    /// Creates a validator that reports the identity service as down.
    pub fn failing() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            unavailable: true,
        }
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedSession, AuthError> {
        if self.unavailable {
            return Err(AuthError::ServiceUnavailable(
                "mock identity service down".to_string(),
            ));
        }
        self.sessions
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves_session() {
        let validator = MockSessionValidator::new()
            .with_session("tok", AuthenticatedSession::new("user-1", "secret"));

        let session = validator.validate("tok").await.unwrap();
        assert_eq!(session.subject, "user-1");
        assert_eq!(session.access_token(), "secret");
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert!(matches!(
            validator.validate("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn failing_validator_reports_unavailable() {
        let validator = MockSessionValidator::failing();
        assert!(matches!(
            validator.validate("tok").await,
            Err(AuthError::ServiceUnavailable(_))
        ));
    }
}
