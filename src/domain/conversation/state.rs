//! Conversation state and the submit phase machine.
//!
//! A conversation session holds an append-only message list, the unsent draft
//! text, and a two-phase submission state: `Idle` (input enabled) and
//! `Sending` (exactly one completion request in flight, input disabled).
//! There is no retry phase and no queued-request phase.

use serde::{Deserialize, Serialize};

use super::message::Message;

/// Submission phase of a conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No request in flight; submissions are accepted.
    #[default]
    Idle,

    /// One completion request in flight; further submissions are no-ops.
    Sending,
}

impl Phase {
    /// Returns true if a submission may begin in this phase.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a request is in flight.
    pub fn is_sending(&self) -> bool {
        matches!(self, Self::Sending)
    }
}

/// In-memory state of one conversation session.
///
/// Created when a chat session mounts, lives for the session's duration.
/// Messages grow monotonically; only the draft is freely mutable.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    /// Ordered message list, append-only.
    pub messages: Vec<Message>,
    /// Current unsent input text.
    pub draft: String,
    /// Submission phase.
    pub phase: Phase,
}

impl ConversationState {
    /// Creates an empty session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while exactly one completion request is in flight.
    pub fn pending(&self) -> bool {
        self.phase.is_sending()
    }

    /// Takes an immutable snapshot for observers.
    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            messages: self.messages.clone(),
            draft: self.draft.clone(),
            pending: self.pending(),
        }
    }
}

/// Observable snapshot emitted on every state mutation.
///
/// The presentation layer renders from these; `pending` doubles as the
/// input-disabled flag (disabled exactly while a request is in flight).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ConversationSnapshot {
    /// Ordered message list at snapshot time.
    pub messages: Vec<Message>,
    /// Unsent draft text at snapshot time.
    pub draft: String,
    /// Whether a completion request is in flight.
    pub pending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(Phase::default(), Phase::Idle);
        assert!(Phase::Idle.accepts_submission());
        assert!(!Phase::Idle.is_sending());
    }

    #[test]
    fn sending_rejects_submission() {
        assert!(!Phase::Sending.accepts_submission());
        assert!(Phase::Sending.is_sending());
    }

    #[test]
    fn pending_tracks_phase() {
        let mut state = ConversationState::new();
        assert!(!state.pending());

        state.phase = Phase::Sending;
        assert!(state.pending());
    }

    #[test]
    fn snapshot_captures_current_state() {
        let mut state = ConversationState::new();
        state.messages.push(Message::user("hello"));
        state.draft = "next".to_string();
        state.phase = Phase::Sending;

        let snapshot = state.snapshot();
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(snapshot.draft, "next");
        assert!(snapshot.pending);
    }

    #[test]
    fn phase_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Phase::Idle).unwrap(), "\"idle\"");
        assert_eq!(
            serde_json::to_string(&Phase::Sending).unwrap(),
            "\"sending\""
        );
    }
}
