//! Conversation controller - single-flight request sequencing.
//!
//! The controller owns the mutable [`ConversationState`] and orchestrates
//! exactly one completion request at a time: `submit` appends the user
//! message, enters `Sending`, awaits the completion client, then appends the
//! reply (or a surfaced error) and returns to `Idle`. The `&mut self`
//! receiver makes a second in-flight request unrepresentable; the phase guard
//! keeps the invariant explicit for callers that bypass the borrow checker
//! with interior mutability.
//!
//! Observers receive a [`ConversationSnapshot`] over a `tokio::sync::watch`
//! channel on every mutation, which is the whole presentation-layer contract:
//! render `messages`, mirror `draft`, disable input while `pending`.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::{watch, Notify};

use super::message::{Message, Role};
use super::state::{ConversationSnapshot, ConversationState, Phase};
use crate::ports::{
    ChatMessage, ChatRole, CompletionClient, CompletionError, CompletionRequest,
};

/// How much conversation context each turn sends to the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContextPolicy {
    /// Send only the just-submitted user message (stateless turns).
    #[default]
    LatestOnly,

    /// Resend all prior user/assistant turns plus the new message.
    FullHistory,
}

/// Errors returned by [`ConversationController::submit`].
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The draft was empty or whitespace-only. Nothing was mutated and no
    /// request was issued.
    #[error("draft is empty")]
    EmptyDraft,

    /// A request is already in flight. The submission is a no-op.
    #[error("a completion request is already in flight")]
    RequestInFlight,

    /// The in-flight request was cancelled. State returned to idle with no
    /// assistant message appended.
    #[error("submission cancelled")]
    Cancelled,

    /// The completion request failed. An error entry was appended to the
    /// message stream.
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Handle for aborting an in-flight submission.
///
/// Obtained from [`ConversationController::canceller`] before `submit` is
/// awaited; calling [`cancel`](Canceller::cancel) wakes the controller, which
/// drops the network call and restores `Idle`. Cancelling while idle does
/// nothing.
#[derive(Clone)]
pub struct Canceller(Arc<Notify>);

impl Canceller {
    /// Aborts the in-flight submission, if any.
    pub fn cancel(&self) {
        self.0.notify_waiters();
    }
}

/// Drives one conversation session against a completion client.
pub struct ConversationController {
    state: ConversationState,
    client: Arc<dyn CompletionClient>,
    model: String,
    policy: ContextPolicy,
    cancel: Arc<Notify>,
    snapshots: watch::Sender<ConversationSnapshot>,
}

impl ConversationController {
    /// Creates a controller for a fresh session.
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        let state = ConversationState::new();
        let (snapshots, _) = watch::channel(state.snapshot());

        Self {
            state,
            client,
            model: model.into(),
            policy: ContextPolicy::default(),
            cancel: Arc::new(Notify::new()),
            snapshots,
        }
    }

    /// Sets the context policy.
    pub fn with_context_policy(mut self, policy: ContextPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Subscribes to state snapshots. Every mutation publishes one.
    pub fn subscribe(&self) -> watch::Receiver<ConversationSnapshot> {
        self.snapshots.subscribe()
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> ConversationSnapshot {
        self.state.snapshot()
    }

    /// Hands out a cancellation handle for the next in-flight submission.
    pub fn canceller(&self) -> Canceller {
        Canceller(Arc::clone(&self.cancel))
    }

    /// Updates the unsent draft text (one call per keystroke is fine).
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.draft = text.into();
        self.publish();
    }

    /// Submits the current draft as one conversation turn.
    ///
    /// Appends the user message and clears the draft before the network call
    /// begins, issues exactly one completion request, then appends the
    /// assistant reply on success or a [`Role::Error`] entry on failure.
    /// Either way the phase returns to `Idle` before this method resolves.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::EmptyDraft`] for empty/whitespace drafts (no mutation,
    ///   no network call)
    /// - [`SubmitError::RequestInFlight`] while `Sending` (no-op)
    /// - [`SubmitError::Cancelled`] if the [`Canceller`] fired
    /// - [`SubmitError::Completion`] when the completion client fails
    pub async fn submit(&mut self) -> Result<Message, SubmitError> {
        if !self.state.phase.accepts_submission() {
            return Err(SubmitError::RequestInFlight);
        }
        if self.state.draft.trim().is_empty() {
            return Err(SubmitError::EmptyDraft);
        }

        // Register the cancel waiter before mutating state: `notify_waiters`
        // only wakes already-registered waiters, so registration must precede
        // any point at which an observer could react to this submission.
        let cancel = Arc::clone(&self.cancel);
        let cancelled = cancel.notified();
        tokio::pin!(cancelled);
        cancelled.as_mut().enable();

        let text = std::mem::take(&mut self.state.draft);
        self.state.messages.push(Message::user(text.clone()));
        self.state.phase = Phase::Sending;
        self.publish();

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: self.context_messages(&text),
        };

        let client = Arc::clone(&self.client);
        let outcome = tokio::select! {
            result = client.complete(request) => Some(result),
            _ = &mut cancelled => None,
        };

        self.state.phase = Phase::Idle;
        match outcome {
            Some(Ok(response)) => {
                let reply = Message::assistant(response.content);
                self.state.messages.push(reply.clone());
                self.publish();
                Ok(reply)
            }
            Some(Err(err)) => {
                tracing::warn!(error = %err, "completion request failed");
                self.state.messages.push(Message::error(err.to_string()));
                self.publish();
                Err(SubmitError::Completion(err))
            }
            None => {
                tracing::debug!("in-flight submission cancelled");
                self.publish();
                Err(SubmitError::Cancelled)
            }
        }
    }

    /// Builds the upstream message context for one turn under the configured
    /// policy. The just-submitted user message is already in `state.messages`
    /// when this runs.
    fn context_messages(&self, latest: &str) -> Vec<ChatMessage> {
        match self.policy {
            ContextPolicy::LatestOnly => vec![ChatMessage::user(latest)],
            ContextPolicy::FullHistory => self
                .state
                .messages
                .iter()
                .filter(|m| m.role().is_conversational())
                .map(|m| match m.role() {
                    Role::Assistant => ChatMessage::assistant(m.text()),
                    _ => ChatMessage::user(m.text()),
                })
                .collect(),
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.snapshot());
    }

    #[cfg(test)]
    pub(crate) fn force_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
    }
}
