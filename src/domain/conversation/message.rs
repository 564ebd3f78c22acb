//! Message entity for conversations.
//!
//! Messages are immutable records within a conversation. The message list's
//! order is both display order and causal order; entries are append-only for
//! the lifetime of a session.

use serde::{Deserialize, Serialize};

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User input.
    User,
    /// Assistant (model) response.
    Assistant,
    /// A surfaced failure. Rendered in the stream instead of being swallowed.
    Error,
}

impl Role {
    /// Returns true if this role participates in upstream completion context.
    pub fn is_conversational(&self) -> bool {
        matches!(self, Self::User | Self::Assistant)
    }
}

/// An immutable message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    text: String,
}

impl Message {
    /// Creates a new message with the given role and text.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Creates an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Creates an error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Role::Error, text)
    }

    /// The role of the message sender.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The message text.
    pub fn text(&self) -> &str {
        &self.text
    }
}
