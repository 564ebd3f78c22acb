//! Conversation domain - messages, session state, and the submit sequencer.

mod controller;
mod message;
mod state;

pub use controller::{Canceller, ContextPolicy, ConversationController, SubmitError};
pub use message::{Message, Role};
pub use state::{ConversationSnapshot, ConversationState, Phase};
