//! Ports - trait boundaries between the core and its collaborators.

mod completion_client;
mod session_validator;

pub use completion_client::{
    ChatMessage, ChatRole, CompletionClient, CompletionError, CompletionRequest,
    CompletionResponse, CredentialProvider, PROVIDER_HINT_HEADER,
};
pub use session_validator::{AuthError, AuthenticatedSession, SessionValidator};
