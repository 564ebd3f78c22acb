//! Session validator adapters.

mod mock;
mod static_session;

pub use mock::MockSessionValidator;
pub use static_session::StaticSessionValidator;
