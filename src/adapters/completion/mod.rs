//! Completion client adapters.

mod http_client;
mod mock;

pub use http_client::{HttpClientConfig, HttpCompletionClient, StaticCredential};
pub use mock::MockCompletionClient;
