//! Upstream completion service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the upstream completion service the gateway forwards to
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream completion service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Reserved path prefix under which the gateway forwards requests.
    /// A request to `/{path_prefix}/v1/chat/completions` is forwarded to
    /// `{base_url}/v1/chat/completions`.
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,

    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Get the upstream timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate upstream configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty()
            || !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
        {
            return Err(ValidationError::InvalidUrl("upstream.base_url"));
        }
        if self.path_prefix.is_empty() || self.path_prefix.contains('/') {
            return Err(ValidationError::InvalidPathPrefix(self.path_prefix.clone()));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path_prefix: default_path_prefix(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_path_prefix() -> String {
    "ai".to_string()
}

fn default_timeout() -> u64 {
    60
}
