//! Adapters - concrete implementations of the ports.

pub mod auth;
pub mod completion;
