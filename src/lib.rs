//! AI Console - a chat client core with an authenticated forwarding gateway.
//!
//! Two halves, joined by the completion-client port:
//!
//! - The **gateway** exposes a same-origin HTTP surface under a reserved
//!   path prefix, validates the caller's session, swaps the session token
//!   for the real upstream credential, and streams the request through to
//!   the completion service.
//! - The **conversation controller** owns one conversation's state
//!   (messages, draft, single in-flight request) and drives completion
//!   turns through the port, surfacing failures as visible error messages.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod ports;
