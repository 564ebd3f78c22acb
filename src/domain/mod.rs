//! Domain layer - conversation state and sequencing rules.

pub mod conversation;
