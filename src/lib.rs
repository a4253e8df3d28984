//! discord-notifier - Discord alert provider for endpoint health monitoring
//!
//! This library resolves the webhook an alert should go to, renders the alert
//! as a Discord embed, and delivers it.
pub mod cli;
pub mod config;
pub mod core;
pub mod notification;

// Re-export core types for convenience
pub use crate::core::*;
