//! Delivery of alert transitions to Discord.
//!
//! The work is split in three parts: `resolver` picks the webhook URL for a
//! group, `message` turns an alert into an embed payload, and `discord` ties
//! them together and performs the HTTP call.
pub mod discord;
pub mod message;
pub mod resolver;

use thiserror::Error;

pub use discord::DiscordAlertProvider;
pub use message::{Body, Embed, Field, MessageBuilder};
pub use resolver::{SecretLookup, SecretObserver, TracingSecretObserver, WebhookResolver};

#[derive(Error, Debug)]
pub enum NotificationError {
    /// The request could not be built or sent, or no response was received.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The webhook answered with a status code of 400 or above.
    #[error("call to provider alert returned status code {status}: {body}")]
    Rejected { status: u16, body: String },
}
