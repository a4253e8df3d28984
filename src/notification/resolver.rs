//! Webhook URL resolution.
//!
//! Overrides are matched by group in the order they were declared. When none
//! match, the default URL is used; a default of the form `$NAME` is read from
//! the environment variable `NAME` the first time it is needed and cached for
//! the lifetime of the resolver.

use crate::config::{DiscordConfig, Override};
use std::env::VarError;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Marks a webhook URL that must be read from the environment.
pub const SECRET_PREFIX: &str = "$";

/// Outcome of reading a webhook URL from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretLookup {
    Found,
    NotSet,
    /// The variable is set but its value is not valid UTF-8.
    NotUnicode,
}

/// Gets told about every environment lookup made for a webhook URL.
///
/// Only the variable name and the outcome are reported, never the value.
pub trait SecretObserver: Send + Sync {
    fn secret_lookup(&self, variable: &str, outcome: SecretLookup);
}

/// Reports secret lookups as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSecretObserver;

impl SecretObserver for TracingSecretObserver {
    fn secret_lookup(&self, variable: &str, outcome: SecretLookup) {
        match outcome {
            SecretLookup::Found => {
                debug!(variable, "Read Discord webhook URL from environment");
            }
            SecretLookup::NotSet => {
                warn!(
                    variable,
                    "Environment variable for the Discord webhook URL is not set; notifications to the default webhook will fail"
                );
            }
            SecretLookup::NotUnicode => {
                warn!(
                    variable,
                    "Environment variable for the Discord webhook URL is not valid UTF-8; notifications to the default webhook will fail"
                );
            }
        }
    }
}

/// Picks the webhook URL to use for a group.
pub struct WebhookResolver {
    default_webhook_url: String,
    overrides: Vec<Override>,
    resolved_default: OnceLock<String>,
    observer: Arc<dyn SecretObserver>,
}

impl WebhookResolver {
    /// Creates a resolver that reports lookups through `tracing`.
    pub fn new(default_webhook_url: impl Into<String>, overrides: Vec<Override>) -> Self {
        Self {
            default_webhook_url: default_webhook_url.into(),
            overrides,
            resolved_default: OnceLock::new(),
            observer: Arc::new(TracingSecretObserver),
        }
    }

    pub fn from_config(config: &DiscordConfig) -> Self {
        Self::new(config.webhook_url.clone(), config.overrides.clone())
    }

    /// Replaces the observer notified of environment lookups.
    pub fn with_observer(mut self, observer: Arc<dyn SecretObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Returns the webhook URL for `group`.
    ///
    /// The first override whose group matches exactly wins. Otherwise the
    /// default URL is returned, which may be empty if it points to an
    /// environment variable that is not set.
    pub fn resolve(&self, group: &str) -> &str {
        if let Some(o) = self.overrides.iter().find(|o| o.group == group) {
            return &o.webhook_url;
        }
        self.default_webhook_url()
    }

    /// Returns whether an indirect default URL has already been read from
    /// the environment.
    pub fn is_default_resolved(&self) -> bool {
        self.resolved_default.get().is_some()
    }

    fn default_webhook_url(&self) -> &str {
        match self.default_webhook_url.strip_prefix(SECRET_PREFIX) {
            Some(variable) => self
                .resolved_default
                .get_or_init(|| self.lookup(variable)),
            None => &self.default_webhook_url,
        }
    }

    fn lookup(&self, variable: &str) -> String {
        let (value, outcome) = match std::env::var(variable) {
            Ok(value) => (value, SecretLookup::Found),
            Err(VarError::NotPresent) => (String::new(), SecretLookup::NotSet),
            Err(VarError::NotUnicode(_)) => (String::new(), SecretLookup::NotUnicode),
        };
        self.observer.secret_lookup(variable, outcome);
        value
    }
}

impl std::fmt::Debug for WebhookResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookResolver")
            .field("overrides", &self.overrides.len())
            .field("is_default_resolved", &self.is_default_resolved())
            .finish_non_exhaustive()
    }
}
