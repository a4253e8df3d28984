//! Configuration management for the Discord notifier
//!
//! This module defines the main `Config` struct and the Discord provider
//! section. It uses the `figment` crate to layer defaults, a TOML file,
//! environment variables and command-line arguments.

use crate::cli::Cli;
use crate::core::AlertSettings;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Prefix of the environment variables that override configuration values,
/// e.g. `DISCORD_NOTIFIER_DISCORD__WEBHOOK_URL`.
pub const ENV_PREFIX: &str = "DISCORD_NOTIFIER_";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Configuration for the Discord alert provider.
    pub discord: DiscordConfig,
}

/// Configuration for the Discord alert provider.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct DiscordConfig {
    /// The default webhook URL. A value starting with `$` names the
    /// environment variable that holds the URL.
    pub webhook_url: String,
    /// Alert settings inherited by endpoints that use this provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_alert: Option<AlertSettings>,
    /// Per-group webhook URLs, checked in order before the default.
    #[serde(default)]
    pub overrides: Vec<Override>,
    /// Title of the embed. Falls back to the default title when unset or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Sends notifications for one group to a different webhook.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Override {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub webhook_url: String,
}

impl Override {
    pub fn new(group: impl Into<String>, webhook_url: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            webhook_url: webhook_url.into(),
        }
    }
}

/// Reasons a Discord provider configuration is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("discord webhook-url must not be empty")]
    MissingWebhookUrl,

    #[error("override #{0} has an empty group")]
    EmptyOverrideGroup(usize),

    #[error("override for group '{0}' has an empty webhook-url")]
    EmptyOverrideWebhookUrl(String),

    #[error("group '{0}' is overridden more than once")]
    DuplicateOverrideGroup(String),
}

impl DiscordConfig {
    /// Checks the provider configuration.
    ///
    /// Every override needs a non-empty, unique group and a non-empty webhook
    /// URL, and the default webhook URL must be set. The first violation
    /// found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut registered_groups = HashSet::new();
        for (index, o) in self.overrides.iter().enumerate() {
            if o.group.is_empty() {
                return Err(ConfigError::EmptyOverrideGroup(index));
            }
            if o.webhook_url.is_empty() {
                return Err(ConfigError::EmptyOverrideWebhookUrl(o.group.clone()));
            }
            if !registered_groups.insert(o.group.as_str()) {
                return Err(ConfigError::DuplicateOverrideGroup(o.group.clone()));
            }
        }
        if self.webhook_url.is_empty() {
            return Err(ConfigError::MissingWebhookUrl);
        }
        Ok(())
    }

    /// Returns whether the provider configuration is valid.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Config {
    /// Loads the application configuration.
    ///
    /// Sources are layered in this order, later ones winning: built-in
    /// defaults, the TOML file given with `--config`, `DISCORD_NOTIFIER_*`
    /// environment variables, then command-line arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = &cli.config {
            figment = figment.merge(Toml::file(path));
        }

        let config: Config = figment
            // `DISCORD_NOTIFIER_DISCORD__WEBHOOK_URL` maps to `discord.webhook-url`.
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .map(|key| key.as_str().replace("__", ".").replace('_', "-").into()),
            )
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            discord: DiscordConfig::default(),
        }
    }
}
