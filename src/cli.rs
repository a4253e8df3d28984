//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. Configuration-related arguments are merged on top of the TOML
//! file and environment variables; the rest describe the alert to send.

use crate::core::ConditionResult;
use clap::Parser;
use figment::{
    value::{Dict, Map, Tag, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Sends a Discord notification for an endpoint whose health changed.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Name of the endpoint the alert is about.
    #[arg(short, long, value_name = "NAME")]
    pub endpoint: String,

    /// Group of the endpoint, used to pick a webhook override.
    #[arg(short, long, value_name = "GROUP", default_value = "")]
    pub group: String,

    /// Send a "resolved" notification instead of a "triggered" one.
    #[arg(long)]
    pub resolved: bool,

    /// A condition result, written as `ok:<condition>` or `fail:<condition>`.
    /// May be repeated; order is kept.
    #[arg(long = "condition", value_name = "RESULT", value_parser = parse_condition)]
    pub conditions: Vec<ConditionResult>,

    /// Default webhook URL, or `$VAR` to read it from the environment.
    #[arg(long, value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Title of the notification.
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Logging level (e.g. "debug").
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Parses `ok:<condition>` / `fail:<condition>` into a `ConditionResult`.
pub fn parse_condition(s: &str) -> Result<ConditionResult, String> {
    let (outcome, condition) = s
        .split_once(':')
        .ok_or_else(|| format!("expected `ok:<condition>` or `fail:<condition>`, got '{}'", s))?;
    let success = match outcome.trim() {
        "ok" | "pass" | "success" => true,
        "fail" | "failed" | "failure" => false,
        other => return Err(format!("unknown condition outcome '{}'", other)),
    };
    let condition = condition.trim();
    if condition.is_empty() {
        return Err("condition must not be empty".to_string());
    }
    Ok(ConditionResult::new(condition, success))
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log-level".into(), Value::from(level.clone()));
        }

        let mut discord = Dict::new();
        if let Some(url) = &self.webhook_url {
            discord.insert("webhook-url".into(), Value::from(url.clone()));
        }
        if let Some(title) = &self.title {
            discord.insert("title".into(), Value::from(title.clone()));
        }
        if !discord.is_empty() {
            dict.insert("discord".into(), Value::Dict(Tag::Default, discord));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
