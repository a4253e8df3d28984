//! discord-notifier - sends one alert notification to Discord
//!
//! Loads the provider configuration, builds the alert described on the
//! command line and dispatches it once.

use anyhow::{Context, Result};
use clap::Parser;
use discord_notifier::{
    cli::Cli,
    config::Config,
    core::{AlertProvider, AlertSettings, Endpoint, EndpointResult},
    notification::DiscordAlertProvider,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).context("Failed to load configuration")?;

    // Initialize logging; RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Overrides: {}", config.discord.overrides.len());
    info!(
        "Title: {}",
        config.discord.title.as_deref().unwrap_or("(default)")
    );
    info!("-------------------------------------------------------");

    config
        .discord
        .validate()
        .context("Invalid Discord provider configuration")?;

    let provider = DiscordAlertProvider::new(config.discord.clone())?;

    let endpoint = Endpoint::new(cli.endpoint, cli.group);
    let mut alert = AlertSettings::default();
    if let Some(defaults) = provider.default_alert() {
        alert.merge_defaults(defaults);
    }
    let result = EndpointResult {
        condition_results: cli.conditions,
    };

    info!(
        endpoint = %endpoint.display_name(),
        resolved = cli.resolved,
        "Sending notification"
    );
    provider
        .send(&endpoint, &alert, &result, cli.resolved)
        .await
        .context("Failed to send Discord notification")?;
    info!("Notification delivered.");

    Ok(())
}
