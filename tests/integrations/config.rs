//! Integration tests for configuration loading.

use discord_notifier::cli::Cli;
use discord_notifier::config::{Config, ConfigError, Override};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(toml_content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", toml_content).unwrap();
    file
}

fn cli_for(file: &NamedTempFile) -> Cli {
    Cli {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    }
}

#[test]
#[serial]
fn test_load_full_valid_config() {
    let file = config_file(
        r#"
        log-level = "debug"

        [discord]
        webhook-url = "$DISCORD_WEBHOOK_URL"
        title = "Production"

        [discord.default-alert]
        enabled = true
        description = "healthcheck failed"
        failure-threshold = 5
        send-on-resolved = true

        [[discord.overrides]]
        group = "core"
        webhook-url = "https://discord.com/api/webhooks/core"

        [[discord.overrides]]
        group = "payments"
        webhook-url = "https://discord.com/api/webhooks/payments"
    "#,
    );

    let config = Config::load(&cli_for(&file)).unwrap();

    assert_eq!(config.log_level, "debug");
    assert_eq!(config.discord.webhook_url, "$DISCORD_WEBHOOK_URL");
    assert_eq!(config.discord.title.as_deref(), Some("Production"));
    assert_eq!(
        config.discord.overrides,
        vec![
            Override::new("core", "https://discord.com/api/webhooks/core"),
            Override::new("payments", "https://discord.com/api/webhooks/payments"),
        ]
    );
    let default_alert = config.discord.default_alert.as_ref().unwrap();
    assert!(default_alert.is_enabled());
    assert_eq!(default_alert.description(), "healthcheck failed");
    assert_eq!(default_alert.failure_threshold(), 5);
    assert_eq!(default_alert.success_threshold(), 2); // Not in the toml, so the default applies
    assert!(default_alert.send_on_resolved());
    assert!(config.discord.is_valid());
}

#[test]
#[serial]
fn test_load_default_values() {
    let file = config_file("");

    let config = Config::load(&cli_for(&file)).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(
        config.discord.validate(),
        Err(ConfigError::MissingWebhookUrl)
    );
}

#[test]
#[serial]
fn test_duplicate_override_group_is_invalid() {
    let file = config_file(
        r#"
        [discord]
        webhook-url = "https://discord.com/api/webhooks/default"

        [[discord.overrides]]
        group = "core"
        webhook-url = "https://discord.com/api/webhooks/a"

        [[discord.overrides]]
        group = "core"
        webhook-url = "https://discord.com/api/webhooks/b"
    "#,
    );

    let config = Config::load(&cli_for(&file)).unwrap();

    assert!(!config.discord.is_valid());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let file = config_file(
        r#"
        [discord]
        webhook-url = "https://discord.com/api/webhooks/file"
    "#,
    );
    std::env::set_var(
        "DISCORD_NOTIFIER_DISCORD__WEBHOOK_URL",
        "https://discord.com/api/webhooks/env",
    );
    std::env::set_var("DISCORD_NOTIFIER_LOG_LEVEL", "warn");

    let config = Config::load(&cli_for(&file));

    std::env::remove_var("DISCORD_NOTIFIER_DISCORD__WEBHOOK_URL");
    std::env::remove_var("DISCORD_NOTIFIER_LOG_LEVEL");

    let config = config.unwrap();
    assert_eq!(config.discord.webhook_url, "https://discord.com/api/webhooks/env");
    assert_eq!(config.log_level, "warn");
}

#[test]
#[serial]
fn test_cli_overrides_file() {
    let file = config_file(
        r#"
        log-level = "debug"

        [discord]
        webhook-url = "https://discord.com/api/webhooks/file"
        title = "From file"
    "#,
    );
    let cli = Cli {
        webhook_url: Some("https://discord.com/api/webhooks/cli".to_string()),
        ..cli_for(&file)
    };

    let config = Config::load(&cli).unwrap();

    assert_eq!(config.discord.webhook_url, "https://discord.com/api/webhooks/cli");
    assert_eq!(config.discord.title.as_deref(), Some("From file"));
    assert_eq!(config.log_level, "debug");
}

#[test]
#[serial]
fn test_invalid_value_type() {
    let file = config_file(
        r#"
        [discord]
        webhook-url = "https://discord.com/api/webhooks/default"
        overrides = "core"
    "#,
    );

    assert!(Config::load(&cli_for(&file)).is_err());
}

#[test]
#[serial]
fn test_override_missing_webhook_url_is_reported_by_validation() {
    let file = config_file(
        r#"
        [discord]
        webhook-url = "https://discord.com/api/webhooks/default"

        [[discord.overrides]]
        group = "core"
    "#,
    );

    let config = Config::load(&cli_for(&file)).unwrap();

    assert_eq!(config.discord.overrides, vec![Override::new("core", "")]);
    assert_eq!(
        config.discord.validate(),
        Err(ConfigError::EmptyOverrideWebhookUrl("core".to_string()))
    );
}

#[test]
#[serial]
fn test_override_missing_group_is_reported_by_validation() {
    let file = config_file(
        r#"
        [discord]
        webhook-url = "https://discord.com/api/webhooks/default"

        [[discord.overrides]]
        webhook-url = "https://discord.com/api/webhooks/core"
    "#,
    );

    let config = Config::load(&cli_for(&file)).unwrap();

    assert_eq!(config.discord.validate(), Err(ConfigError::EmptyOverrideGroup(0)));
}
