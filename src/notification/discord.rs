//! A client for sending alert notifications to Discord webhooks.

use crate::config::DiscordConfig;
use crate::core::{AlertProvider, AlertSettings, Endpoint, EndpointResult};
use crate::notification::message::{Body, MessageBuilder};
use crate::notification::resolver::{SecretObserver, WebhookResolver};
use crate::notification::NotificationError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Timeout of the HTTP client built by [`DiscordAlertProvider::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends alerts to a Discord webhook, picking the webhook by endpoint group.
pub struct DiscordAlertProvider {
    config: DiscordConfig,
    resolver: WebhookResolver,
    builder: MessageBuilder,
    client: reqwest::Client,
}

impl DiscordAlertProvider {
    /// Creates a provider with its own HTTP client.
    pub fn new(config: DiscordConfig) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a provider that sends requests through `client`.
    pub fn with_client(config: DiscordConfig, client: reqwest::Client) -> Self {
        let resolver = WebhookResolver::from_config(&config);
        let builder = MessageBuilder::new(config.title.as_deref());
        Self {
            config,
            resolver,
            builder,
            client,
        }
    }

    /// Replaces the observer notified when the webhook URL is read from the
    /// environment.
    pub fn with_observer(mut self, observer: Arc<dyn SecretObserver>) -> Self {
        self.resolver = self.resolver.with_observer(observer);
        self
    }

    /// Returns the webhook URL notifications for `group` are sent to.
    pub fn webhook_url_for_group(&self, group: &str) -> &str {
        self.resolver.resolve(group)
    }

    /// Builds the request body for an alert transition.
    pub fn build_request_body(
        &self,
        endpoint: &Endpoint,
        alert: &AlertSettings,
        result: &EndpointResult,
        resolved: bool,
    ) -> Body {
        self.builder.build(endpoint, alert, result, resolved)
    }
}

#[async_trait]
impl AlertProvider for DiscordAlertProvider {
    fn name(&self) -> &str {
        "discord"
    }

    fn is_valid(&self) -> bool {
        self.config.is_valid()
    }

    fn default_alert(&self) -> Option<&AlertSettings> {
        self.config.default_alert.as_ref()
    }

    /// Builds the embed for the transition and posts it to the group's webhook.
    #[instrument(skip_all, fields(endpoint = %endpoint.display_name(), resolved = resolved))]
    async fn send(
        &self,
        endpoint: &Endpoint,
        alert: &AlertSettings,
        result: &EndpointResult,
        resolved: bool,
    ) -> Result<(), NotificationError> {
        let body = self.build_request_body(endpoint, alert, result, resolved);
        let webhook_url = self.webhook_url_for_group(&endpoint.group);

        let response = match self.client.post(webhook_url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                // The webhook URL carries the webhook token.
                let e = e.without_url();
                error!(error = %e, "HTTP request to Discord failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let text = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body = %text,
                "Discord rejected the notification"
            );
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        // Read the body to the end so the connection goes back to the pool.
        if let Err(e) = response.bytes().await {
            debug!(error = %e, "Failed to drain Discord response body");
        }
        info!(status = %status, "Successfully sent notification to Discord.");
        Ok(())
    }
}
