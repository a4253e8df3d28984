//! Core domain types and service traits for the Discord notifier
//!
//! These are the shapes handed over by the monitoring engine when an endpoint
//! changes health, plus the trait contract every alert provider implements.

use crate::notification::NotificationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Failure threshold used when an alert does not set one.
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

/// Success threshold used when an alert does not set one.
pub const DEFAULT_SUCCESS_THRESHOLD: u32 = 2;

/// A monitored endpoint, as seen by the notifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Endpoint {
    /// Name of the endpoint
    pub name: String,
    /// Logical group the endpoint belongs to (e.g. a team or a service)
    #[serde(default)]
    pub group: String,
}

impl Endpoint {
    /// Creates a new endpoint.
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
        }
    }

    /// Returns the name shown to humans: `group/name`, or just `name` when
    /// the endpoint has no group.
    pub fn display_name(&self) -> String {
        if self.group.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.group, self.name)
        }
    }
}

/// Alert settings of an endpoint.
///
/// Every field is optional so that a provider's `default-alert` can fill in
/// whatever the endpoint left unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AlertSettings {
    /// Whether the alert is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Free-text description appended to the notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Consecutive failures required before the alert is triggered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<u32>,
    /// Consecutive successes required before the alert is resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_threshold: Option<u32>,
    /// Whether a notification is sent when the alert is resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_on_resolved: Option<bool>,
}

impl AlertSettings {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    /// Returns the description, or an empty string if there is none.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn failure_threshold(&self) -> u32 {
        self.failure_threshold.unwrap_or(DEFAULT_FAILURE_THRESHOLD)
    }

    pub fn success_threshold(&self) -> u32 {
        self.success_threshold.unwrap_or(DEFAULT_SUCCESS_THRESHOLD)
    }

    pub fn send_on_resolved(&self) -> bool {
        self.send_on_resolved.unwrap_or(false)
    }

    /// Fills every unset field from `defaults`. Fields the endpoint set
    /// explicitly are left alone.
    pub fn merge_defaults(&mut self, defaults: &AlertSettings) {
        if self.enabled.is_none() {
            self.enabled = defaults.enabled;
        }
        if self.description.is_none() {
            self.description = defaults.description.clone();
        }
        if self.failure_threshold.is_none() {
            self.failure_threshold = defaults.failure_threshold;
        }
        if self.success_threshold.is_none() {
            self.success_threshold = defaults.success_threshold;
        }
        if self.send_on_resolved.is_none() {
            self.send_on_resolved = defaults.send_on_resolved;
        }
    }
}

/// Outcome of evaluating one condition against an endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConditionResult {
    /// The condition as written in the configuration, e.g. `[STATUS] == 200`
    pub condition: String,
    /// Whether the condition held
    pub success: bool,
}

impl ConditionResult {
    pub fn new(condition: impl Into<String>, success: bool) -> Self {
        Self {
            condition: condition.into(),
            success,
        }
    }
}

/// Result of the health check that caused the transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EndpointResult {
    /// Condition results, in the order they were evaluated
    pub condition_results: Vec<ConditionResult>,
}

// =============================================================================
// Service Traits
// =============================================================================

/// Delivers alert transitions to a notification service
#[async_trait]
pub trait AlertProvider: Send + Sync {
    /// A short, descriptive name for the provider (e.g., "discord").
    fn name(&self) -> &str;

    /// Returns whether the provider's configuration is usable.
    fn is_valid(&self) -> bool;

    /// Returns the alert settings endpoints inherit from this provider.
    fn default_alert(&self) -> Option<&AlertSettings>;

    /// Sends a notification for an alert that was triggered or resolved
    ///
    /// # Arguments
    /// * `endpoint` - The endpoint whose health changed
    /// * `alert` - The alert settings of that endpoint
    /// * `result` - The check result that caused the transition
    /// * `resolved` - `true` if the endpoint recovered, `false` if it failed
    ///
    /// # Returns
    /// * `Ok(())` if the notification service accepted the message
    /// * `Err` on transport failure or if the service rejected the message
    async fn send(
        &self,
        endpoint: &Endpoint,
        alert: &AlertSettings,
        result: &EndpointResult,
        resolved: bool,
    ) -> Result<(), NotificationError>;
}
