//! Builds the JSON body of a Discord webhook call.

use crate::core::{AlertSettings, Endpoint, EndpointResult};
use serde::Serialize;

/// Title used when the provider does not configure one.
pub const DEFAULT_TITLE: &str = ":helmet_with_white_cross: Gatus";

/// Embed color of a resolved alert (green).
pub const RESOLVED_COLOR: u32 = 3066993;

/// Embed color of a triggered alert (red).
pub const TRIGGERED_COLOR: u32 = 15158332;

pub const CONDITION_RESULTS_FIELD: &str = "Condition results";

const SUCCESS_ICON: &str = ":white_check_mark:";
const FAILURE_ICON: &str = ":x:";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Body {
    pub content: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Renders alert transitions into Discord embeds.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    title: String,
}

impl MessageBuilder {
    /// Creates a builder. An empty or missing title falls back to
    /// [`DEFAULT_TITLE`].
    pub fn new(title: Option<&str>) -> Self {
        let title = match title {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => DEFAULT_TITLE.to_string(),
        };
        Self { title }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Builds the message for one alert transition.
    pub fn build(
        &self,
        endpoint: &Endpoint,
        alert: &AlertSettings,
        result: &EndpointResult,
        resolved: bool,
    ) -> Body {
        let (message, color) = if resolved {
            (
                format!(
                    "An alert for **{}** has been resolved after passing successfully {} time(s) in a row",
                    endpoint.display_name(),
                    alert.success_threshold()
                ),
                RESOLVED_COLOR,
            )
        } else {
            (
                format!(
                    "An alert for **{}** has been triggered due to having failed {} time(s) in a row",
                    endpoint.display_name(),
                    alert.failure_threshold()
                ),
                TRIGGERED_COLOR,
            )
        };

        let description = match alert.description() {
            "" => message,
            alert_description => format!("{}:\n> {}", message, alert_description),
        };

        let mut fields = Vec::new();
        let condition_results = format_condition_results(result);
        if !condition_results.is_empty() {
            fields.push(Field {
                name: CONDITION_RESULTS_FIELD.to_string(),
                value: condition_results,
                inline: false,
            });
        }

        Body {
            content: String::new(),
            embeds: vec![Embed {
                title: self.title.clone(),
                description,
                color,
                fields,
            }],
        }
    }
}

/// One line per condition, in evaluation order, each ending with a newline.
fn format_condition_results(result: &EndpointResult) -> String {
    result
        .condition_results
        .iter()
        .map(|condition_result| {
            let icon = if condition_result.success {
                SUCCESS_ICON
            } else {
                FAILURE_ICON
            };
            format!("{} - `{}`\n", icon, condition_result.condition)
        })
        .collect()
}
