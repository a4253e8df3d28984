//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use discord_notifier::core::{AlertSettings, ConditionResult, Endpoint, EndpointResult};
use discord_notifier::notification::{SecretLookup, SecretObserver};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A `SecretObserver` that records every lookup instead of logging it.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    lookups: Mutex<Vec<(String, SecretLookup)>>,
}

impl RecordingObserver {
    pub fn lookups(&self) -> Vec<(String, SecretLookup)> {
        self.lookups.lock().unwrap().clone()
    }
}

impl SecretObserver for RecordingObserver {
    fn secret_lookup(&self, variable: &str, outcome: SecretLookup) {
        self.lookups
            .lock()
            .unwrap()
            .push((variable.to_string(), outcome));
    }
}

/// An endpoint, its alert, and a check result with the given conditions.
pub fn alert_event(
    name: &str,
    group: &str,
    conditions: &[(&str, bool)],
) -> (Endpoint, AlertSettings, EndpointResult) {
    let endpoint = Endpoint::new(name, group);
    let alert = AlertSettings {
        enabled: Some(true),
        failure_threshold: Some(3),
        success_threshold: Some(2),
        ..Default::default()
    };
    let result = EndpointResult {
        condition_results: conditions
            .iter()
            .map(|(condition, success)| ConditionResult::new(*condition, *success))
            .collect(),
    };
    (endpoint, alert, result)
}

/// Collects formatted `tracing` output in memory.
#[derive(Debug, Default, Clone)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
