// Metrics capability for the settings flows

use std::sync::Mutex;
use tracing::{info, warn};

use crate::core::errors::AuthError;
use crate::settings::Metrics;

/// Records settings-flow events and errors.
///
/// Every record is emitted as a structured log line and buffered so hosts
/// can ask what was recorded.
pub struct MetricsCollector {
    events: Mutex<Vec<String>>,
    errors: Mutex<Vec<u32>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        }
    }

    pub fn is_event_logged(&self, name: &str) -> bool {
        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.iter().any(|event| event == name)
    }

    pub fn is_error_logged(&self, err: &AuthError) -> bool {
        let errors = self.errors.lock().unwrap_or_else(|e| e.into_inner());
        errors.contains(&err.errno())
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics for MetricsCollector {
    fn log_event(&self, name: &str) {
        info!(target: "metrics", event = name, "metricsEvent");
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.push(name.to_string());
    }

    fn log_error(&self, err: &AuthError) {
        warn!(target: "metrics", errno = err.errno(), error = %err, "metricsError");
        let mut errors = self.errors.lock().unwrap_or_else(|e| e.into_inner());
        errors.push(err.errno());
    }
}
