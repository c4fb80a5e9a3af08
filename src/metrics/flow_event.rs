// Flow event logging for the metrics pipeline

use serde::Serialize;
use tracing::{info, warn};

use crate::api::FlowEventLogger;
use crate::core::events::{FlowEvent, MetricsContext, RequestInfo};

#[derive(Debug, Serialize)]
struct FlowEventRecord<'a> {
    #[serde(flatten)]
    event: &'a FlowEvent,
    #[serde(flatten)]
    context: &'a MetricsContext,
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ua: Option<&'a str>,
}

/// Writes each flow event as a structured log record consumed by the
/// flow-metrics pipeline.
pub struct StdoutFlowLogger;

impl StdoutFlowLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutFlowLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowEventLogger for StdoutFlowLogger {
    fn log_flow_event(&self, event: &FlowEvent, context: &MetricsContext, request: &RequestInfo) {
        let record = FlowEventRecord {
            event,
            context,
            path: &request.path,
            ua: request.user_agent.as_deref(),
        };

        match serde_json::to_string(&record) {
            Ok(json) => info!(target: "flow_event", event = %json, "flowEvent"),
            Err(e) => warn!(target: "flow_event", error = %e, "Failed to serialize flow event"),
        }
    }
}
