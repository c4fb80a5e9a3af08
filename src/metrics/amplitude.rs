//! Amplitude event forwarding.
//!
//! Flow events are reshaped into amplitude-style records and emitted as one
//! structured log record per call; the downstream log pipeline ships them to
//! the amplitude ingestion API. Emission is fire-and-forget: a record that
//! fails to serialize is dropped with a warning and never affects the
//! request or the other sink.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::api::AmplitudeForwarder;
use crate::core::events::{FlowEvent, MetricsContext, RequestInfo};

#[derive(Debug, Serialize)]
struct AmplitudeEvent<'a> {
    event_type: &'a str,
    time: i64,
    device_id: &'a str,
    /// Amplitude groups events of one journey by session; the flow begin
    /// time is the session key.
    session_id: i64,
    user_properties: UserProperties<'a>,
    event_properties: &'a HashMap<String, String>,
}

#[derive(Debug, Serialize)]
struct UserProperties<'a> {
    flow_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ua: Option<&'a str>,
}

pub struct AmplitudeLogger;

impl AmplitudeLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmplitudeLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl AmplitudeForwarder for AmplitudeLogger {
    fn process(&self, event: &FlowEvent, request: &RequestInfo, context: &MetricsContext) {
        let record = AmplitudeEvent {
            event_type: &event.event_type,
            time: event.time,
            device_id: &context.device_id,
            session_id: event.flow_time,
            user_properties: UserProperties {
                flow_id: &context.flow_id,
                ua: request.user_agent.as_deref(),
            },
            event_properties: &context.query,
        };

        match serde_json::to_string(&record) {
            Ok(json) => info!(target: "amplitude", event = %json, "amplitudeEvent"),
            Err(e) => warn!(target: "amplitude", error = %e, "Failed to serialize amplitude event"),
        }
    }
}
