// Flow event records and the per-request metrics context

use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Event types emitted by the content server.
pub mod event_type {
    /// First event of every flow.
    pub const FLOW_BEGIN: &str = "flow.begin";
    /// Amplitude-facing view event for the update-firefox page.
    pub const SCREEN_UPDATE_FIREFOX: &str = "screen.update-firefox";
    /// Flow-log-facing view event for the update-firefox page.
    pub const FLOW_UPDATE_FIREFOX_VIEW: &str = "flow.update-firefox.view";
    /// Recorded when the settings delete-account flow completes.
    pub const DELETE_ACCOUNT_DELETED: &str = "settings.delete-account.deleted";
}

/// A single timestamped analytics record marking a step in a user journey.
/// Immutable once constructed; one instance per emitted event.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FlowEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    /// Milliseconds since the epoch.
    pub time: i64,
    /// Milliseconds relative to flow start.
    #[serde(rename = "flowTime")]
    pub flow_time: i64,
}

impl FlowEvent {
    /// An event stamped with the flow begin time for both `time` and
    /// `flowTime`, as the begin and screen-view events are.
    pub fn at_flow_begin(event_type: &str, flow_begin_time: i64) -> Self {
        Self {
            event_type: event_type.to_string(),
            time: flow_begin_time,
            flow_time: flow_begin_time,
        }
    }
}

/// Metrics context forwarded to every sink alongside an event.
///
/// Created once per request and never persisted beyond it. Query parameters
/// pass through untouched next to the flow and device ids.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetricsContext {
    #[serde(rename = "flowId")]
    pub flow_id: String,
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(flatten)]
    pub query: HashMap<String, String>,
}

impl MetricsContext {
    pub fn new(flow_id: String, device_id: String, query: HashMap<String, String>) -> Self {
        Self {
            flow_id,
            device_id,
            query,
        }
    }
}

/// Amplitude-style device id: 32 lowercase hex characters, no separators.
/// Generated fresh per request; never equal to a flow id.
pub fn generate_device_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// The slice of an incoming request that telemetry sinks consume.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RequestInfo {
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_addr: Option<String>,
}
