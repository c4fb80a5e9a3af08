// Unit tests for flow event records and the metrics context

use std::collections::HashMap;

use accounts_server::core::events::{
    event_type, generate_device_id, FlowEvent, MetricsContext,
};
use accounts_server::core::flow;

#[test]
fn test_device_id_is_32_lowercase_hex_chars() {
    let device_id = generate_device_id();

    assert_eq!(device_id.len(), 32);
    assert!(!device_id.contains('-'));
    assert!(device_id
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_device_id_is_fresh_per_call() {
    assert_ne!(generate_device_id(), generate_device_id());
}

#[test]
fn test_device_id_never_equals_flow_id() {
    let key = "0123456789abcdef0123456789abcdef";
    let data = flow::create(key, "Mozilla/5.0").unwrap();

    assert_ne!(generate_device_id(), data.flow_id);
}

#[test]
fn test_at_flow_begin_stamps_both_timestamps() {
    let event = FlowEvent::at_flow_begin(event_type::FLOW_BEGIN, 1_400_000_000_000);

    assert_eq!(event.event_type, "flow.begin");
    assert_eq!(event.time, 1_400_000_000_000);
    assert_eq!(event.flow_time, 1_400_000_000_000);
}

#[test]
fn test_flow_event_wire_format() {
    let event = FlowEvent::at_flow_begin(event_type::SCREEN_UPDATE_FIREFOX, 42);
    let json: serde_json::Value = serde_json::to_value(&event).unwrap();

    assert_eq!(json["type"], "screen.update-firefox");
    assert_eq!(json["time"], 42);
    assert_eq!(json["flowTime"], 42);
}

#[test]
fn test_metrics_context_wire_format_flattens_query() {
    let mut query = HashMap::new();
    query.insert("utm_source".to_string(), "email".to_string());

    let context = MetricsContext::new("f".repeat(64), "d".repeat(32), query);
    let json: serde_json::Value = serde_json::to_value(&context).unwrap();

    assert_eq!(json["flowId"], "f".repeat(64));
    assert_eq!(json["deviceId"], "d".repeat(32));
    assert_eq!(json["utm_source"], "email");
}

#[test]
fn test_metrics_context_ids_are_non_empty() {
    let context = MetricsContext::new("f".repeat(64), "d".repeat(32), HashMap::new());

    assert!(!context.flow_id.is_empty());
    assert!(!context.device_id.is_empty());
    assert_ne!(context.flow_id, context.device_id);
}
