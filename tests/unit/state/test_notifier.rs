// Unit tests for the cross-tab notifier

use accounts_server::settings::Notifier;
use accounts_server::state::notifier::{ChannelNotifier, NotifierEvent};

#[tokio::test]
async fn test_subscribers_receive_delete_events() {
    let notifier = ChannelNotifier::default();
    let mut rx = notifier.subscribe();

    notifier.trigger(NotifierEvent::Delete {
        uid: "123".to_string(),
    });

    let event = rx.recv().await.unwrap();
    assert_eq!(
        event,
        NotifierEvent::Delete {
            uid: "123".to_string()
        }
    );
}

#[tokio::test]
async fn test_every_subscriber_sees_the_event() {
    let notifier = ChannelNotifier::default();
    let mut first = notifier.subscribe();
    let mut second = notifier.subscribe();

    notifier.trigger(NotifierEvent::Delete {
        uid: "abc".to_string(),
    });

    assert!(first.recv().await.is_ok());
    assert!(second.recv().await.is_ok());
}

#[test]
fn test_trigger_without_subscribers_is_discarded() {
    let notifier = ChannelNotifier::default();

    // Must not panic or block
    notifier.trigger(NotifierEvent::Delete {
        uid: "123".to_string(),
    });
}

#[test]
fn test_event_wire_format() {
    let event = NotifierEvent::Delete {
        uid: "123".to_string(),
    };
    let json: serde_json::Value = serde_json::to_value(&event).unwrap();

    assert_eq!(json["event"], "delete");
    assert_eq!(json["data"]["uid"], "123");
}
