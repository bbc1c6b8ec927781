use tnode_event_bus::{EventBus, EventBusError, EventReceiverExt};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Deployed(pub usize);

#[tokio::test]
async fn event_flow() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe().unwrap();

    assert_eq!(bus.publish(Deployed(42)), 1);

    let received = rx.recv_event().await.unwrap();
    assert_eq!(*received, Deployed(42));
}

#[tokio::test]
async fn publish_without_subscribers_is_silent() {
    let bus = EventBus::<Deployed>::new();
    assert_eq!(bus.publish(Deployed(1)), 0);
    assert_eq!(bus.subscriber_count(), 0);
}

#[tokio::test]
async fn lagged_receiver_recovers() {
    let capacity = 2;
    let bus = EventBus::with_capacity(capacity).unwrap();
    let mut rx = bus.subscribe().unwrap();

    let total = 50;
    for i in 0..total {
        bus.publish(Deployed(i));
    }

    let first = rx.recv_event().await.expect("should recover from lag");
    assert!(first.0 >= total - capacity, "expected tail of buffer, got {}", first.0);

    let second = rx.recv_event().await.expect("should keep receiving");
    assert_eq!(second.0, first.0 + 1);
}

#[tokio::test]
async fn clones_share_channel() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe().unwrap();

    let clone = bus.clone();
    clone.publish(Deployed(7));

    assert_eq!(rx.recv_event().await.unwrap().0, 7);
}

#[tokio::test]
async fn close_ends_receivers_and_rejects_subscriptions() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe().unwrap();
    bus.publish(Deployed(1));

    assert!(bus.close());
    assert!(!bus.close(), "second close is a no-op");

    assert_eq!(rx.recv_event().await.unwrap().0, 1, "buffered events still drain");
    assert!(rx.recv_event().await.is_none());
    assert!(matches!(bus.subscribe(), Err(EventBusError::Closed { .. })));
    assert_eq!(bus.publish(Deployed(2)), 0);
}

#[tokio::test]
async fn drain_collects_buffered_events_in_order() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe().unwrap();
    for i in 0..3 {
        bus.publish(Deployed(i));
    }

    let drained: Vec<usize> = rx.drain_events().iter().map(|e| e.0).collect();
    assert_eq!(drained, vec![0, 1, 2]);
    assert!(rx.drain_events().is_empty());
}

#[test]
fn zero_capacity_is_rejected() {
    let err = EventBus::<Deployed>::with_capacity(0).expect_err("zero capacity");
    assert!(matches!(err, EventBusError::InvalidCapacity { .. }));
}
