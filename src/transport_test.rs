use super::*;

#[tokio::test]
async fn loopback_echoes_sent_messages_as_self() {
    let (transport, mut rx) = LoopbackTransport::new("https://room.test/a", "me");
    transport.send_message("hello".into());

    let delivery = rx.recv().await.expect("delivery");
    assert_eq!(delivery.sender_id, "me");
    assert_eq!(delivery.text, "hello");
    assert!(delivery.timestamp > 0);
}

#[tokio::test]
async fn loopback_delivers_from_other_participants() {
    let (transport, mut rx) = LoopbackTransport::new("https://room.test/a", "me");
    transport.deliver_from("them", "hi");
    assert_eq!(rx.recv().await.expect("delivery").sender_id, "them");
}

#[tokio::test]
async fn join_succeeds_for_valid_room() {
    let (transport, _rx) = LoopbackTransport::new("https://room.test/a", "me");
    assert!(transport.join().await.is_ok());
}

#[tokio::test]
async fn join_fails_for_empty_room_url() {
    let (transport, _rx) = LoopbackTransport::new("  ", "me");
    let err = transport.join().await.expect_err("join should fail");
    assert!(matches!(err, TransportError::Join { .. }));
}

#[tokio::test]
async fn join_fails_when_receiver_dropped() {
    let (transport, rx) = LoopbackTransport::new("https://room.test/a", "me");
    drop(rx);
    assert!(matches!(transport.join().await, Err(TransportError::Closed)));
}

#[test]
fn send_after_receiver_dropped_does_not_panic() {
    let (transport, rx) = LoopbackTransport::new("https://room.test/a", "me");
    drop(rx);
    transport.send_message("lost".into());
}
