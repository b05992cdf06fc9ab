use super::*;

#[test]
fn message_log_new_is_empty() {
    let log = MessageLog::new();
    assert!(log.is_empty());
    assert_eq!(log.len(), 0);
}

#[test]
fn message_log_assigns_sequential_ids() {
    let mut log = MessageLog::new();
    let a = log.append("p1", "one", 10);
    let b = log.append("p2", "two", 11);
    assert_eq!(a, MessageId(0));
    assert_eq!(b, MessageId(1));
    assert_eq!(log.len(), 2);
}

#[test]
fn message_log_preserves_delivery_order() {
    let mut log = MessageLog::new();
    log.append("p1", "first", 30);
    log.append("p1", "second", 10);
    let texts: Vec<&str> = log.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["first", "second"]);
}

#[test]
fn identical_text_gets_distinct_identity() {
    let mut log = MessageLog::new();
    let a = log.append("p1", "same", 1);
    let b = log.append("p1", "same", 1);
    assert_ne!(a, b);
}

#[test]
fn sender_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Sender::SelfSent).unwrap(), "\"self\"");
    assert_eq!(serde_json::to_string(&Sender::Other).unwrap(), "\"other\"");
    assert_eq!(serde_json::to_string(&Sender::Unknown).unwrap(), "\"unknown\"");
}

#[test]
fn panel_state_default_is_closed_and_empty() {
    let state = PanelState::default();
    assert!(!state.is_open);
    assert_eq!(state.unread_count, 0);
    assert!(state.draft.is_empty());
}

#[test]
fn message_id_displays_as_number() {
    assert_eq!(MessageId(7).to_string(), "7");
}
