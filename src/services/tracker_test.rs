use super::*;
use crate::state::MessageLog;

fn transfer_text() -> &'static str {
    r#"{"type":"moneyTransfer","amount":"5","recipient":"Bob","senderName":"Alice"}"#
}

// =============================================================================
// scan
// =============================================================================

#[test]
fn scan_of_empty_log_is_empty() {
    let mut tracker = SideEffectTracker::new();
    let scan = tracker.scan(&[]);
    assert!(scan.notifications.is_empty());
    assert!(scan.latest_question.is_none());
}

#[test]
fn transfer_fires_one_notification() {
    let mut log = MessageLog::new();
    let id = log.append("p1", transfer_text(), 1);

    let mut tracker = SideEffectTracker::new();
    let scan = tracker.scan(log.messages());

    assert_eq!(
        scan.notifications,
        vec![Notification {
            message_id: Some(id),
            kind: NotificationKind::Transfer,
            text: "Alice sent 5 USDT to Bob".to_owned(),
        }]
    );
    assert!(tracker.is_processed(id));
}

#[test]
fn rescanning_same_log_fires_nothing() {
    let mut log = MessageLog::new();
    log.append("p1", transfer_text(), 1);
    log.append("p2", r#"{"type":"correctAnswer","displayName":"Carol"}"#, 2);

    let mut tracker = SideEffectTracker::new();
    assert_eq!(tracker.scan(log.messages()).notifications.len(), 2);
    for _ in 0..10 {
        assert!(tracker.scan(log.messages()).notifications.is_empty());
    }
}

#[test]
fn identical_transfers_fire_once_each() {
    let mut log = MessageLog::new();
    log.append("p1", transfer_text(), 1);
    log.append("p1", transfer_text(), 1);

    let mut tracker = SideEffectTracker::new();
    let scan = tracker.scan(log.messages());
    assert_eq!(scan.notifications.len(), 2);
    assert_ne!(scan.notifications[0].message_id, scan.notifications[1].message_id);
}

#[test]
fn only_new_messages_fire_after_append() {
    let mut log = MessageLog::new();
    log.append("p1", transfer_text(), 1);
    let mut tracker = SideEffectTracker::new();
    tracker.scan(log.messages());

    let id = log.append("p2", r#"{"type":"correctAnswer","displayName":"Carol"}"#, 2);
    let scan = tracker.scan(log.messages());
    assert_eq!(scan.notifications.len(), 1);
    assert_eq!(scan.notifications[0].message_id, Some(id));
    assert_eq!(scan.notifications[0].text, "Carol answered correctly!");
}

#[test]
fn chat_question_and_plain_text_are_never_processed() {
    let mut log = MessageLog::new();
    let chat = log.append("p1", r#"{"type":"chat","senderName":"Alice","text":"hi"}"#, 1);
    let question = log.append("p1", r#"{"type":"question","question":"Q?","answer":"A"}"#, 2);
    let plain = log.append("p1", "hello", 3);

    let mut tracker = SideEffectTracker::new();
    let scan = tracker.scan(log.messages());
    assert!(scan.notifications.is_empty());
    assert!(!tracker.is_processed(chat));
    assert!(!tracker.is_processed(question));
    assert!(!tracker.is_processed(plain));
    assert_eq!(tracker.processed_len(), 0);
}

#[test]
fn notifications_keep_log_order() {
    let mut log = MessageLog::new();
    log.append("p2", r#"{"type":"correctAnswer","displayName":"Carol"}"#, 1);
    log.append("p1", "noise", 2);
    log.append("p1", transfer_text(), 3);

    let mut tracker = SideEffectTracker::new();
    let kinds: Vec<NotificationKind> = tracker.scan(log.messages()).notifications.iter().map(|n| n.kind).collect();
    assert_eq!(kinds, [NotificationKind::CorrectAnswer, NotificationKind::Transfer]);
}

#[test]
fn latest_question_is_last_in_log() {
    let mut log = MessageLog::new();
    log.append("host", r#"{"type":"question","question":"First?","answer":"1"}"#, 1);
    log.append("host", r#"{"type":"question","question":"Second?","answer":"2"}"#, 2);

    let mut tracker = SideEffectTracker::new();
    let question = tracker.scan(log.messages()).latest_question.expect("question");
    assert_eq!(question.question, "Second?");
    assert_eq!(question.answer, "2");

    assert!(tracker.scan(log.messages()).latest_question.is_none());
}

#[test]
fn question_is_reported_once_per_message() {
    let mut log = MessageLog::new();
    log.append("host", r#"{"type":"question","question":"First?","answer":"1"}"#, 1);
    let mut tracker = SideEffectTracker::new();
    assert!(tracker.scan(log.messages()).latest_question.is_some());

    log.append("p1", r#"{"type":"chat","senderName":"Bob","text":"hi"}"#, 2);
    assert!(tracker.scan(log.messages()).latest_question.is_none());

    // Same text, new message: reported again.
    log.append("host", r#"{"type":"question","question":"First?","answer":"1"}"#, 3);
    let question = tracker.scan(log.messages()).latest_question.expect("question");
    assert_eq!(question.question, "First?");
}

#[test]
fn malformed_message_does_not_block_later_ones() {
    let mut log = MessageLog::new();
    log.append("p1", r#"{"type":"moneyTransfer","amount":"#, 1);
    log.append("p1", transfer_text(), 2);

    let mut tracker = SideEffectTracker::new();
    assert_eq!(tracker.scan(log.messages()).notifications.len(), 1);
}

// =============================================================================
// helpers
// =============================================================================

#[test]
fn transfer_line_defaults_missing_sender() {
    assert_eq!(transfer_line("", "2", "Bob"), "Someone sent 2 USDT to Bob");
}

#[test]
fn error_notification_does_not_celebrate() {
    let n = Notification::error("Failed to send USDT");
    assert!(!n.celebrates());
    assert!(n.message_id.is_none());
}

#[test]
fn side_effect_notifications_celebrate() {
    let mut log = MessageLog::new();
    log.append("p1", transfer_text(), 1);
    let mut tracker = SideEffectTracker::new();
    assert!(tracker.scan(log.messages()).notifications[0].celebrates());
}
