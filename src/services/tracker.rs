//! Side-effect tracker — fires transfer and correct-answer notices once.
//!
//! DESIGN
//! ======
//! The whole message log is rescanned on every update. Each message not yet
//! in the processed set is decoded; transfer announcements and correct-answer
//! notices produce one `Notification` and their id is recorded so later scans
//! skip them. Chat lines, questions and unparsable text never enter the set:
//! decoding them again is pure, so rescanning them costs time but repeats no
//! side effect.
//!
//! The newest question in the log is reported only when its `MessageId`
//! differs from the last one reported. A question set locally is therefore
//! not rolled back by a rescan that still ends on an older broadcast.
//!
//! TRADE-OFFS
//! ==========
//! A full rescan is O(n) per update. Sessions are short, so the identity set
//! is kept rather than a last-processed index.

use std::collections::HashSet;

use payloads::{Payload, PayloadKind};
use tracing::{debug, info};

use crate::services::quiz::QuizQuestion;
use crate::state::{MessageId, RawMessage};

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Transfer,
    CorrectAnswer,
    /// A local operation failed (e.g. a wallet transfer).
    Error,
}

/// A toast-style notice for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Message that caused the notice; `None` for local errors.
    pub message_id: Option<MessageId>,
    pub kind: NotificationKind,
    pub text: String,
}

impl Notification {
    pub fn error(text: impl Into<String>) -> Self {
        Self { message_id: None, kind: NotificationKind::Error, text: text.into() }
    }

    /// Whether this notice comes with a celebration pulse.
    #[must_use]
    pub fn celebrates(&self) -> bool {
        matches!(self.kind, NotificationKind::Transfer | NotificationKind::CorrectAnswer)
    }
}

/// Human-readable line for a transfer announcement.
#[must_use]
pub fn transfer_line(sender_name: &str, amount: &str, recipient: &str) -> String {
    let sender = if sender_name.is_empty() { "Someone" } else { sender_name };
    format!("{sender} sent {amount} USDT to {recipient}")
}

/// Human-readable line for a correct-answer notice.
#[must_use]
pub fn correct_answer_line(display_name: &str) -> String {
    format!("{display_name} answered correctly!")
}

// =============================================================================
// TRACKER
// =============================================================================

/// Result of one scan over the message log.
#[derive(Debug, Default)]
pub struct Scan {
    /// New notices, in log order.
    pub notifications: Vec<Notification>,
    /// Newest question broadcast in the log, when it was not reported by an
    /// earlier scan.
    pub latest_question: Option<QuizQuestion>,
}

#[derive(Debug, Default)]
pub struct SideEffectTracker {
    processed: HashSet<MessageId>,
    last_question: Option<MessageId>,
}

impl SideEffectTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the full log and return notices for messages not seen before.
    pub fn scan(&mut self, messages: &[RawMessage]) -> Scan {
        let mut scan = Scan::default();
        let mut newest_question = None;

        for message in messages {
            if self.processed.contains(&message.id) {
                continue;
            }

            let payload = payloads::decode(&message.text);
            let text = match payload {
                Payload::MoneyTransfer { sender_name, amount, recipient } => {
                    Some((NotificationKind::Transfer, transfer_line(&sender_name, &amount, &recipient)))
                }
                Payload::CorrectAnswer { display_name } => {
                    Some((NotificationKind::CorrectAnswer, correct_answer_line(&display_name)))
                }
                Payload::Question { question, answer } => {
                    newest_question = Some((message.id, question, answer));
                    None
                }
                Payload::Unparsable { .. } => {
                    debug!(message_id = %message.id, "chat text is not a structured payload");
                    None
                }
                Payload::Chat { .. } => None,
            };

            if let Some((kind, text)) = text {
                self.processed.insert(message.id);
                info!(message_id = %message.id, kind = kind_name(kind), %text, "chat side effect");
                scan.notifications.push(Notification { message_id: Some(message.id), kind, text });
            }
        }

        if let Some((id, question, answer)) = newest_question {
            if self.last_question != Some(id) {
                self.last_question = Some(id);
                debug!(message_id = %id, "new quiz question in log");
                scan.latest_question = Some(QuizQuestion::from_broadcast(question, answer));
            }
        }

        scan
    }

    /// Whether the side effect for `id` has already fired.
    #[must_use]
    pub fn is_processed(&self, id: MessageId) -> bool {
        self.processed.contains(&id)
    }

    #[must_use]
    pub fn processed_len(&self) -> usize {
        self.processed.len()
    }
}

fn kind_name(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Transfer => PayloadKind::MoneyTransfer.as_str(),
        NotificationKind::CorrectAnswer => PayloadKind::CorrectAnswer.as_str(),
        NotificationKind::Error => "error",
    }
}

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tests;
