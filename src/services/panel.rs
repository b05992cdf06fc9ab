//! Chat panel controller.
//!
//! DESIGN
//! ======
//! One `ChatPanel` per call session. It owns the processed set, the unread
//! counter, the quiz overlay, the rendered list and the celebration pulse,
//! and is driven by discrete handlers: `on_messages` when the transport
//! delivers, `submit` / `set_draft` from the input box, `open` / `close`
//! from the badge button, `teardown` on leave. The local identity and the
//! transport handle are passed in at construction.

use std::sync::Arc;

use payloads::Payload;
use tracing::warn;

use crate::services::celebration::Celebration;
use crate::services::quiz::{Quiz, QuizQuestion};
use crate::services::tracker::{Notification, SideEffectTracker, correct_answer_line, transfer_line};
use crate::services::unread::UnreadCounter;
use crate::state::{DisplayRecord, LocalIdentity, PanelState, RawMessage, Sender};
use crate::transport::Transport;

// =============================================================================
// OUTCOMES
// =============================================================================

/// What a message update changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PanelUpdate {
    pub notifications: Vec<Notification>,
    /// The standing quiz question was replaced.
    pub question_changed: bool,
    /// The rendered list changed length; the view should scroll to the latest entry.
    pub scroll_to_latest: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank draft, or the panel was torn down; nothing sent.
    Ignored,
    Sent,
    /// Sent, and the draft answered the standing question.
    SentCorrectAnswer,
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct ChatPanel {
    identity: LocalIdentity,
    transport: Arc<dyn Transport>,
    celebration: Celebration,
    tracker: SideEffectTracker,
    unread: UnreadCounter,
    quiz: Quiz,
    records: Vec<DisplayRecord>,
    draft: String,
    total: usize,
    torn_down: bool,
}

impl ChatPanel {
    #[must_use]
    pub fn new(identity: LocalIdentity, transport: Arc<dyn Transport>, celebration: Celebration) -> Self {
        Self {
            identity,
            transport,
            celebration,
            tracker: SideEffectTracker::new(),
            unread: UnreadCounter::new(),
            quiz: Quiz::new(),
            records: Vec::new(),
            draft: String::new(),
            total: 0,
            torn_down: false,
        }
    }

    /// Handle a transport update carrying the full message log.
    pub fn on_messages(&mut self, messages: &[RawMessage]) -> PanelUpdate {
        let scan = self.tracker.scan(messages);
        for notification in &scan.notifications {
            if notification.celebrates() {
                self.celebration.trigger();
            }
        }
        let question_changed = scan.latest_question.is_some_and(|q| self.quiz.set(q));

        let records = render_messages(messages, &self.identity.participant_id);
        let scroll_to_latest = records.len() != self.records.len();
        self.records = records;

        self.total = messages.len();
        self.unread.on_messages(self.total);

        PanelUpdate { notifications: scan.notifications, question_changed, scroll_to_latest }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Send the draft as a chat line.
    pub fn submit(&mut self) -> SubmitOutcome {
        let text = self.draft.trim();
        if self.torn_down || text.is_empty() {
            return SubmitOutcome::Ignored;
        }
        let text = text.to_owned();
        let answered = self.quiz.is_correct(&text);

        self.send(&Payload::chat(self.identity.display_name.clone(), text));
        if answered {
            self.send(&Payload::CorrectAnswer { display_name: self.identity.display_name.clone() });
            // Local feedback without waiting for the echo.
            self.celebration.trigger();
        }
        self.draft.clear();

        if answered { SubmitOutcome::SentCorrectAnswer } else { SubmitOutcome::Sent }
    }

    /// Broadcast a quiz question to the room and make it the standing one locally.
    pub fn broadcast_question(&mut self, question: QuizQuestion) {
        if self.torn_down {
            return;
        }
        self.send(&Payload::Question { question: question.question.clone(), answer: question.answer.clone() });
        self.quiz.set(question);
    }

    pub fn open(&mut self) {
        self.unread.open(self.total);
    }

    pub fn close(&mut self) {
        self.unread.close();
    }

    #[must_use]
    pub fn state(&self) -> PanelState {
        PanelState { is_open: self.unread.is_open(), unread_count: self.unread.unread(), draft: self.draft.clone() }
    }

    #[must_use]
    pub fn records(&self) -> &[DisplayRecord] {
        &self.records
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    #[must_use]
    pub fn identity(&self) -> &LocalIdentity {
        &self.identity
    }

    /// Cancel pending timers and drop the standing question. Call on leave;
    /// nothing is sent afterwards.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.celebration.cancel();
        self.quiz.clear();
    }

    fn send(&self, payload: &Payload) {
        match payloads::encode(payload) {
            Ok(text) => self.transport.send_message(text),
            Err(e) => warn!(error = %e, kind = payload.kind().as_str(), "chat payload not sent"),
        }
    }
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render the message log into display lines, in log order.
///
/// Questions are suppressed: the quiz banner shows them instead.
#[must_use]
pub fn render_messages(messages: &[RawMessage], local_id: &str) -> Vec<DisplayRecord> {
    messages.iter().filter_map(|m| render_message(m, local_id)).collect()
}

fn render_message(message: &RawMessage, local_id: &str) -> Option<DisplayRecord> {
    let is_self = !local_id.is_empty() && message.sender_id == local_id;
    let known = if is_self { Sender::SelfSent } else { Sender::Other };

    let (sender, line, highlighted) = match payloads::decode(&message.text) {
        Payload::Chat { sender_name, text } => (known, format!("{sender_name}: {text}"), false),
        Payload::MoneyTransfer { sender_name, amount, recipient } => {
            (known, transfer_line(&sender_name, &amount, &recipient), true)
        }
        Payload::CorrectAnswer { display_name } => (known, correct_answer_line(&display_name), true),
        Payload::Question { .. } => return None,
        Payload::Unparsable { raw_text } if is_self => (Sender::SelfSent, format!("You: {raw_text}"), false),
        Payload::Unparsable { raw_text } => (Sender::Unknown, format!("Unknown: {raw_text}"), false),
    };

    Some(DisplayRecord { key: message.id, sender, line, highlighted })
}

#[cfg(test)]
#[path = "panel_test.rs"]
mod tests;
