//! Session-scoped chat state.
//!
//! DESIGN
//! ======
//! The transport delivers chat messages as an append-only sequence. The
//! `MessageLog` assigns each delivered message a `MessageId` at append time;
//! that id is the message's identity for side-effect deduplication, so two
//! messages with identical text stay distinct. Nothing here is persisted:
//! everything lives for one call and is dropped on leave.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// MESSAGES
// =============================================================================

/// Identity of a delivered chat message within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inbound chat record as delivered by the transport, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    pub id: MessageId,
    pub sender_id: String,
    pub text: String,
    /// Milliseconds since Unix epoch, as reported by the transport.
    pub timestamp: i64,
}

/// Append-only log of delivered messages.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<RawMessage>,
    next_id: u64,
}

impl MessageLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delivered message and return its identity.
    pub fn append(&mut self, sender_id: impl Into<String>, text: impl Into<String>, timestamp: i64) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(RawMessage { id, sender_id: sender_id.into(), text: text.into(), timestamp });
        id
    }

    #[must_use]
    pub fn messages(&self) -> &[RawMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// The local participant, as seen by the chat panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIdentity {
    /// Participant id assigned by the transport; compared against `RawMessage::sender_id`.
    pub participant_id: String,
    pub display_name: String,
}

// =============================================================================
// DISPLAY
// =============================================================================

/// Who a rendered line is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    #[serde(rename = "self")]
    SelfSent,
    Other,
    Unknown,
}

/// One rendered line of the chat panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub key: MessageId,
    pub sender: Sender,
    pub line: String,
    /// Transfer and correct-answer lines are drawn highlighted.
    pub highlighted: bool,
}

// =============================================================================
// PANEL
// =============================================================================

/// User-facing state of the chat panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub is_open: bool,
    /// Badge count; always 0 while the panel is open.
    pub unread_count: usize,
    pub draft: String,
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
