//! Transport boundary — the call's chat channel and room membership.
//!
//! ARCHITECTURE
//! ============
//! Media, signaling and the participant roster belong to the hosted call
//! service. The chat core only needs two things from it: a fire-and-forget
//! `send_message` and a stream of delivered messages. `Room` covers joining
//! and leaving. `LoopbackTransport` is an in-process implementation that
//! echoes every sent message back as a delivery, used by the terminal
//! driver and tests.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to join room {room}: {reason}")]
    Join { room: String, reason: String },
    #[error("transport channel closed")]
    Closed,
}

/// Outbound half of the chat channel.
pub trait Transport: Send + Sync {
    /// Hand a payload string to the transport. No delivery acknowledgment.
    fn send_message(&self, text: String);
}

/// Room membership.
#[async_trait::async_trait]
pub trait Room: Send + Sync {
    /// Join the call.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Join`] when the room cannot be joined.
    async fn join(&self) -> Result<(), TransportError>;

    async fn leave(&self);
}

/// A message as delivered by the transport, before it enters the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub sender_id: String,
    pub text: String,
    pub timestamp: i64,
}

/// Current time as milliseconds since Unix epoch.
pub(crate) fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

// =============================================================================
// LOOPBACK
// =============================================================================

pub struct LoopbackTransport {
    room_url: String,
    participant_id: String,
    tx: mpsc::UnboundedSender<Delivery>,
}

impl LoopbackTransport {
    /// Create a loopback transport and the receiver its deliveries arrive on.
    #[must_use]
    pub fn new(room_url: impl Into<String>, participant_id: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { room_url: room_url.into(), participant_id: participant_id.into(), tx }, rx)
    }

    /// Inject a message as if another participant had sent it.
    pub fn deliver_from(&self, sender_id: impl Into<String>, text: impl Into<String>) {
        let delivery = Delivery { sender_id: sender_id.into(), text: text.into(), timestamp: now_ms() };
        if self.tx.send(delivery).is_err() {
            warn!("loopback receiver dropped; message discarded");
        }
    }
}

impl Transport for LoopbackTransport {
    fn send_message(&self, text: String) {
        self.deliver_from(self.participant_id.clone(), text);
    }
}

#[async_trait::async_trait]
impl Room for LoopbackTransport {
    async fn join(&self) -> Result<(), TransportError> {
        if self.room_url.trim().is_empty() {
            return Err(TransportError::Join { room: self.room_url.clone(), reason: "empty room url".into() });
        }
        if self.tx.is_closed() {
            return Err(TransportError::Closed);
        }
        Ok(())
    }

    async fn leave(&self) {}
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
