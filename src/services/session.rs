//! Call session — the explicit context a chat panel lives in.
//!
//! ARCHITECTURE
//! ============
//! A `Session` is created by joining a room and owns everything that lives
//! for the length of the call: the message log, the chat panel and handles
//! to the transport, wallet and peer directory collaborators. Join failure
//! is fatal; there is no reconnect. `leave` tears the panel down (cancelling
//! pending timers) before leaving the room. After leave every outbound
//! operation fails with `SessionError::Left` or `TransferError::SessionClosed`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};
use uuid::Uuid;

use crate::peers::PeerDirectory;
use crate::services::celebration::Celebration;
use crate::services::panel::{ChatPanel, PanelUpdate, SubmitOutcome};
use crate::services::quiz::{QuizError, QuizQuestion};
use crate::services::transfer::{self, TransferError};
use crate::state::{LocalIdentity, MessageLog};
use crate::transport::{Delivery, Room, Transport, TransportError};
use crate::wallet::{Amount, Wallet};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Join(#[from] TransportError),
    #[error("session has left the room")]
    Left,
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Joined,
    Left,
}

/// External services a session talks to.
pub struct Collaborators {
    pub room: Arc<dyn Room>,
    pub transport: Arc<dyn Transport>,
    /// `None` when no wallet is connected; transfers then fail.
    pub wallet: Option<Arc<dyn Wallet>>,
    pub directory: Arc<dyn PeerDirectory>,
}

pub struct Session {
    room: Arc<dyn Room>,
    transport: Arc<dyn Transport>,
    wallet: Option<Arc<dyn Wallet>>,
    directory: Arc<dyn PeerDirectory>,
    log: MessageLog,
    panel: ChatPanel,
    status: SessionStatus,
}

impl Session {
    /// Join the room and set up the chat panel.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Join`] if the room cannot be joined.
    pub async fn join(
        identity: LocalIdentity,
        celebration_window: Duration,
        collaborators: Collaborators,
    ) -> Result<Self, SessionError> {
        if let Err(e) = collaborators.room.join().await {
            error!(error = %e, "failed to join room");
            return Err(e.into());
        }
        info!(participant_id = %identity.participant_id, display_name = %identity.display_name, "joined room");

        let panel = ChatPanel::new(identity, Arc::clone(&collaborators.transport), Celebration::new(celebration_window));
        Ok(Self {
            room: collaborators.room,
            transport: collaborators.transport,
            wallet: collaborators.wallet,
            directory: collaborators.directory,
            log: MessageLog::new(),
            panel,
            status: SessionStatus::Joined,
        })
    }

    /// Append a delivered message and update the panel.
    pub fn ingest(&mut self, delivery: Delivery) -> PanelUpdate {
        if self.status == SessionStatus::Left {
            debug!("message delivered after leave; dropped");
            return PanelUpdate::default();
        }
        let id = self.log.append(delivery.sender_id, delivery.text, delivery.timestamp);
        debug!(message_id = %id, "chat message delivered");
        self.panel.on_messages(self.log.messages())
    }

    /// Send `draft` as a chat line from the local participant.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Left`] after [`Self::leave`].
    pub fn submit(&mut self, draft: &str) -> Result<SubmitOutcome, SessionError> {
        self.ensure_joined()?;
        self.panel.set_draft(draft);
        Ok(self.panel.submit())
    }

    /// Broadcast a quiz question as the quiz host.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Quiz`] when the question or answer is blank,
    /// [`SessionError::Left`] after [`Self::leave`].
    pub fn ask_question(&mut self, question: &str, answer: &str) -> Result<(), SessionError> {
        self.ensure_joined()?;
        let question = QuizQuestion::new(question, answer)?;
        info!(question = %question.question, "quiz question broadcast");
        self.panel.broadcast_question(question);
        Ok(())
    }

    /// Send tokens to a participant and announce it in chat.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError`] when no wallet is connected, the peer cannot
    /// be resolved, the transfer fails, or the session has left the room.
    /// Show it with [`TransferError::notice`].
    pub async fn transfer_to(&self, peer_id: Uuid, amount: &str) -> Result<Amount, TransferError> {
        if self.status == SessionStatus::Left {
            return Err(TransferError::SessionClosed);
        }
        let wallet = self.wallet.as_deref().ok_or(TransferError::WalletUnavailable)?;
        let peer = self.directory.get_peer(peer_id).await?;
        transfer::send_and_announce(
            wallet,
            self.transport.as_ref(),
            &self.panel.identity().display_name,
            &peer,
            amount,
        )
        .await
    }

    /// Tear down the panel and leave the room. Idempotent.
    pub async fn leave(&mut self) {
        if self.status == SessionStatus::Left {
            return;
        }
        self.panel.teardown();
        self.room.leave().await;
        self.status = SessionStatus::Left;
        info!(messages = self.log.len(), "left room");
    }

    fn ensure_joined(&self) -> Result<(), SessionError> {
        if self.status == SessionStatus::Left {
            return Err(SessionError::Left);
        }
        Ok(())
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn panel(&self) -> &ChatPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut ChatPanel {
        &mut self.panel
    }

    #[must_use]
    pub fn log(&self) -> &MessageLog {
        &self.log
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
