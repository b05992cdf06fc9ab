//! Transfer service — wallet token transfer, then a chat announcement.
//!
//! DESIGN
//! ======
//! The wallet transfer and the chat announcement are two uncoordinated
//! operations. The announcement is only sent once the wallet reports
//! success; there is no confirmation that it reached anyone. Failures are
//! returned to the caller, which shows them as a notice. Nothing is retried.

use payloads::Payload;
use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::peers::{DirectoryError, Peer};
use crate::services::tracker::Notification;
use crate::transport::Transport;
use crate::wallet::{Amount, AmountError, Wallet, WalletError};

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),
    #[error("{peer} has no wallet address")]
    NoRecipientWallet { peer: String },
    #[error("no wallet connected")]
    WalletUnavailable,
    #[error("session has left the room")]
    SessionClosed,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("wallet transfer failed: {0}")]
    Wallet(#[from] WalletError),
}

impl ErrorCode for TransferError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "E_INVALID_AMOUNT",
            Self::NoRecipientWallet { .. } => "E_NO_RECIPIENT_WALLET",
            Self::WalletUnavailable => "E_WALLET_UNAVAILABLE",
            Self::SessionClosed => "E_SESSION_CLOSED",
            Self::Directory(DirectoryError::NotFound(_)) => "E_PEER_NOT_FOUND",
            Self::Directory(_) => "E_DIRECTORY",
            Self::Wallet(_) => "E_WALLET",
        }
    }

    fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Directory(DirectoryError::Request(_)) | Self::Wallet(WalletError::Request(_))
        )
    }
}

impl TransferError {
    /// Error notice shown to the user.
    #[must_use]
    pub fn notice(&self) -> Notification {
        Notification::error(format!("Failed to send USDT: {self} [{}]", self.error_code()))
    }
}

/// Transfer `amount` to `peer` through `wallet`, then announce it in chat.
///
/// Returns the parsed amount on success.
///
/// # Errors
///
/// Returns [`TransferError`] when the amount is invalid, the peer has no
/// wallet, or the wallet fails. No announcement is sent in any error case.
pub async fn send_and_announce(
    wallet: &dyn Wallet,
    transport: &dyn Transport,
    sender_name: &str,
    peer: &Peer,
    amount: &str,
) -> Result<Amount, TransferError> {
    let amount = Amount::parse(amount)?;
    if peer.wallet_address.trim().is_empty() {
        return Err(TransferError::NoRecipientWallet { peer: peer.display_name.clone() });
    }

    if let Err(e) = wallet.send_transfer(&peer.wallet_address, &amount).await {
        warn!(error = %e, peer_id = %peer.id, %amount, "token transfer failed");
        return Err(e.into());
    }

    let announcement = Payload::MoneyTransfer {
        sender_name: sender_name.to_owned(),
        amount: amount.to_string(),
        recipient: peer.display_name.clone(),
    };
    match payloads::encode(&announcement) {
        Ok(text) => transport.send_message(text),
        Err(e) => warn!(error = %e, "transfer announcement not sent"),
    }
    info!(peer_id = %peer.id, %amount, "transfer announced");

    Ok(amount)
}

#[cfg(test)]
#[path = "transfer_test.rs"]
mod tests;
