//! Wallet boundary — token transfers signed outside the chat core.
//!
//! DESIGN
//! ======
//! The chat core only needs "send this amount to that address" with a
//! success/failure answer; no transaction id is surfaced. `Wallet` is the
//! seam. `JsonRpcWallet` implements it against an Ethereum-style JSON-RPC
//! endpoint whose node holds the signing account.

pub mod abi;
pub mod amount;
pub mod rpc;

pub use amount::{Amount, AmountError};
pub use rpc::{JsonRpcWallet, WalletConfig};

/// Errors produced by wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// The node exposes no account to send from.
    #[error("no wallet account available")]
    NoAccount,

    /// The node is on a different chain than configured.
    #[error("wrong chain: expected {expected}, got {actual}")]
    WrongChain { expected: u64, actual: u64 },

    #[error(transparent)]
    InvalidAddress(#[from] abi::InvalidAddress),

    #[error(transparent)]
    Amount(#[from] AmountError),

    /// The HTTP request to the node failed.
    #[error("RPC request failed: {0}")]
    Request(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The node's answer could not be interpreted.
    #[error("RPC response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Signs and submits token transfers.
#[async_trait::async_trait]
pub trait Wallet: Send + Sync {
    /// Transfer `amount` tokens to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns a [`WalletError`] if the transfer was not submitted.
    async fn send_transfer(&self, recipient: &str, amount: &Amount) -> Result<(), WalletError>;
}
