//! Session configuration parsed from environment variables.

use std::str::FromStr;
use std::time::Duration;

use uuid::Uuid;

use crate::peers::DirectoryConfig;
use crate::wallet::WalletConfig;
use crate::wallet::rpc::{DEFAULT_CHAIN_ID, DEFAULT_TOKEN_CONTRACT};

pub const DEFAULT_DISPLAY_NAME: &str = "Anonymous";
pub const DEFAULT_CELEBRATION_MS: u64 = 5000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub room_url: String,
    pub display_name: String,
    pub peer_id: Uuid,
    pub celebration_window: Duration,
    /// `None` keeps the peer directory in memory.
    pub directory: Option<DirectoryConfig>,
    /// `None` runs without a wallet; transfers are refused.
    pub wallet: Option<WalletConfig>,
}

impl SessionConfig {
    /// Build typed session config from environment variables.
    ///
    /// Required:
    /// - `ROOM_URL`
    ///
    /// Optional:
    /// - `DISPLAY_NAME`: default `Anonymous`
    /// - `PEER_ID`: UUID, random when absent
    /// - `CELEBRATION_MS`: default 5000
    /// - `PEERS_URL` + `PEERS_API_KEY`: REST peer directory
    /// - `WALLET_RPC_URL`: JSON-RPC wallet endpoint
    /// - `TOKEN_CONTRACT`: default BEP-20 USDT
    /// - `CHAIN_ID`: default 56
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required var is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable source.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let room_url = get("ROOM_URL").ok_or(ConfigError::Missing { var: "ROOM_URL" })?;
        let display_name = get("DISPLAY_NAME").unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_owned());
        let peer_id = parse_var::<Uuid>("PEER_ID", get("PEER_ID"))?.unwrap_or_else(Uuid::new_v4);
        let celebration_ms = parse_var::<u64>("CELEBRATION_MS", get("CELEBRATION_MS"))?.unwrap_or(DEFAULT_CELEBRATION_MS);

        let directory = match (get("PEERS_URL"), get("PEERS_API_KEY")) {
            (Some(base_url), Some(api_key)) => Some(DirectoryConfig { base_url, api_key }),
            (Some(_), None) => return Err(ConfigError::Missing { var: "PEERS_API_KEY" }),
            (None, _) => None,
        };

        let wallet = match get("WALLET_RPC_URL") {
            Some(rpc_url) => Some(WalletConfig {
                rpc_url,
                token_contract: get("TOKEN_CONTRACT").unwrap_or_else(|| DEFAULT_TOKEN_CONTRACT.to_owned()),
                chain_id: parse_var::<u64>("CHAIN_ID", get("CHAIN_ID"))?.unwrap_or(DEFAULT_CHAIN_ID),
            }),
            None => None,
        };

        Ok(Self {
            room_url,
            display_name,
            peer_id,
            celebration_window: Duration::from_millis(celebration_ms),
            directory,
            wallet,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError> {
    raw.map(|value| value.parse::<T>().map_err(|_| ConfigError::Invalid { var, value }))
        .transpose()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
