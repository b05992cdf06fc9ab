//! Peer directory — maps call participants to wallet addresses.
//!
//! ARCHITECTURE
//! ============
//! On entry each participant registers `(id, wallet, display name)`; the id
//! is also handed to the call service as the participant's external id, so
//! clicking a tile resolves to a directory row. The directory is a hosted
//! table behind a PostgREST-style API (`RestPeerDirectory`); the terminal
//! driver falls back to `InMemoryPeerDirectory` when none is configured.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const MIN_DISPLAY_NAME_LEN: usize = 3;

const TABLE: &str = "peers";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("display name must be at least {min} characters long")]
    InvalidDisplayName { min: usize },
    #[error("peer not found: {0}")]
    NotFound(Uuid),
    #[error("directory request failed: {0}")]
    Request(String),
    #[error("directory response error: status {status}")]
    Response { status: u16, body: String },
    #[error("directory response parse failed: {0}")]
    Parse(String),
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    pub id: Uuid,
    /// Wallet address; empty when the participant joined without a wallet.
    pub wallet_address: String,
    pub display_name: String,
}

/// Validate and trim a display name typed at entry.
///
/// # Errors
///
/// Returns [`DirectoryError::InvalidDisplayName`] for names shorter than
/// [`MIN_DISPLAY_NAME_LEN`] characters after trimming.
pub fn validate_display_name(raw: &str) -> Result<String, DirectoryError> {
    let name = raw.trim();
    if name.chars().count() < MIN_DISPLAY_NAME_LEN {
        return Err(DirectoryError::InvalidDisplayName { min: MIN_DISPLAY_NAME_LEN });
    }
    Ok(name.to_owned())
}

#[async_trait::async_trait]
pub trait PeerDirectory: Send + Sync {
    async fn add_peer(&self, peer: &Peer) -> Result<(), DirectoryError>;

    async fn get_peer(&self, id: Uuid) -> Result<Peer, DirectoryError>;
}

/// Register the local participant under its participant id.
///
/// # Errors
///
/// Returns [`DirectoryError::InvalidDisplayName`] or the directory's insert error.
pub async fn register(
    directory: &dyn PeerDirectory,
    id: Uuid,
    display_name: &str,
    wallet_address: Option<&str>,
) -> Result<Peer, DirectoryError> {
    let peer = Peer {
        id,
        wallet_address: wallet_address.unwrap_or_default().to_owned(),
        display_name: validate_display_name(display_name)?,
    };
    directory.add_peer(&peer).await?;
    Ok(peer)
}

// =============================================================================
// IN-MEMORY
// =============================================================================

#[derive(Default)]
pub struct InMemoryPeerDirectory {
    peers: RwLock<HashMap<Uuid, Peer>>,
}

#[async_trait::async_trait]
impl PeerDirectory for InMemoryPeerDirectory {
    async fn add_peer(&self, peer: &Peer) -> Result<(), DirectoryError> {
        self.peers.write().await.insert(peer.id, peer.clone());
        Ok(())
    }

    async fn get_peer(&self, id: Uuid) -> Result<Peer, DirectoryError> {
        self.peers.read().await.get(&id).cloned().ok_or(DirectoryError::NotFound(id))
    }
}

// =============================================================================
// REST
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub api_key: String,
}

pub struct RestPeerDirectory {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestPeerDirectory {
    /// Build a client for the configured directory.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::HttpClientBuild`] if the HTTP client fails.
    pub fn new(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| DirectoryError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{TABLE}", self.base_url)
    }

    async fn read_body(response: reqwest::Response) -> Result<String, DirectoryError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(DirectoryError::Response { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl PeerDirectory for RestPeerDirectory {
    async fn add_peer(&self, peer: &Peer) -> Result<(), DirectoryError> {
        let row = PeerRow {
            id: Some(peer.id),
            metamask_wallet: Some(peer.wallet_address.clone()),
            display_name: peer.display_name.clone(),
        };
        let response = self
            .http
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;
        Self::read_body(response).await?;
        Ok(())
    }

    async fn get_peer(&self, id: Uuid) -> Result<Peer, DirectoryError> {
        let response = self
            .http
            .get(format!("{}?id=eq.{id}&select=metamask_wallet,display_name", self.table_url()))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;
        let text = Self::read_body(response).await?;
        parse_peer_rows(id, &text)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PeerRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    #[serde(default)]
    metamask_wallet: Option<String>,
    display_name: String,
}

/// Interpret a `select` response: a JSON array with zero or one row.
pub(crate) fn parse_peer_rows(id: Uuid, text: &str) -> Result<Peer, DirectoryError> {
    let rows: Vec<PeerRow> = serde_json::from_str(text).map_err(|e| DirectoryError::Parse(e.to_string()))?;
    let row = rows.into_iter().next().ok_or(DirectoryError::NotFound(id))?;
    Ok(Peer { id, wallet_address: row.metamask_wallet.unwrap_or_default(), display_name: row.display_name })
}

#[cfg(test)]
#[path = "peers_test.rs"]
mod tests;
