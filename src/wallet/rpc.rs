//! JSON-RPC wallet client.
//!
//! Thin HTTP wrapper around `eth_chainId`, `eth_accounts` and
//! `eth_sendTransaction`. The node signs with its own account; this client
//! never sees a private key. Pure parsing in `parse_rpc_response` for
//! testability.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::{Value, json};
use tracing::info;

use super::abi::{self, Address};
use super::{Amount, Wallet, WalletError};

/// BEP-20 USDT on BNB Smart Chain.
pub const DEFAULT_TOKEN_CONTRACT: &str = "0x55d398326f99059ff775485246999027b3197955";
pub const DEFAULT_CHAIN_ID: u64 = 56;
pub const TOKEN_DECIMALS: u32 = 18;

const GAS_LIMIT: u128 = 200_000;
const GAS_PRICE_WEI: u128 = 20_000_000_000;
const REQUEST_TIMEOUT_SECS: u64 = 60;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    pub rpc_url: String,
    pub token_contract: String,
    pub chain_id: u64,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct JsonRpcWallet {
    http: reqwest::Client,
    rpc_url: String,
    token_contract: Address,
    chain_id: u64,
    next_id: AtomicU64,
}

impl JsonRpcWallet {
    /// Build a client for the configured node.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InvalidAddress`] for a bad token contract and
    /// [`WalletError::HttpClientBuild`] if the HTTP client fails.
    pub fn new(config: &WalletConfig) -> Result<Self, WalletError> {
        let token_contract = Address::parse(&config.token_contract)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| WalletError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            rpc_url: config.rpc_url.clone(),
            token_contract,
            chain_id: config.chain_id,
            next_id: AtomicU64::new(1),
        })
    }

    /// Chain the node is connected to.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError`] when the RPC call fails or the result is not a
    /// hex quantity.
    pub async fn chain_id(&self) -> Result<u64, WalletError> {
        let result = self.call("eth_chainId", json!([])).await?;
        result
            .as_str()
            .and_then(abi::parse_hex_quantity)
            .ok_or_else(|| WalletError::Parse(format!("bad chain id: {result}")))
    }

    /// First account the node can sign for.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::NoAccount`] when the node exposes no account, or
    /// the RPC / address parse error.
    pub async fn account(&self) -> Result<Address, WalletError> {
        let result = self.call("eth_accounts", json!([])).await?;
        let first = result
            .as_array()
            .and_then(|accounts| accounts.first())
            .and_then(Value::as_str)
            .ok_or(WalletError::NoAccount)?;
        Ok(Address::parse(first)?)
    }

    async fn send_transaction(&self, from: &Address, data: String) -> Result<String, WalletError> {
        let tx = json!([{
            "from": from.to_string(),
            "to": self.token_contract.to_string(),
            "data": data,
            "gas": abi::hex_quantity(GAS_LIMIT),
            "gasPrice": abi::hex_quantity(GAS_PRICE_WEI),
        }]);
        let result = self.call("eth_sendTransaction", tx).await?;
        result
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| WalletError::Parse(format!("bad transaction hash: {result}")))
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| WalletError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(WalletError::Request(format!("status {}: {text}", status.as_u16())));
        }

        parse_rpc_response(&text)
    }
}

#[async_trait::async_trait]
impl Wallet for JsonRpcWallet {
    async fn send_transfer(&self, recipient: &str, amount: &Amount) -> Result<(), WalletError> {
        let recipient = Address::parse(recipient)?;
        let units = amount.to_base_units(TOKEN_DECIMALS)?;

        let actual = self.chain_id().await?;
        if actual != self.chain_id {
            return Err(WalletError::WrongChain { expected: self.chain_id, actual });
        }
        let from = self.account().await?;

        let approve_hash = self
            .send_transaction(&from, abi::encode_approve(&self.token_contract, units))
            .await?;
        let transfer_hash = self
            .send_transaction(&from, abi::encode_transfer(&recipient, units))
            .await?;

        info!(%from, %recipient, %amount, %approve_hash, %transfer_hash, "token transfer submitted");
        Ok(())
    }
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

/// Extract `result` from a JSON-RPC response body, or its `error` object.
pub(crate) fn parse_rpc_response(text: &str) -> Result<Value, WalletError> {
    let value: Value = serde_json::from_str(text).map_err(|e| WalletError::Parse(e.to_string()))?;

    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_owned();
        return Err(WalletError::Rpc { code, message });
    }

    value
        .get("result")
        .cloned()
        .ok_or_else(|| WalletError::Parse("response has neither result nor error".into()))
}

#[cfg(test)]
#[path = "rpc_test.rs"]
mod tests;
