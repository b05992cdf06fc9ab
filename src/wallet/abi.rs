//! Minimal ERC-20 call encoding.
//!
//! Only the two calls a token transfer needs: `approve(address,uint256)` and
//! `transfer(address,uint256)`. Arguments are static 32-byte words, so the
//! calldata is the 4-byte selector followed by two left-padded words.

use std::fmt::{self, Write};

/// Selector of `transfer(address,uint256)`.
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];
/// Selector of `approve(address,uint256)`.
pub const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid address: {0}")]
pub struct InvalidAddress(pub String);

/// A 20-byte account or contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Parse a `0x`-prefixed, 40-hex-digit address. Checksum casing is not verified.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAddress`] for anything else.
    pub fn parse(raw: &str) -> Result<Self, InvalidAddress> {
        let invalid = || InvalidAddress(raw.to_owned());
        let hex = raw.trim().strip_prefix("0x").or_else(|| raw.trim().strip_prefix("0X")).ok_or_else(invalid)?;
        if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut bytes = [0u8; 20];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(hex.get(i * 2..i * 2 + 2).ok_or_else(invalid)?, 16).map_err(|_| invalid())?;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", bytes_to_hex(&self.0))
    }
}

/// Calldata for `transfer(to, amount)`.
#[must_use]
pub fn encode_transfer(to: &Address, amount: u128) -> String {
    encode_call(TRANSFER_SELECTOR, to, amount)
}

/// Calldata for `approve(spender, amount)`.
#[must_use]
pub fn encode_approve(spender: &Address, amount: u128) -> String {
    encode_call(APPROVE_SELECTOR, spender, amount)
}

/// `0x`-prefixed minimal hex quantity, as JSON-RPC expects for numbers.
#[must_use]
pub fn hex_quantity(value: u128) -> String {
    format!("{value:#x}")
}

/// Parse a JSON-RPC hex quantity such as `"0x38"`.
#[must_use]
pub fn parse_hex_quantity(raw: &str) -> Option<u64> {
    let hex = raw.strip_prefix("0x")?;
    if hex.is_empty() {
        return None;
    }
    u64::from_str_radix(hex, 16).ok()
}

fn encode_call(selector: [u8; 4], address: &Address, amount: u128) -> String {
    let mut word_address = [0u8; 32];
    word_address[12..].copy_from_slice(&address.0);
    let mut word_amount = [0u8; 32];
    word_amount[16..].copy_from_slice(&amount.to_be_bytes());

    let mut out = String::with_capacity(2 + 8 + 128);
    out.push_str("0x");
    out.push_str(&bytes_to_hex(&selector));
    out.push_str(&bytes_to_hex(&word_address));
    out.push_str(&bytes_to_hex(&word_amount));
    out
}

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

#[cfg(test)]
#[path = "abi_test.rs"]
mod tests;
