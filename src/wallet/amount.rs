//! Decimal token amounts as typed by the user.
//!
//! Amounts travel as decimal strings (the chat announcement repeats the text
//! the user entered). The wallet needs integer base units, so conversion is
//! exact and checked: no floats anywhere.

use std::fmt;

/// Most fractional digits any supported token accepts.
pub const MAX_DECIMALS: u32 = 18;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount is not a decimal number: {0}")]
    Invalid(String),
    #[error("amount must be greater than zero")]
    Zero,
    #[error("amount has more than {decimals} decimal places")]
    TooPrecise { decimals: u32 },
    #[error("amount is too large")]
    Overflow,
}

/// A positive decimal amount, kept in its textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    text: String,
}

impl Amount {
    /// Parse a user-entered amount such as `"5"`, `"0.25"` or `"12."`.
    ///
    /// # Errors
    ///
    /// Rejects blank input, signs, exponents, more than one decimal point,
    /// zero, and more than [`MAX_DECIMALS`] fractional digits.
    pub fn parse(raw: &str) -> Result<Self, AmountError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(AmountError::Empty);
        }

        let (int_part, frac_part) = split_decimal(text)?;
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(AmountError::Invalid(text.to_owned()));
        }
        if u32::try_from(frac_part.len()).map_or(true, |n| n > MAX_DECIMALS) {
            return Err(AmountError::TooPrecise { decimals: MAX_DECIMALS });
        }
        if int_part.bytes().chain(frac_part.bytes()).all(|b| b == b'0') {
            return Err(AmountError::Zero);
        }

        Ok(Self { text: text.to_owned() })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Convert to integer base units for a token with `decimals` decimals.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::TooPrecise`] when the amount has more fractional
    /// digits than the token, and [`AmountError::Overflow`] past `u128::MAX`.
    pub fn to_base_units(&self, decimals: u32) -> Result<u128, AmountError> {
        let (int_part, frac_part) = split_decimal(&self.text)?;
        let frac_len = u32::try_from(frac_part.len()).map_err(|_| AmountError::TooPrecise { decimals })?;
        if frac_len > decimals {
            return Err(AmountError::TooPrecise { decimals });
        }

        let scale = 10u128.checked_pow(decimals).ok_or(AmountError::Overflow)?;
        let whole = parse_digits(int_part)?.checked_mul(scale).ok_or(AmountError::Overflow)?;
        let frac_scale = 10u128.checked_pow(decimals - frac_len).ok_or(AmountError::Overflow)?;
        let frac = parse_digits(frac_part)?.checked_mul(frac_scale).ok_or(AmountError::Overflow)?;
        whole.checked_add(frac).ok_or(AmountError::Overflow)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn split_decimal(text: &str) -> Result<(&str, &str), AmountError> {
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !digits(int_part) || !digits(frac_part) {
        return Err(AmountError::Invalid(text.to_owned()));
    }
    Ok((int_part, frac_part))
}

fn parse_digits(digits: &str) -> Result<u128, AmountError> {
    digits.bytes().try_fold(0u128, |acc, b| {
        acc.checked_mul(10)
            .and_then(|n| n.checked_add(u128::from(b - b'0')))
            .ok_or(AmountError::Overflow)
    })
}

#[cfg(test)]
#[path = "amount_test.rs"]
mod tests;
