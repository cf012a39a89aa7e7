//! Conversion between display decimals and the contract's base units.
//!
//! The token and the native currency both use 18 fractional digits. Amounts
//! are held in base units so that arithmetic stays exact; the decimal form
//! only exists at the input and display edges.

use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::{uint, U256};
use std::fmt;
use std::str::FromStr;

use crate::blockchain::types::{ClientError, ClientResult};

/// Fractional-unit exponent of the token and of the native currency.
pub const TOKEN_DECIMALS: u8 = 18;

/// Base units in one display unit (10^18).
pub const BASE_UNITS_PER_TOKEN: U256 = uint!(1_000_000_000_000_000_000_U256);

/// An amount held in base units, displayed as an 18-decimal number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(U256);

impl TokenAmount {
    pub const ZERO: Self = Self(U256::ZERO);

    /// Wrap a raw base-unit integer as returned by the contract.
    pub const fn from_base_units(value: U256) -> Self {
        Self(value)
    }

    /// The base-unit integer sent to the contract.
    pub const fn base_units(self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parse a user-entered decimal such as `"1.5"` or `"20"`.
    ///
    /// Rejects empty, signed or malformed input and anything that would need
    /// more than 18 fractional digits. Trailing zeros past the 18th digit are
    /// accepted since they do not change the value.
    pub fn parse(input: &str) -> ClientResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidInput("amount is empty".to_string()));
        }
        if trimmed.starts_with('-') {
            return Err(ClientError::InvalidInput(format!(
                "amount must be positive, got '{trimmed}'"
            )));
        }

        let well_formed = trimmed.chars().all(|c| c.is_ascii_digit() || c == '.')
            && trimmed.matches('.').count() <= 1
            && trimmed.chars().any(|c| c.is_ascii_digit());
        if !well_formed {
            return Err(ClientError::InvalidInput(format!(
                "'{trimmed}' is not a decimal number"
            )));
        }

        if let Some((_, fraction)) = trimmed.split_once('.') {
            let significant = fraction.trim_end_matches('0');
            if significant.len() > TOKEN_DECIMALS as usize {
                return Err(ClientError::InvalidInput(format!(
                    "'{trimmed}' has more than {TOKEN_DECIMALS} decimal places"
                )));
            }
        }

        match parse_units(trimmed, TOKEN_DECIMALS) {
            Ok(ParseUnits::U256(value)) => Ok(Self(value)),
            Ok(ParseUnits::I256(_)) => Err(ClientError::InvalidInput(format!(
                "amount must be positive, got '{trimmed}'"
            ))),
            Err(e) => Err(ClientError::InvalidInput(format!("'{trimmed}': {e}"))),
        }
    }

    /// Native value owed for buying `self` tokens at `price` per token.
    ///
    /// Exact: the product must land on a whole base unit.
    pub fn value_at(self, price: TokenAmount) -> ClientResult<TokenAmount> {
        let product = self.0.checked_mul(price.0).ok_or_else(|| {
            ClientError::InvalidInput("purchase value overflows uint256".to_string())
        })?;
        let (value, remainder) = product.div_rem(BASE_UNITS_PER_TOKEN);
        if !remainder.is_zero() {
            return Err(ClientError::InvalidInput(format!(
                "purchase value of {self} at {price} needs more than {TOKEN_DECIMALS} decimal places"
            )));
        }
        Ok(Self(value))
    }
}

impl FromStr for TokenAmount {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<U256> for TokenAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match format_units(self.0, TOKEN_DECIMALS) {
            Ok(formatted) => f.write_str(&trim_fraction(&formatted)),
            Err(_) => write!(f, "{} base units", self.0),
        }
    }
}

/// `"1.500000000000000000"` -> `"1.5"`, `"2.000000000000000000"` -> `"2.0"`.
fn trim_fraction(formatted: &str) -> String {
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{formatted}.0"),
    }
}
