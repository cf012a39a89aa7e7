//! Transaction request and executor state.

use alloy::primitives::Address;

use crate::blockchain::types::{ClientError, ClientResult};
use crate::blockchain::units::TokenAmount;

/// Which contract write a request performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Buy,
    Mint,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy => "buy",
            TransactionKind::Mint => "mint",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submission built from the user's input, consumed by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub kind: TransactionKind,
    /// Amount exactly as typed.
    pub raw_amount: String,
    /// Mint target. Ignored for purchases.
    pub recipient: Option<Address>,
}

impl TransactionRequest {
    pub fn buy(raw_amount: impl Into<String>) -> Self {
        Self {
            kind: TransactionKind::Buy,
            raw_amount: raw_amount.into(),
            recipient: None,
        }
    }

    /// Mint to `recipient`, or to the session address when `None`.
    pub fn mint(raw_amount: impl Into<String>, recipient: Option<Address>) -> Self {
        Self {
            kind: TransactionKind::Mint,
            raw_amount: raw_amount.into(),
            recipient,
        }
    }

    /// Parse the amount, rejecting anything that is not strictly positive.
    pub fn amount(&self) -> ClientResult<TokenAmount> {
        let amount = TokenAmount::parse(&self.raw_amount)?;
        if amount.is_zero() {
            return Err(ClientError::InvalidInput("amount must be greater than zero".to_string()));
        }
        Ok(amount)
    }
}

/// Executor state (0=Idle, 1=Submitting).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Idle = 0,
    Submitting = 1,
}

impl From<u8> for ExecutionState {
    fn from(val: u8) -> Self {
        match val {
            1 => ExecutionState::Submitting,
            _ => ExecutionState::Idle,
        }
    }
}
