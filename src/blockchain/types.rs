//! Error taxonomy and shared chain types.

use alloy::primitives::TxHash;
use thiserror::Error;

/// Why a state-changing contract call did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallFailure {
    /// The user declined the transaction prompt.
    #[error("transaction declined by the user")]
    UserRejected,

    /// The transaction was included but reverted.
    #[error("transaction reverted")]
    Reverted,

    /// Network or RPC error during submission or confirmation.
    #[error("{0}")]
    Transport(String),
}

/// Errors surfaced by the wallet session and transaction lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No wallet provider is available in this environment.
    #[error("no wallet available, install a wallet provider")]
    ProviderUnavailable,

    /// The user declined the connection request.
    #[error("connection declined: {0}")]
    UserRejected(String),

    /// The wallet provider failed to answer (other than a user decline).
    #[error("wallet provider error: {0}")]
    ProviderFailed(String),

    /// Balance or price query failed. Non-fatal.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// Transaction submission or confirmation failed.
    #[error("contract call failed: {0}")]
    ContractCallFailed(CallFailure),

    /// Amount was empty, unparseable, non-positive or too precise.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Contract operation attempted without a connected session.
    #[error("wallet not connected")]
    NotConnected,

    /// A transaction is already being submitted.
    #[error("a transaction is already in flight")]
    TransactionInFlight,

    /// The contract interface descriptor is missing a required function.
    #[error("contract interface error: {0}")]
    Interface(String),
}

impl ClientError {
    /// Whether the error was caught before anything was sent to the network.
    pub fn is_rejected_locally(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidInput(_)
                | ClientError::NotConnected
                | ClientError::TransactionInFlight
        )
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Outcome of a transaction that was included successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxConfirmation {
    /// Hash of the included transaction.
    pub tx_hash: TxHash,
    /// Block the transaction landed in, if the node reported it.
    pub block_number: Option<u64>,
}
