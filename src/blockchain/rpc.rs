//! JSON-RPC token backend built on alloy contract bindings.
//!
//! # Responsibilities
//! - Issue `balanceOf` / `tokenPrice` reads with a per-call timeout
//! - Send `buyTokens` / `mint` from the session's account
//! - Wait for a single block of inclusion and check the receipt status
//! - Classify RPC errors (EIP-1193 user rejection, revert, transport)

use alloy::contract::Error as ContractError;
use alloy::network::Ethereum;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, PendingTransactionError};
use alloy::sol;
use alloy::transports::TransportError;
use async_trait::async_trait;
use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::contract::{PendingTransaction, TokenBackend};
use crate::blockchain::types::{CallFailure, TxConfirmation};

/// EIP-1193 error code for a request the user declined.
pub const USER_REJECTED_CODE: i64 = 4001;

sol! {
    #[sol(rpc)]
    contract Token {
        function balanceOf(address account) external view returns (uint256);
        function tokenPrice() external view returns (uint256);
        function buyTokens() external payable;
        function mint(address to, uint256 amount) external;
    }
}

/// Classify an RPC error returned by the node or wallet.
pub fn classify_transport_error(err: &TransportError) -> CallFailure {
    match err.as_error_resp() {
        Some(payload) if payload.code == USER_REJECTED_CODE => CallFailure::UserRejected,
        Some(payload) if payload.message.to_lowercase().contains("revert") => CallFailure::Reverted,
        _ => CallFailure::Transport(err.to_string()),
    }
}

fn classify_contract_error(err: ContractError) -> CallFailure {
    match err {
        ContractError::TransportError(e) => classify_transport_error(&e),
        other => CallFailure::Transport(other.to_string()),
    }
}

fn classify_pending_error(err: PendingTransactionError) -> CallFailure {
    match err {
        PendingTransactionError::TransportError(e) => classify_transport_error(&e),
        other => CallFailure::Transport(other.to_string()),
    }
}

/// Token contract reached over JSON-RPC, sending from one account.
pub struct RpcTokenBackend {
    contract: Token::TokenInstance<DynProvider>,
    from: Address,
    read_timeout: Duration,
}

impl RpcTokenBackend {
    pub fn new(
        contract_address: Address,
        provider: DynProvider,
        from: Address,
        read_timeout: Duration,
    ) -> Self {
        Self {
            contract: Token::new(contract_address, provider),
            from,
            read_timeout,
        }
    }

    async fn with_timeout<T, F>(&self, call: &str, fut: F) -> Result<T, CallFailure>
    where
        F: IntoFuture<Output = Result<T, ContractError>>,
    {
        match timeout(self.read_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(call = call, error = %e, "RPC error");
                Err(classify_contract_error(e))
            }
            Err(_) => {
                tracing::warn!(call = call, "RPC timeout");
                Err(CallFailure::Transport(format!(
                    "{call} timed out after {} seconds",
                    self.read_timeout.as_secs()
                )))
            }
        }
    }
}

#[async_trait]
impl TokenBackend for RpcTokenBackend {
    async fn balance_of(&self, owner: Address) -> Result<U256, CallFailure> {
        let call = self.contract.balanceOf(owner);
        self.with_timeout("balanceOf", call.call()).await
    }

    async fn token_price(&self) -> Result<U256, CallFailure> {
        let call = self.contract.tokenPrice();
        self.with_timeout("tokenPrice", call.call()).await
    }

    async fn buy_tokens(&self, value: U256) -> Result<Box<dyn PendingTransaction>, CallFailure> {
        let pending = self
            .contract
            .buyTokens()
            .from(self.from)
            .value(value)
            .send()
            .await
            .map_err(classify_contract_error)?;
        tracing::info!(tx_hash = %pending.tx_hash(), "buyTokens broadcast");
        Ok(Box::new(RpcPendingTransaction { inner: pending }))
    }

    async fn mint(
        &self,
        to: Address,
        amount: U256,
    ) -> Result<Box<dyn PendingTransaction>, CallFailure> {
        let pending = self
            .contract
            .mint(to, amount)
            .from(self.from)
            .send()
            .await
            .map_err(classify_contract_error)?;
        tracing::info!(tx_hash = %pending.tx_hash(), "mint broadcast");
        Ok(Box::new(RpcPendingTransaction { inner: pending }))
    }
}

/// A broadcast transaction tracked through the provider.
struct RpcPendingTransaction {
    inner: PendingTransactionBuilder<Ethereum>,
}

#[async_trait]
impl PendingTransaction for RpcPendingTransaction {
    fn tx_hash(&self) -> TxHash {
        *self.inner.tx_hash()
    }

    async fn confirm(self: Box<Self>) -> Result<TxConfirmation, CallFailure> {
        let receipt = self
            .inner
            .with_required_confirmations(1)
            .get_receipt()
            .await
            .map_err(classify_pending_error)?;

        if !receipt.status() {
            tracing::warn!(tx_hash = %receipt.transaction_hash, "Transaction reverted");
            return Err(CallFailure::Reverted);
        }

        Ok(TxConfirmation {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }
}
