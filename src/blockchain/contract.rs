//! Typed handle over the deployed token contract.
//!
//! # Responsibilities
//! - Bind the fixed contract address and interface to one signer
//! - Convert display decimals to base units and back at the call boundary
//! - Translate every backend failure into `ReadFailed` or `ContractCallFailed`
//!
//! No retries and no local authorization checks happen here; the contract is
//! the sole authority on who may mint.

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use std::sync::Arc;

use crate::blockchain::abi::ContractInterface;
use crate::blockchain::types::{CallFailure, ClientError, ClientResult, TxConfirmation};
use crate::blockchain::units::TokenAmount;

/// A submitted transaction awaiting inclusion.
#[async_trait]
pub trait PendingTransaction: Send {
    fn tx_hash(&self) -> TxHash;

    /// Wait for one block of inclusion and report whether it succeeded.
    async fn confirm(self: Box<Self>) -> Result<TxConfirmation, CallFailure>;
}

/// Raw base-unit calls against the token contract, bound to a signer.
#[async_trait]
pub trait TokenBackend: Send + Sync {
    async fn balance_of(&self, owner: Address) -> Result<U256, CallFailure>;

    async fn token_price(&self) -> Result<U256, CallFailure>;

    /// `buyTokens()` with `value` wei attached.
    async fn buy_tokens(&self, value: U256) -> Result<Box<dyn PendingTransaction>, CallFailure>;

    async fn mint(
        &self,
        to: Address,
        amount: U256,
    ) -> Result<Box<dyn PendingTransaction>, CallFailure>;
}

/// Handle on a submitted transaction.
pub struct TransactionHandle {
    pending: Box<dyn PendingTransaction>,
}

impl TransactionHandle {
    pub fn tx_hash(&self) -> TxHash {
        self.pending.tx_hash()
    }

    /// Await inclusion. Unbounded: an unresponsive node keeps this pending.
    pub async fn confirmation(self) -> ClientResult<TxConfirmation> {
        self.pending
            .confirm()
            .await
            .map_err(ClientError::ContractCallFailed)
    }
}

impl std::fmt::Debug for TransactionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionHandle")
            .field("tx_hash", &self.tx_hash())
            .finish()
    }
}

/// Contract proxy bound to the active session's signer.
///
/// Never mutated in place: a new signer means a new handle.
#[derive(Clone)]
pub struct ContractHandle {
    contract_address: Address,
    interface: ContractInterface,
    signer: Address,
    backend: Arc<dyn TokenBackend>,
}

impl ContractHandle {
    /// Bind a backend, failing if the interface lacks a required function.
    pub fn new(
        contract_address: Address,
        interface: ContractInterface,
        signer: Address,
        backend: Arc<dyn TokenBackend>,
    ) -> ClientResult<Self> {
        interface.verify()?;
        Ok(Self {
            contract_address,
            interface,
            signer,
            backend,
        })
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub fn interface(&self) -> &ContractInterface {
        &self.interface
    }

    /// Address whose signer authorizes this handle's transactions.
    pub fn signer(&self) -> Address {
        self.signer
    }

    /// Token balance of `owner` in display units.
    pub async fn read_balance(&self, owner: Address) -> ClientResult<TokenAmount> {
        self.backend
            .balance_of(owner)
            .await
            .map(TokenAmount::from_base_units)
            .map_err(|e| ClientError::ReadFailed(format!("balanceOf({owner}): {e}")))
    }

    /// Current per-token price in native display units.
    pub async fn read_price(&self) -> ClientResult<TokenAmount> {
        self.backend
            .token_price()
            .await
            .map(TokenAmount::from_base_units)
            .map_err(|e| ClientError::ReadFailed(format!("tokenPrice(): {e}")))
    }

    /// Submit `buyTokens()` carrying `native_value` of the chain currency.
    pub async fn submit_purchase(&self, native_value: TokenAmount) -> ClientResult<TransactionHandle> {
        tracing::debug!(
            contract = %self.contract_address,
            value = %native_value,
            "Submitting purchase"
        );
        let pending = self
            .backend
            .buy_tokens(native_value.base_units())
            .await
            .map_err(ClientError::ContractCallFailed)?;
        Ok(TransactionHandle { pending })
    }

    /// Submit `mint(recipient, amount)`.
    pub async fn submit_mint(
        &self,
        recipient: Address,
        amount: TokenAmount,
    ) -> ClientResult<TransactionHandle> {
        tracing::debug!(
            contract = %self.contract_address,
            recipient = %recipient,
            amount = %amount,
            "Submitting mint"
        );
        let pending = self
            .backend
            .mint(recipient, amount.base_units())
            .await
            .map_err(ClientError::ContractCallFailed)?;
        Ok(TransactionHandle { pending })
    }
}

impl std::fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractHandle")
            .field("contract_address", &self.contract_address)
            .field("signer", &self.signer)
            .finish()
    }
}
