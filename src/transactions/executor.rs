//! Transaction executor.
//!
//! # State Machine
//! ```text
//! Idle ──submit()──► Submitting ──confirmed──► Idle + refresh
//!                        │
//!                        └──failed──► Idle (cache untouched)
//! ```
//!
//! Requests are validated before the state flips, so a rejected request
//! never touches the flag. The flip itself is a compare-and-swap; a second
//! `submit()` while one is in flight fails with `TransactionInFlight` and
//! nothing is queued.

use alloy::primitives::Address;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::blockchain::contract::TransactionHandle;
use crate::blockchain::types::{ClientError, ClientResult, TxConfirmation};
use crate::blockchain::units::TokenAmount;
use crate::observability::metrics;
use crate::session::manager::{ActiveSession, SessionManager};
use crate::transactions::types::{ExecutionState, TransactionKind, TransactionRequest};

/// What was validated and is about to be sent.
#[derive(Debug, Clone, Copy)]
enum PreparedCall {
    Purchase { native_value: TokenAmount },
    Mint { recipient: Address, amount: TokenAmount },
}

/// Single-flight submitter of buy and mint transactions.
#[derive(Debug)]
pub struct TransactionExecutor {
    state: AtomicU8,
}

impl TransactionExecutor {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(ExecutionState::Idle as u8),
        }
    }

    pub fn state(&self) -> ExecutionState {
        ExecutionState::from(self.state.load(Ordering::Acquire))
    }

    /// Claim the flag. `None` if a submission is already running.
    fn try_begin(&self) -> Option<SubmissionGuard<'_>> {
        self.state
            .compare_exchange(
                ExecutionState::Idle as u8,
                ExecutionState::Submitting as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()
            .map(|_| SubmissionGuard { state: &self.state })
    }

    /// Validate, send and confirm one transaction.
    ///
    /// On success the read cache is refreshed once, after the executor is
    /// back to `Idle`. On failure nothing is refreshed. The confirmation wait
    /// has no timeout.
    pub async fn submit(
        &self,
        sessions: &SessionManager,
        request: &TransactionRequest,
    ) -> ClientResult<TxConfirmation> {
        let session = sessions.active().ok_or(ClientError::NotConnected)?;
        let amount = request.amount()?;

        // Price is read from the cache here, before the first await.
        let call = match request.kind {
            TransactionKind::Buy => PreparedCall::Purchase {
                native_value: amount.value_at(sessions.cache().token_price())?,
            },
            TransactionKind::Mint => PreparedCall::Mint {
                recipient: request.recipient.unwrap_or_else(|| session.address()),
                amount,
            },
        };

        let guard = self.try_begin().ok_or_else(|| {
            tracing::debug!(kind = %request.kind, "Rejecting submission, another is in flight");
            ClientError::TransactionInFlight
        })?;

        let result = Self::execute(&session, call).await;
        drop(guard);

        match result {
            Ok(confirmation) => {
                tracing::info!(
                    kind = %request.kind,
                    amount = %amount,
                    tx_hash = %confirmation.tx_hash,
                    block = ?confirmation.block_number,
                    "Transaction confirmed"
                );
                metrics::record_transaction(request.kind.as_str(), "success");
                // A failed refresh is logged by the cache and leaves stale values.
                let _ = sessions.cache().refresh_all(sessions).await;
                Ok(confirmation)
            }
            Err(e) => {
                tracing::warn!(
                    kind = %request.kind,
                    amount = %amount,
                    error = %e,
                    "Transaction failed"
                );
                metrics::record_transaction(request.kind.as_str(), "failure");
                Err(e)
            }
        }
    }

    async fn execute(session: &ActiveSession, call: PreparedCall) -> ClientResult<TxConfirmation> {
        let handle = session.handle();
        let tx: TransactionHandle = match call {
            PreparedCall::Purchase { native_value } => handle.submit_purchase(native_value).await?,
            PreparedCall::Mint { recipient, amount } => handle.submit_mint(recipient, amount).await?,
        };
        tracing::info!(tx_hash = %tx.tx_hash(), "Transaction submitted, awaiting confirmation");
        tx.confirmation().await
    }
}

impl Default for TransactionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the executor to `Idle` when dropped, on every exit path.
struct SubmissionGuard<'a> {
    state: &'a AtomicU8,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.state.store(ExecutionState::Idle as u8, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_exclusive() {
        let executor = TransactionExecutor::new();
        assert_eq!(executor.state(), ExecutionState::Idle);

        let guard = executor.try_begin().unwrap();
        assert_eq!(executor.state(), ExecutionState::Submitting);
        assert!(executor.try_begin().is_none());

        drop(guard);
        assert_eq!(executor.state(), ExecutionState::Idle);
        assert!(executor.try_begin().is_some());
    }

    #[tokio::test]
    async fn test_submit_requires_session() {
        use crate::blockchain::abi::ContractInterface;

        let sessions =
            SessionManager::new(None, Address::repeat_byte(0x11), ContractInterface::builtin().unwrap());
        let executor = TransactionExecutor::new();

        let result = executor.submit(&sessions, &TransactionRequest::buy("1")).await;
        assert_eq!(result, Err(ClientError::NotConnected));
        assert_eq!(executor.state(), ExecutionState::Idle);
    }
}
