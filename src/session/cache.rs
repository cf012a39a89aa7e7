//! Last-known balance and price.
//!
//! Writers always replace the whole snapshot, so readers never pair a fresh
//! price with a stale balance.

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::blockchain::types::{ClientError, ClientResult};
use crate::blockchain::units::TokenAmount;
use crate::observability::metrics;
use crate::session::manager::SessionManager;

/// One consistent view of the on-chain reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSnapshot {
    /// Token balance of the session address.
    pub balance: TokenAmount,
    /// Native currency per token.
    pub token_price: TokenAmount,
}

impl ReadSnapshot {
    pub const ZERO: Self = Self {
        balance: TokenAmount::ZERO,
        token_price: TokenAmount::ZERO,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// What a refresh did with its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cache now holds these values.
    Updated(ReadSnapshot),
    /// The session changed while the reads were in flight; results dropped.
    Discarded,
}

/// Read cache shared by the session manager and the executor.
#[derive(Debug)]
pub struct ReadCache {
    current: ArcSwap<ReadSnapshot>,
}

impl ReadCache {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(ReadSnapshot::ZERO),
        }
    }

    pub fn snapshot(&self) -> ReadSnapshot {
        **self.current.load()
    }

    /// Price as of now. Read synchronously, never across an await.
    pub fn token_price(&self) -> TokenAmount {
        self.current.load().token_price
    }

    pub(crate) fn replace(&self, snapshot: ReadSnapshot) {
        self.current.store(Arc::new(snapshot));
    }

    pub(crate) fn reset(&self) {
        self.replace(ReadSnapshot::ZERO);
    }

    /// Re-read balance and price for the active session.
    ///
    /// Both reads run concurrently and the cache is replaced only when both
    /// succeed. A failure leaves the cache as it was; it is logged and returned
    /// but callers are not expected to block on it.
    pub async fn refresh_all(&self, sessions: &SessionManager) -> ClientResult<RefreshOutcome> {
        let Some(session) = sessions.active() else {
            tracing::debug!("Skipping refresh, wallet not connected");
            return Err(ClientError::NotConnected);
        };

        let handle = session.handle();
        let reads = tokio::try_join!(handle.read_balance(session.address()), handle.read_price());

        let (balance, token_price) = match reads {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(address = %session.address(), error = %e, "Refresh failed, keeping cached values");
                metrics::record_read_failure();
                return Err(e);
            }
        };

        let snapshot = ReadSnapshot {
            balance,
            token_price,
        };
        if sessions.commit_if_current(&session, || self.replace(snapshot)).await {
            tracing::debug!(
                address = %session.address(),
                balance = %balance,
                token_price = %token_price,
                "Read cache refreshed"
            );
            Ok(RefreshOutcome::Updated(snapshot))
        } else {
            tracing::debug!("Session changed during refresh, discarding results");
            Ok(RefreshOutcome::Discarded)
        }
    }
}

impl Default for ReadCache {
    fn default() -> Self {
        Self::new()
    }
}
