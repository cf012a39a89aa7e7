//! UI-state facade.
//!
//! # Responsibilities
//! - Wire the session manager and the executor to the user's actions
//! - Turn every outcome into a `Notice` on the notice channel
//! - Clear an amount field after its transaction confirms, keep it otherwise

use alloy::primitives::Address;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::app::inputs::InputFields;
use crate::app::notice::{self, short_address, Notice};
use crate::blockchain::types::{ClientError, ClientResult, TxConfirmation};
use crate::session::cache::{ReadSnapshot, RefreshOutcome};
use crate::session::manager::{SessionManager, WalletSession};
use crate::transactions::executor::TransactionExecutor;
use crate::transactions::types::{ExecutionState, TransactionKind, TransactionRequest};

/// The token dApp as the user sees it.
pub struct TokenDapp {
    sessions: Arc<SessionManager>,
    executor: TransactionExecutor,
    inputs: InputFields,
    notices: mpsc::UnboundedSender<Notice>,
}

impl TokenDapp {
    /// Create the facade and the receiving end of its notice channel.
    pub fn new(sessions: Arc<SessionManager>) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dapp = Self {
            sessions,
            executor: TransactionExecutor::new(),
            inputs: InputFields::new(),
            notices: tx,
        };
        (dapp, rx)
    }

    pub async fn connect_wallet(&self) -> ClientResult<WalletSession> {
        let result = self.sessions.connect().await;
        match &result {
            Ok(session) => {
                if let Some(address) = &session.address {
                    self.notify(Notice::info(format!("connected {}", short_address(address))));
                }
            }
            Err(ClientError::ProviderUnavailable) => self.notify(Notice::failure(notice::NO_WALLET)),
            Err(e) => self.notify(Notice::failure(format!("wallet connection failed: {e}"))),
        }
        result
    }

    pub async fn disconnect_wallet(&self) {
        let was_connected = self.sessions.is_connected();
        self.sessions.disconnect().await;
        if was_connected {
            self.notify(Notice::info("wallet disconnected"));
        }
    }

    /// Buy the amount currently in the buy field.
    pub async fn buy_tokens(&self) -> ClientResult<TxConfirmation> {
        let request = TransactionRequest::buy(self.inputs.buy_amount());
        let result = self.executor.submit(&self.sessions, &request).await;
        if result.is_ok() {
            self.inputs.clear_buy_amount();
        }
        self.report(TransactionKind::Buy, &result);
        result
    }

    /// Mint the amount currently in the mint field to `recipient`, or to the
    /// connected account when `None`.
    pub async fn mint_tokens(&self, recipient: Option<Address>) -> ClientResult<TxConfirmation> {
        let request = TransactionRequest::mint(self.inputs.mint_amount(), recipient);
        let result = self.executor.submit(&self.sessions, &request).await;
        if result.is_ok() {
            self.inputs.clear_mint_amount();
        }
        self.report(TransactionKind::Mint, &result);
        result
    }

    /// Re-read balance and price. Failures are reported but the cache keeps
    /// its previous values.
    pub async fn refresh(&self) -> ClientResult<RefreshOutcome> {
        let result = self.sessions.cache().refresh_all(&self.sessions).await;
        if let Err(e) = &result {
            self.notify(Notice::failure(e.to_string()));
        }
        result
    }

    pub fn inputs(&self) -> &InputFields {
        &self.inputs
    }

    pub fn session(&self) -> WalletSession {
        self.sessions.session()
    }

    pub fn snapshot(&self) -> ReadSnapshot {
        self.sessions.cache().snapshot()
    }

    pub fn execution_state(&self) -> ExecutionState {
        self.executor.state()
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    fn report(&self, kind: TransactionKind, result: &ClientResult<TxConfirmation>) {
        let notice = match (kind, result) {
            (TransactionKind::Buy, Ok(_)) => Notice::success(notice::PURCHASE_SUCCEEDED),
            (TransactionKind::Mint, Ok(_)) => Notice::success(notice::MINT_SUCCEEDED),
            (_, Err(e)) if e.is_rejected_locally() => Notice::failure(e.to_string()),
            (TransactionKind::Buy, Err(_)) => Notice::failure(notice::PURCHASE_FAILED),
            (TransactionKind::Mint, Err(_)) => Notice::failure(notice::MINT_FAILED),
        };
        self.notify(notice);
    }

    fn notify(&self, notice: Notice) {
        tracing::debug!(level = notice.level.as_str(), message = %notice.message, "Notice");
        // Nobody listening is fine.
        let _ = self.notices.send(notice);
    }
}

impl std::fmt::Debug for TokenDapp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDapp")
            .field("session", &self.session())
            .field("execution_state", &self.execution_state())
            .finish()
    }
}
