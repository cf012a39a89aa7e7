//! Wallet session manager.
//!
//! # Responsibilities
//! - Request account access and bind a contract handle to the first account
//! - Replace the session atomically on reconnect, tear it down on disconnect
//! - Keep the read cache at zero whenever no session is connected
//!
//! Session transitions and cache commits share one lock, so a refresh that
//! started under an old session can never land after the session changed.

use alloy::primitives::Address;
use arc_swap::ArcSwapOption;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::blockchain::abi::ContractInterface;
use crate::blockchain::contract::ContractHandle;
use crate::blockchain::gateway::ProviderGateway;
use crate::blockchain::types::{ClientError, ClientResult};
use crate::config::ContractConfig;
use crate::observability::metrics;
use crate::session::cache::ReadCache;

/// Public view of the connection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub address: Option<Address>,
    pub connected: bool,
}

impl WalletSession {
    pub const DISCONNECTED: Self = Self {
        address: None,
        connected: false,
    };
}

/// A connected account and the contract handle bound to its signer.
#[derive(Debug)]
pub struct ActiveSession {
    address: Address,
    handle: ContractHandle,
}

impl ActiveSession {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn handle(&self) -> &ContractHandle {
        &self.handle
    }
}

/// Owns the single wallet session and the read cache derived from it.
pub struct SessionManager {
    gateway: Option<Arc<dyn ProviderGateway>>,
    contract_address: Address,
    interface: ContractInterface,
    active: ArcSwapOption<ActiveSession>,
    transitions: Mutex<()>,
    cache: ReadCache,
}

impl SessionManager {
    /// `gateway` is `None` when the environment has no wallet provider.
    pub fn new(
        gateway: Option<Arc<dyn ProviderGateway>>,
        contract_address: Address,
        interface: ContractInterface,
    ) -> Self {
        Self {
            gateway,
            contract_address,
            interface,
            active: ArcSwapOption::empty(),
            transitions: Mutex::new(()),
            cache: ReadCache::new(),
        }
    }

    /// Build from the `[contract]` section, loading the artifact if one is named.
    pub fn from_config(
        gateway: Option<Arc<dyn ProviderGateway>>,
        config: &ContractConfig,
    ) -> ClientResult<Self> {
        let contract_address: Address = config.address.trim().parse().map_err(|e| {
            ClientError::InvalidInput(format!("contract address '{}': {}", config.address, e))
        })?;

        let interface = match &config.artifact_path {
            Some(path) => ContractInterface::from_artifact(Path::new(path))?,
            None => ContractInterface::builtin()?,
        };

        Ok(Self::new(gateway, contract_address, interface))
    }

    /// Connect to the first account the provider grants, then refresh reads.
    ///
    /// On failure any previous session is left as it was. A failed refresh
    /// does not fail the connect.
    pub async fn connect(&self) -> ClientResult<WalletSession> {
        let session = match self.open_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Wallet connection failed");
                metrics::record_session_event("connect_failed");
                return Err(e);
            }
        };
        let address = session.address;

        {
            let _transition = self.transitions.lock().await;
            self.cache.reset();
            self.active.store(Some(session));
        }

        tracing::info!(
            address = %address,
            contract = %self.contract_address,
            "Wallet connected"
        );
        metrics::record_session_event("connect");

        // Failure is already logged and counted by the cache.
        let _ = self.cache.refresh_all(self).await;

        Ok(WalletSession {
            address: Some(address),
            connected: true,
        })
    }

    async fn open_session(&self) -> ClientResult<Arc<ActiveSession>> {
        let gateway = self.gateway.as_ref().ok_or(ClientError::ProviderUnavailable)?;

        let accounts = gateway.request_accounts().await?;
        let address = accounts
            .first()
            .copied()
            .ok_or_else(|| ClientError::UserRejected("no accounts authorized".to_string()))?;

        let backend = gateway.bind_signer(self.contract_address, address)?;
        let handle = ContractHandle::new(
            self.contract_address,
            self.interface.clone(),
            address,
            backend,
        )?;

        Ok(Arc::new(ActiveSession { address, handle }))
    }

    /// Drop the session and zero the cache. Idempotent.
    pub async fn disconnect(&self) {
        let previous = {
            let _transition = self.transitions.lock().await;
            self.cache.reset();
            self.active.swap(None)
        };

        if let Some(session) = previous {
            tracing::info!(address = %session.address, "Wallet disconnected");
            metrics::record_session_event("disconnect");
        }
    }

    /// The active session, if connected.
    pub fn active(&self) -> Option<Arc<ActiveSession>> {
        self.active.load_full()
    }

    pub fn session(&self) -> WalletSession {
        match &*self.active.load() {
            Some(session) => WalletSession {
                address: Some(session.address),
                connected: true,
            },
            None => WalletSession::DISCONNECTED,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.active.load().is_some()
    }

    pub fn cache(&self) -> &ReadCache {
        &self.cache
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Run `commit` only if `session` is still the active one.
    pub(crate) async fn commit_if_current<F>(&self, session: &Arc<ActiveSession>, commit: F) -> bool
    where
        F: FnOnce(),
    {
        let _transition = self.transitions.lock().await;
        let current = self.active.load();
        match &*current {
            Some(active) if Arc::ptr_eq(active, session) => {
                commit();
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("provider_available", &self.gateway.is_some())
            .field("contract_address", &self.contract_address)
            .field("session", &self.session())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    #[tokio::test]
    async fn test_connect_without_provider() {
        let manager = SessionManager::from_config(
            None,
            &ContractConfig {
                address: CONTRACT.to_string(),
                artifact_path: None,
            },
        )
        .unwrap();

        let result = manager.connect().await;
        assert_eq!(result, Err(ClientError::ProviderUnavailable));
        assert_eq!(manager.session(), WalletSession::DISCONNECTED);
        assert!(manager.cache().snapshot().is_zero());
    }

    #[tokio::test]
    async fn test_disconnect_when_never_connected() {
        let manager =
            SessionManager::new(None, CONTRACT.parse().unwrap(), ContractInterface::builtin().unwrap());
        manager.disconnect().await;
        manager.disconnect().await;
        assert!(!manager.is_connected());
    }

    #[test]
    fn test_bad_contract_address() {
        let result = SessionManager::from_config(
            None,
            &ContractConfig {
                address: "0x1234".to_string(),
                artifact_path: None,
            },
        );
        assert!(matches!(result, Err(ClientError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_artifact() {
        let result = SessionManager::from_config(
            None,
            &ContractConfig {
                address: CONTRACT.to_string(),
                artifact_path: Some("/nonexistent/Token.json".to_string()),
            },
        );
        assert!(matches!(result, Err(ClientError::Interface(_))));
    }
}
