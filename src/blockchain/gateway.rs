//! Provider gateway: account access and signer-bound contract backends.
//!
//! # Responsibilities
//! - Request account access from the wallet provider (`eth_requestAccounts`)
//! - Hand out a contract backend whose transactions the account signs
//! - Translate provider failures into `UserRejected` / `ProviderFailed`

use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::contract::TokenBackend;
use crate::blockchain::rpc::{classify_transport_error, RpcTokenBackend};
use crate::blockchain::types::{CallFailure, ClientError, ClientResult};
use crate::blockchain::wallet::LocalWallet;
use crate::config::ProviderConfig;

/// The wallet provider injected into the environment.
#[async_trait]
pub trait ProviderGateway: Send + Sync {
    /// Ask the provider for account access. Ordered, first is active.
    async fn request_accounts(&self) -> ClientResult<Vec<Address>>;

    /// A backend for `contract` whose writes are signed by `account`.
    fn bind_signer(&self, contract: Address, account: Address) -> ClientResult<Arc<dyn TokenBackend>>;
}

/// Gateway over a JSON-RPC endpoint.
///
/// With a local key the key is the only account and signs in-process;
/// otherwise the node's wallet grants accounts and signs.
pub struct AlloyGateway {
    provider: DynProvider,
    local: Option<LocalWallet>,
    timeout_duration: Duration,
}

impl AlloyGateway {
    /// Create a gateway for the configured endpoint.
    pub fn new(config: &ProviderConfig, local: Option<LocalWallet>) -> ClientResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            ClientError::ProviderFailed(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let provider = match &local {
            Some(wallet) => ProviderBuilder::new()
                .wallet(wallet.ethereum_wallet())
                .connect_http(url)
                .erased(),
            None => ProviderBuilder::new().connect_http(url).erased(),
        };

        tracing::info!(
            rpc_url = %config.rpc_url,
            chain_id = config.chain_id,
            local_signer = local.is_some(),
            "Provider gateway initialized"
        );

        Ok(Self {
            provider,
            local,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        })
    }

    /// Build the gateway the environment offers, if any.
    ///
    /// An empty RPC URL means no wallet provider is present.
    pub fn from_config(config: &ProviderConfig) -> ClientResult<Option<Self>> {
        if config.rpc_url.trim().is_empty() {
            return Ok(None);
        }
        let local = LocalWallet::from_env(config.chain_id)?;
        Self::new(config, local).map(Some)
    }
}

#[async_trait]
impl ProviderGateway for AlloyGateway {
    async fn request_accounts(&self) -> ClientResult<Vec<Address>> {
        if let Some(wallet) = &self.local {
            return Ok(vec![wallet.address()]);
        }

        let request = self
            .provider
            .raw_request::<_, Vec<Address>>("eth_requestAccounts".into(), Vec::<serde_json::Value>::new());

        match timeout(self.timeout_duration, request).await {
            Ok(Ok(accounts)) => Ok(accounts),
            Ok(Err(e)) => match classify_transport_error(&e) {
                CallFailure::UserRejected => {
                    Err(ClientError::UserRejected("account access request declined".to_string()))
                }
                _ => Err(ClientError::ProviderFailed(format!("eth_requestAccounts: {e}"))),
            },
            Err(_) => Err(ClientError::ProviderFailed(format!(
                "eth_requestAccounts timed out after {} seconds",
                self.timeout_duration.as_secs()
            ))),
        }
    }

    fn bind_signer(&self, contract: Address, account: Address) -> ClientResult<Arc<dyn TokenBackend>> {
        if let Some(wallet) = &self.local {
            if wallet.address() != account {
                return Err(ClientError::ProviderFailed(format!(
                    "no signer available for account {account}"
                )));
            }
        }

        Ok(Arc::new(RpcTokenBackend::new(
            contract,
            self.provider.clone(),
            account,
            self.timeout_duration,
        )))
    }
}

impl std::fmt::Debug for AlloyGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyGateway")
            .field("local_signer", &self.local.as_ref().map(LocalWallet::address))
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
