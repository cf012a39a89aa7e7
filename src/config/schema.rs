//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the token client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Wallet provider endpoint.
    pub provider: ProviderConfig,

    /// Deployed token contract.
    pub contract: ContractConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Wallet provider (JSON-RPC endpoint) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// JSON-RPC endpoint URL. Empty means no wallet provider is available.
    pub rpc_url: String,

    /// Chain ID (e.g., 11155111 for Sepolia, 31337 for local Hardhat/Anvil).
    pub chain_id: u64,

    /// Timeout in seconds for reads and account requests.
    pub rpc_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 31337,
            rpc_timeout_secs: 10,
        }
    }
}

/// Token contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractConfig {
    /// Deployed contract address (0x-prefixed hex).
    pub address: String,

    /// Optional Hardhat artifact whose `abi` describes the contract.
    pub artifact_path: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
