//! Contract interface descriptor.
//!
//! The typed bindings in `rpc.rs` are compiled in; the descriptor is what the
//! deployment actually advertises. A session is only bound when the
//! descriptor exposes every function the client calls.

use alloy::json_abi::JsonAbi;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::blockchain::types::{ClientError, ClientResult};

/// Functions the client calls on the token contract.
pub const REQUIRED_FUNCTIONS: [&str; 4] = ["balanceOf", "tokenPrice", "buyTokens", "mint"];

const BUILTIN_ABI: &str = r#"[
  {
    "type": "function",
    "name": "balanceOf",
    "inputs": [{ "name": "account", "type": "address", "internalType": "address" }],
    "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }],
    "stateMutability": "view"
  },
  {
    "type": "function",
    "name": "tokenPrice",
    "inputs": [],
    "outputs": [{ "name": "", "type": "uint256", "internalType": "uint256" }],
    "stateMutability": "view"
  },
  {
    "type": "function",
    "name": "buyTokens",
    "inputs": [],
    "outputs": [],
    "stateMutability": "payable"
  },
  {
    "type": "function",
    "name": "mint",
    "inputs": [
      { "name": "to", "type": "address", "internalType": "address" },
      { "name": "amount", "type": "uint256", "internalType": "uint256" }
    ],
    "outputs": [],
    "stateMutability": "nonpayable"
  }
]"#;

/// Compiled contract artifact as written by Hardhat.
#[derive(Debug, Deserialize)]
struct Artifact {
    abi: JsonAbi,
}

/// The ABI the contract handle is bound against.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractInterface {
    abi: JsonAbi,
}

impl ContractInterface {
    /// Descriptor for the four calls the client makes.
    pub fn builtin() -> ClientResult<Self> {
        let abi: JsonAbi = serde_json::from_str(BUILTIN_ABI)
            .map_err(|e| ClientError::Interface(format!("built-in ABI is malformed: {e}")))?;
        Ok(Self { abi })
    }

    /// Load the `abi` field of a Hardhat artifact file.
    pub fn from_artifact(path: &Path) -> ClientResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ClientError::Interface(format!("cannot read artifact {}: {e}", path.display()))
        })?;
        Self::from_artifact_json(&content)
    }

    pub fn from_artifact_json(json: &str) -> ClientResult<Self> {
        let artifact: Artifact = serde_json::from_str(json)
            .map_err(|e| ClientError::Interface(format!("invalid artifact: {e}")))?;
        Ok(Self { abi: artifact.abi })
    }

    /// Fail with the first required function the descriptor lacks.
    pub fn verify(&self) -> ClientResult<()> {
        for name in REQUIRED_FUNCTIONS {
            if self.abi.function(name).is_none() {
                return Err(ClientError::Interface(format!("missing function '{name}'")));
            }
        }
        Ok(())
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }
}
