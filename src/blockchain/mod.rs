//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Wallet provider (node accounts or TOKEN_CLIENT_PRIVATE_KEY)
//!     → gateway.rs (account request, signer binding)
//!     → rpc.rs (alloy bindings, receipts, error classification)
//!     → contract.rs (decimal ⇄ base-unit boundary, ContractHandle)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - The contract is the sole authority on privileged calls

pub mod abi;
pub mod contract;
pub mod gateway;
pub mod rpc;
pub mod types;
pub mod units;
pub mod wallet;

pub use abi::ContractInterface;
pub use contract::{ContractHandle, PendingTransaction, TokenBackend, TransactionHandle};
pub use gateway::{AlloyGateway, ProviderGateway};
pub use types::{CallFailure, ClientError, ClientResult, TxConfirmation};
pub use units::TokenAmount;
pub use wallet::LocalWallet;
