//! Transaction lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! TransactionRequest (buy | mint, raw amount)
//!     → executor.rs (validate, single-flight flag, native value)
//!     → blockchain::ContractHandle (submit, await one block)
//!     → session::ReadCache (refresh on success only)
//! ```

pub mod executor;
pub mod types;

pub use executor::TransactionExecutor;
pub use types::{ExecutionState, TransactionKind, TransactionRequest};
