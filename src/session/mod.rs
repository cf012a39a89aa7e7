//! Wallet session subsystem.
//!
//! # Data Flow
//! ```text
//! connect()
//!     → manager.rs (gateway account request, ContractHandle binding)
//!     → cache.rs (balanceOf + tokenPrice, whole-snapshot replace)
//!
//! disconnect()
//!     → cache.rs (reset to zero)
//!     → manager.rs (session dropped)
//! ```
//!
//! # Invariants
//! - A contract handle exists exactly while a session is connected
//! - The read cache is zero whenever no session is connected

pub mod cache;
pub mod manager;

pub use cache::{ReadCache, ReadSnapshot, RefreshOutcome};
pub use manager::{ActiveSession, SessionManager, WalletSession};
