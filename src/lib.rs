//! Wallet session and transaction lifecycle client for a token dApp.

pub mod app;
pub mod blockchain;
pub mod config;
pub mod observability;
pub mod session;
pub mod transactions;

pub use app::TokenDapp;
pub use blockchain::{ClientError, ClientResult};
pub use config::schema::ClientConfig;
pub use session::SessionManager;
pub use transactions::TransactionExecutor;
