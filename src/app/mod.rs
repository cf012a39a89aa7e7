//! Application facade.
//!
//! # Data Flow
//! ```text
//! user action (connect, disconnect, buy, mint)
//!     → dapp.rs (reads the amount field, calls session or executor)
//!     → notice.rs (one Notice per outcome, sent on the channel)
//!     → inputs.rs (field cleared on confirmed transactions only)
//! ```

pub mod dapp;
pub mod inputs;
pub mod notice;

pub use dapp::TokenDapp;
pub use inputs::InputFields;
pub use notice::{short_address, Notice, NoticeLevel};
