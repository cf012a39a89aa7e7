//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Session and transaction lifecycle produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stdout via the fmt layer
//!     → whatever metrics recorder the host installs
//! ```

pub mod logging;
pub mod metrics;
