//! Metrics collection.
//!
//! # Metrics
//! - `token_client_transactions_total` (counter): by kind (buy, mint) and outcome
//! - `token_client_read_failures_total` (counter): failed balance/price refreshes
//! - `token_client_sessions_total` (counter): by event (connect, disconnect, connect_failed)

/// Count a finished transaction attempt.
pub fn record_transaction(kind: &'static str, outcome: &'static str) {
    ::metrics::counter!(
        "token_client_transactions_total",
        "kind" => kind,
        "outcome" => outcome
    )
    .increment(1);
}

/// Count a refresh that left the cache stale.
pub fn record_read_failure() {
    ::metrics::counter!("token_client_read_failures_total").increment(1);
}

/// Count a session lifecycle event.
pub fn record_session_event(event: &'static str) {
    ::metrics::counter!("token_client_sessions_total", "event" => event).increment(1);
}
