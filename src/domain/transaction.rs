use serde::Serialize;
use std::time::Duration;

/// Sender shown when the source's address book has no entry for the raw
/// address.
pub const UNKNOWN_SENDER: &str = "Unknown address";

/// An incoming transaction as reported by a transaction source.
///
/// Amounts are canonical display strings (see [`crate::domain::ledger`]);
/// the raw smallest-unit integer never leaves the source boundary.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct Transaction {
    /// Display-form sender address, or [`UNKNOWN_SENDER`].
    pub sender: String,
    /// Opaque transaction identifier, for display and logging only.
    pub hash: String,
    /// Seconds since epoch, source-assigned.
    pub timestamp: u64,
    /// Whether the transaction executed successfully. Failed transactions
    /// are still candidates for matching.
    pub success: bool,
    /// Canonical display-form amount.
    pub amount: String,
    /// Decoded comment attached to the incoming message, when present.
    pub memo: Option<String>,
}

/// What a monitoring session is looking for. Immutable for the session's
/// lifetime.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MonitoringCriteria {
    pub ledger: String,
    pub address: String,
    /// Expected amount in canonical display form, compared by string
    /// equality.
    pub expected_amount: String,
    pub expected_memo: Option<String>,
    /// Total time the session keeps polling before giving up.
    pub time_budget: Duration,
    /// Pause between poll cycles.
    pub poll_interval: Duration,
}

impl MonitoringCriteria {
    pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(3600);
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

    pub fn new(
        ledger: impl Into<String>,
        address: impl Into<String>,
        expected_amount: impl Into<String>,
    ) -> Self {
        Self {
            ledger: ledger.into(),
            address: address.into(),
            expected_amount: expected_amount.into(),
            expected_memo: None,
            time_budget: Self::DEFAULT_TIME_BUDGET,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }
}
