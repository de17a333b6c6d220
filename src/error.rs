use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("unsupported ledger: {0}")]
    UnsupportedLedger(String),
    #[error("unknown ledger for amount conversion: {0}")]
    UnknownLedger(String),
    #[error("invalid monitoring criteria: {0}")]
    InvalidCriteria(String),
    /// Fetch failures on request/response paths outside the monitoring
    /// loop (balance and price lookups). The loop itself absorbs these.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Errors at the transaction-source boundary.
///
/// Monitoring sessions absorb every variant as an empty page, so these never
/// reach `start_monitoring` callers. They stay a separate type to keep that
/// policy explicit and testable.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
