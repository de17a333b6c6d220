use super::transaction::Transaction;
use crate::error::FetchError;
use async_trait::async_trait;

/// Page size requested from a source when the caller does not care.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// A source of recent transactions for one ledger.
///
/// Implementations return the newest page first, already resolved through
/// the source's address book and with amounts in canonical display form.
/// Errors stay at this boundary: monitoring sessions treat any
/// [`FetchError`] as an empty page for that cycle.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn recent_transactions(
        &self,
        address: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Transaction>, FetchError>;
}

pub type TransactionSourceBox = Box<dyn TransactionSource>;
