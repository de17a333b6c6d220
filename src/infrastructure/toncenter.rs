//! TONCenter-backed transaction source.
//!
//! Transport and parsing are separated: [`page_from_response`] turns a
//! decoded API response into domain transactions and is unit-tested on
//! fixture JSON without any network.

use crate::domain::ledger::normalize_amount;
use crate::domain::ports::TransactionSource;
use crate::domain::transaction::{Transaction, UNKNOWN_SENDER};
use crate::error::FetchError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

const TRANSACTIONS_URL: &str = "https://toncenter.com/api/v3/transactions";
const WALLET_INFO_URL: &str = "https://toncenter.com/api/v2/getWalletInformation";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const LEDGER: &str = "ton";

#[derive(Debug, Deserialize)]
struct TransactionsResponse {
    #[serde(default)]
    transactions: Vec<RawTransaction>,
    #[serde(default)]
    address_book: HashMap<String, AddressBookEntry>,
}

#[derive(Debug, Deserialize)]
struct AddressBookEntry {
    user_friendly: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    hash: String,
    now: u64,
    in_msg: Option<InMessage>,
    description: Option<Description>,
}

#[derive(Debug, Deserialize)]
struct InMessage {
    source: Option<String>,
    /// Smallest-unit amount, as a decimal string.
    value: Option<String>,
    message_content: Option<MessageContent>,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    decoded: Option<DecodedContent>,
}

#[derive(Debug, Deserialize)]
struct DecodedContent {
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Description {
    compute_ph: Option<ComputePhase>,
}

#[derive(Debug, Deserialize)]
struct ComputePhase {
    #[serde(default)]
    success: bool,
}

#[derive(Debug, Deserialize)]
struct WalletInformation {
    result: Option<WalletResult>,
}

#[derive(Debug, Deserialize)]
struct WalletResult {
    balance: String,
}

/// Transaction source and wallet queries against the public TONCenter API.
pub struct TonCenterSource {
    client: reqwest::Client,
}

impl Default for TonCenterSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TonCenterSource {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Current wallet balance in canonical display form (TON).
    pub async fn wallet_balance(&self, address: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(WALLET_INFO_URL)
            .query(&[("address", address)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let info: WalletInformation = response.json().await?;
        let raw = info
            .result
            .ok_or_else(|| FetchError::Malformed("missing result".to_string()))?
            .balance
            .parse::<u64>()
            .map_err(|e| FetchError::Malformed(format!("bad balance: {e}")))?;

        normalize_amount(raw, LEDGER)
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl TransactionSource for TonCenterSource {
    async fn recent_transactions(
        &self,
        address: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Transaction>, FetchError> {
        let response = self
            .client
            .get(TRANSACTIONS_URL)
            .query(&[
                ("account", address),
                ("limit", &limit.to_string()),
                ("offset", &offset.to_string()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body: TransactionsResponse = response.json().await?;
        Ok(page_from_response(body))
    }
}

/// Resolves a decoded API page into domain transactions, in the order the
/// API returned them (most recent first).
///
/// Individual records missing required fields are skipped with a
/// diagnostic; they never abort the page.
fn page_from_response(response: TransactionsResponse) -> Vec<Transaction> {
    let TransactionsResponse {
        transactions,
        address_book,
    } = response;

    transactions
        .into_iter()
        .filter_map(|raw| match transaction_from_raw(raw, &address_book) {
            Ok(tx) => Some(tx),
            Err(reason) => {
                warn!(reason, "skipping malformed transaction record");
                None
            }
        })
        .collect()
}

fn transaction_from_raw(
    raw: RawTransaction,
    address_book: &HashMap<String, AddressBookEntry>,
) -> Result<Transaction, &'static str> {
    let in_msg = raw.in_msg.ok_or("missing in_msg")?;
    let value = in_msg
        .value
        .ok_or("missing value")?
        .parse::<u64>()
        .map_err(|_| "unparseable value")?;
    let amount = normalize_amount(value, LEDGER).map_err(|_| "unconvertible value")?;

    let sender = in_msg
        .source
        .as_deref()
        .and_then(|source| address_book.get(source))
        .and_then(|entry| entry.user_friendly.clone())
        .unwrap_or_else(|| UNKNOWN_SENDER.to_string());

    let memo = in_msg
        .message_content
        .and_then(|content| content.decoded)
        .and_then(|decoded| decoded.comment);

    let success = raw
        .description
        .and_then(|description| description.compute_ph)
        .map(|phase| phase.success)
        .unwrap_or(false);

    Ok(Transaction {
        sender,
        hash: raw.hash,
        timestamp: raw.now,
        success,
        amount,
        memo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "transactions": [
            {
                "hash": "abc123",
                "now": 1717181723,
                "in_msg": {
                    "source": "0:raw1",
                    "value": "1500000000",
                    "message_content": {
                        "decoded": { "comment": "order-42" }
                    }
                },
                "description": { "compute_ph": { "success": true } }
            },
            {
                "hash": "def456",
                "now": 1717181800,
                "in_msg": {
                    "source": "0:unlisted",
                    "value": "0",
                    "message_content": { "decoded": null }
                },
                "description": { "compute_ph": { "success": false } }
            },
            {
                "hash": "broken",
                "now": 1717181900,
                "in_msg": { "source": "0:raw1", "value": null }
            }
        ],
        "address_book": {
            "0:raw1": { "user_friendly": "EQAlice" }
        }
    }"#;

    fn parse_fixture(json: &str) -> Vec<Transaction> {
        page_from_response(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_page_resolves_senders_through_address_book() {
        let page = parse_fixture(PAGE);
        assert_eq!(page[0].sender, "EQAlice");
        assert_eq!(page[1].sender, UNKNOWN_SENDER);
    }

    #[test]
    fn test_page_normalizes_amounts() {
        let page = parse_fixture(PAGE);
        assert_eq!(page[0].amount, "1.5");
        assert_eq!(page[1].amount, "0");
    }

    #[test]
    fn test_page_extracts_memo_and_success() {
        let page = parse_fixture(PAGE);
        assert_eq!(page[0].memo.as_deref(), Some("order-42"));
        assert!(page[0].success);
        assert_eq!(page[1].memo, None);
        assert!(!page[1].success);
    }

    #[test]
    fn test_malformed_record_is_skipped_not_fatal() {
        let page = parse_fixture(PAGE);
        assert_eq!(page.len(), 2);
        assert!(page.iter().all(|tx| tx.hash != "broken"));
    }

    #[test]
    fn test_missing_compute_phase_defaults_to_failure() {
        let json = r#"{
            "transactions": [{
                "hash": "nophase",
                "now": 1,
                "in_msg": { "source": null, "value": "10" }
            }],
            "address_book": {}
        }"#;
        let page = parse_fixture(json);
        assert_eq!(page.len(), 1);
        assert!(!page[0].success);
        assert_eq!(page[0].sender, UNKNOWN_SENDER);
    }

    #[test]
    fn test_empty_response_yields_empty_page() {
        assert!(parse_fixture("{}").is_empty());
    }
}
