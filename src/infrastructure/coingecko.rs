//! USD price quotes via the CoinGecko `simple/price` endpoint.

use crate::error::{FetchError, MonitorError, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::Duration;

const PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Ledger identifier -> CoinGecko coin id.
const COIN_IDS: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("ltc", "litecoin"),
    ("bnb", "binancecoin"),
    ("sol", "solana"),
    ("matic", "matic-network"),
    ("ton", "the-open-network"),
    ("doge", "dogecoin"),
];

fn coin_id(ledger: &str) -> Result<&'static str> {
    COIN_IDS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(ledger))
        .map(|(_, coin)| *coin)
        .ok_or_else(|| MonitorError::UnsupportedLedger(ledger.to_string()))
}

/// Stateless price lookup. One request fetches the whole supported table;
/// the caller's coin is picked out of the response.
pub struct PriceFeed {
    client: reqwest::Client,
}

impl Default for PriceFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceFeed {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Current USD price for one unit of the given ledger's coin.
    pub async fn usd_price(&self, ledger: &str) -> Result<Decimal> {
        let coin = coin_id(ledger)?;
        let ids = COIN_IDS
            .iter()
            .map(|(_, id)| *id)
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .client
            .get(PRICE_URL)
            .query(&[("ids", ids.as_str()), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(FetchError::from)?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()).into());
        }

        let prices: HashMap<String, HashMap<String, Decimal>> =
            response.json().await.map_err(FetchError::from)?;
        prices
            .get(coin)
            .and_then(|quotes| quotes.get("usd"))
            .copied()
            .ok_or_else(|| {
                FetchError::Malformed(format!("no usd quote for {coin}")).into()
            })
    }

    /// USD value of `amount` coins, rounded to 2 decimal places.
    pub async fn quote_usd(&self, ledger: &str, amount: Decimal) -> Result<Decimal> {
        let price = self.usd_price(ledger).await?;
        Ok(usd_value(price, amount))
    }
}

fn usd_value(price: Decimal, amount: Decimal) -> Decimal {
    (price * amount).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_value_rounds_to_cents() {
        assert_eq!(usd_value(dec!(2.357), dec!(10)), dec!(23.57));
        assert_eq!(usd_value(dec!(60000.12), dec!(0.5)), dec!(30000.06));
        assert_eq!(usd_value(dec!(1.005), dec!(1)), dec!(1.00));
    }

    #[test]
    fn test_coin_id_lookup() {
        assert_eq!(coin_id("ton").unwrap(), "the-open-network");
        assert_eq!(coin_id("BTC").unwrap(), "bitcoin");
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let err = coin_id("shiba").unwrap_err();
        assert!(matches!(err, MonitorError::UnsupportedLedger(_)));
    }
}
