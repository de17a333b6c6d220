use crate::error::{MonitorError, Result};
use rust_decimal::Decimal;

/// Smallest-unit decimal places per supported ledger.
///
/// Data, not branches: extending support is a new table row.
const LEDGER_DECIMALS: &[(&str, u32)] = &[
    ("btc", 8),
    ("eth", 18),
    ("bnb", 18),
    ("sol", 9),
    ("ltc", 8),
    ("matic", 18),
    ("ton", 9),
    ("doge", 8),
];

/// Returns the decimal-place count for a ledger identifier
/// (case-insensitive).
pub fn decimals_for(ledger: &str) -> Result<u32> {
    LEDGER_DECIMALS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(ledger))
        .map(|(_, decimals)| *decimals)
        .ok_or_else(|| MonitorError::UnknownLedger(ledger.to_string()))
}

/// All supported ledger identifiers, in table order.
pub fn supported_ledgers() -> impl Iterator<Item = &'static str> {
    LEDGER_DECIMALS.iter().map(|(id, _)| *id)
}

/// Converts a smallest-unit amount into its canonical display form.
///
/// The result is the shortest exact decimal: trailing fractional zeros are
/// stripped, and a whole-number amount carries no decimal point at all.
/// Zero is always `"0"` regardless of the ledger's decimal places.
pub fn normalize_amount(raw: u64, ledger: &str) -> Result<String> {
    let decimals = decimals_for(ledger)?;
    if raw == 0 {
        return Ok("0".to_string());
    }

    // Scaled construction divides by 10^decimals exactly; normalize()
    // strips trailing fractional zeros.
    let amount = Decimal::from_i128_with_scale(raw as i128, decimals);
    Ok(amount.normalize().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_zero_for_every_ledger() {
        for ledger in supported_ledgers() {
            assert_eq!(normalize_amount(0, ledger).unwrap(), "0");
        }
    }

    #[test]
    fn test_whole_amounts_have_no_fraction() {
        assert_eq!(normalize_amount(100_000_000, "btc").unwrap(), "1");
        assert_eq!(normalize_amount(1_000_000_000, "ton").unwrap(), "1");
    }

    #[test]
    fn test_trailing_zeros_stripped() {
        assert_eq!(normalize_amount(150_000_000, "btc").unwrap(), "1.5");
        assert_eq!(normalize_amount(10_000_000, "btc").unwrap(), "0.1");
        assert_eq!(normalize_amount(10_500_000_000, "sol").unwrap(), "10.5");
    }

    #[test]
    fn test_smallest_unit_keeps_full_precision() {
        assert_eq!(normalize_amount(1, "btc").unwrap(), "0.00000001");
        assert_eq!(normalize_amount(1, "eth").unwrap(), "0.000000000000000001");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(decimals_for("BTC").unwrap(), 8);
        assert_eq!(normalize_amount(100_000_000, "Btc").unwrap(), "1");
    }

    #[test]
    fn test_unknown_ledger_rejected() {
        let err = normalize_amount(42, "unknown_ledger").unwrap_err();
        assert!(matches!(err, MonitorError::UnknownLedger(_)));
    }
}
