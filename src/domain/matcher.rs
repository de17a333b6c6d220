use crate::domain::transaction::Transaction;

/// Decides whether a candidate transaction satisfies the expected
/// (amount, memo) criteria.
///
/// Amounts compare by exact string equality: normalization already
/// guarantees canonical form, so equal values normalize identically and
/// no numeric comparison is needed. `"1"` and `"1.0"` deliberately do
/// not match. When an expected memo is given, the transaction's memo
/// must equal it exactly; otherwise memos are ignored.
pub fn matches(tx: &Transaction, expected_amount: &str, expected_memo: Option<&str>) -> bool {
    tx.amount == expected_amount
        && match expected_memo {
            None => true,
            Some(memo) => tx.memo.as_deref() == Some(memo),
        }
}
