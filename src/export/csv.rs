use crate::utils::format_amount_2dp;
use crate::Transaction;
use std::borrow::Cow;

/// Renders one comma-separated row per transaction: date, description, memo,
/// amount, type. Amounts always carry exactly two decimal digits with a `.`
/// decimal point. There is no header row, so the line count equals the
/// transaction count.
pub fn to_csv(txns: &[Transaction]) -> String {
    let mut out = String::new();
    for txn in txns {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            txn.date.format("%Y-%m-%d"),
            escape(&txn.name),
            escape(txn.memo.as_deref().unwrap_or("")),
            format_amount_2dp(txn.amount),
            txn.r#type,
        ));
    }
    out
}

/// RFC 4180 escaping: a field containing a comma, quote, or line break is
/// quoted, with inner quotes doubled.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains(|c| c == ',' || c == '"' || c == '\n' || c == '\r') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
