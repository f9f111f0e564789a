use crate::utils::format_amount_2dp;
use crate::{Account, AccountType};
use std::borrow::Cow;

/// Renders the account's transactions in the QIF line-record format: one
/// single-letter field tag per line, records terminated by `^`. The header
/// line depends on the account type. QIF itself fixes the date convention to
/// MM/DD/YYYY.
pub fn to_qif(account: &Account) -> String {
    let mut out = String::new();
    if account.account_type == AccountType::CreditCard {
        out.push_str("!Type:CCard\n");
    } else {
        out.push_str("!Type:Bank\n");
    }
    for txn in &account.txns {
        out.push_str(&format!("D{}\n", txn.date.format("%m/%d/%Y")));
        out.push_str(&format!("T{}\n", format_amount_2dp(txn.amount)));
        out.push_str(&format!("P{}\n", sanitize(&txn.name)));
        if let Some(memo) = &txn.memo {
            out.push_str(&format!("M{}\n", sanitize(memo)));
        }
        if let Some(check_number) = &txn.check_number {
            out.push_str(&format!("N{}\n", sanitize(check_number)));
        }
        out.push_str("^\n");
    }
    out
}

/// QIF has no escaping, so a line break inside a value would start a new
/// field line. Interior line breaks become spaces.
fn sanitize(field: &str) -> Cow<'_, str> {
    if field.contains(|c| c == '\n' || c == '\r') {
        Cow::Owned(field.replace(|c| c == '\n' || c == '\r', " "))
    } else {
        Cow::Borrowed(field)
    }
}
