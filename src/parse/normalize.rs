use super::extract::StatementDraft;
use super::parser::RawNode;
use crate::options::ParseOptions;
use crate::utils::parse_amount;
use crate::{
    Account, Date, Decimal, Error, ErrorLevel, ErrorType, Time, Transaction, TxnType,
};
use log::debug;
use std::collections::HashSet;

/// Turns one extracted statement into a canonical [`Account`]. Transactions
/// whose date or amount cannot be read are dropped with a warning; the rest
/// keep their source document order.
pub fn normalize_statement(
    draft: StatementDraft<'_>,
    options: &ParseOptions,
    warnings: &mut Vec<Error>,
) -> Account {
    let StatementDraft {
        account_id,
        account_type,
        bank_id,
        currency,
        balance,
        txn_nodes,
    } = draft;
    let mut txns = Vec::with_capacity(txn_nodes.len());
    let mut seen_ids = HashSet::new();
    for (ordinal, node) in txn_nodes.into_iter().enumerate() {
        if let Some(txn) = normalize_txn(node, ordinal, &mut seen_ids, warnings) {
            txns.push(txn);
        }
    }
    debug!(
        "account {}: {} transaction(s) normalized",
        account_id,
        txns.len()
    );
    Account {
        account_id,
        account_type,
        bank_id,
        currency: currency.unwrap_or_else(|| options.default_currency.clone()),
        balance,
        txns,
    }
}

fn normalize_txn(
    node: &RawNode,
    ordinal: usize,
    seen_ids: &mut HashSet<String>,
    warnings: &mut Vec<Error>,
) -> Option<Transaction> {
    let date_field = node.leaf("DTPOSTED").or_else(|| node.leaf("DTUSER"));
    let (date, time) = match date_field.and_then(parse_datetime) {
        Some(parsed) => parsed,
        None => {
            warnings.push(Error {
                msg: match date_field {
                    Some(text) => format!("Transaction dropped: invalid date {:?}.", text),
                    None => "Transaction dropped: no posted date.".to_string(),
                },
                src: node.src(),
                r#type: ErrorType::Date,
                level: ErrorLevel::Warning,
            });
            return None;
        }
    };

    let amount = match node.leaf("TRNAMT") {
        Some(text) => parse_amount(text, node.src(), warnings)?,
        None => {
            warnings.push(Error {
                msg: "Transaction dropped: no amount.".to_string(),
                src: node.src(),
                r#type: ErrorType::Amount,
                level: ErrorLevel::Warning,
            });
            return None;
        }
    };

    // Payee name lives either in a NAME leaf or in a PAYEE aggregate.
    let name = node
        .leaf("NAME")
        .or_else(|| node.find("PAYEE").and_then(|payee| payee.leaf("NAME")))
        .unwrap_or("")
        .to_string();

    let mut id = match node.leaf("FITID") {
        Some(fitid) if !fitid.is_empty() => fitid.to_string(),
        // Derived ids only depend on the transaction's own fields and its
        // position, so reparsing identical input is idempotent.
        _ => derived_id(date, amount, &name, ordinal),
    };
    // Non-conformant exports reuse FITIDs; ids must stay unique within the
    // account, so a repeat is replaced by the derived form.
    if seen_ids.contains(&id) {
        warnings.push(Error {
            msg: format!("Duplicate transaction id {:?}; a derived id was assigned.", id),
            src: node.src(),
            r#type: ErrorType::Syntax,
            level: ErrorLevel::Info,
        });
        id = derived_id(date, amount, &name, ordinal);
        while seen_ids.contains(&id) {
            id = format!("{}:{}", id, ordinal);
        }
    }
    seen_ids.insert(id.clone());

    let r#type = node
        .leaf("TRNTYPE")
        .and_then(TxnType::from_ofx)
        .unwrap_or_else(|| TxnType::from_sign(amount));

    Some(Transaction {
        id,
        date,
        time,
        amount,
        name,
        memo: node.leaf("MEMO").filter(|m| !m.is_empty()).map(str::to_string),
        r#type,
        check_number: node
            .leaf("CHECKNUM")
            .filter(|n| !n.is_empty())
            .map(str::to_string),
    })
}

fn derived_id(date: Date, amount: Decimal, name: &str, ordinal: usize) -> String {
    format!("{}:{}:{}:{}", date.format("%Y%m%d"), amount, name, ordinal)
}

/// Parses an OFX date field: `YYYYMMDD`, optionally followed by `HHMMSS`, a
/// fractional part, and a timezone suffix like `[-5:EST]`. The calendar date
/// is canonical; the timezone suffix never shifts it, and the time of day is
/// kept only as a same-day ordering tiebreak.
pub(crate) fn parse_datetime(text: &str) -> Option<(Date, Option<Time>)> {
    let trimmed = text.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..digits_end];
    if digits.len() < 8 {
        return None;
    }
    let year = digits[0..4].parse().ok()?;
    let month = digits[4..6].parse().ok()?;
    let day = digits[6..8].parse().ok()?;
    let date = Date::from_ymd_opt(year, month, day)?;
    let time = if digits.len() >= 14 {
        let hour = digits[8..10].parse().ok()?;
        let minute = digits[10..12].parse().ok()?;
        let second = digits[12..14].parse().ok()?;
        Time::from_hms_opt(hour, minute, second)
    } else {
        None
    };
    Some((date, time))
}
