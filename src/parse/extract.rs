use super::normalize::parse_datetime;
use super::parser::RawNode;
use crate::utils::parse_amount_opt;
use crate::{AccountType, Balance, Error, ErrorLevel, ErrorType};
use log::{debug, warn};

/// One statement-response subtree, partitioned but not yet normalized: the
/// account shell plus references to the raw transaction nodes in document
/// order.
#[derive(Debug)]
pub struct StatementDraft<'tree> {
    pub account_id: String,
    pub account_type: AccountType,
    pub bank_id: Option<String>,
    pub currency: Option<String>,
    pub balance: Option<Balance>,
    pub txn_nodes: Vec<&'tree RawNode>,
}

/// Collects every bank (`STMTRS`) and credit-card (`CCSTMTRS`) statement
/// subtree under `root`, in document order. A statement missing its account
/// identity or its transaction list is skipped with a warning; deciding
/// whether zero statements is fatal is the caller's job.
pub fn extract_statements<'tree>(
    root: &'tree RawNode,
    warnings: &mut Vec<Error>,
) -> Vec<StatementDraft<'tree>> {
    let mut drafts = Vec::new();
    visit(root, &mut drafts, warnings);
    debug!("extracted {} statement(s)", drafts.len());
    drafts
}

fn visit<'tree>(
    node: &'tree RawNode,
    drafts: &mut Vec<StatementDraft<'tree>>,
    warnings: &mut Vec<Error>,
) {
    match node.name() {
        "STMTRS" => {
            if let Some(draft) = extract_one(node, false, warnings) {
                drafts.push(draft);
            }
        }
        "CCSTMTRS" => {
            if let Some(draft) = extract_one(node, true, warnings) {
                drafts.push(draft);
            }
        }
        _ => {
            for child in node.children() {
                visit(child, drafts, warnings);
            }
        }
    }
}

fn extract_one<'tree>(
    stmt: &'tree RawNode,
    credit_card: bool,
    warnings: &mut Vec<Error>,
) -> Option<StatementDraft<'tree>> {
    let skipped = |msg: String, warnings: &mut Vec<Error>| {
        warn!("statement skipped: {}", msg);
        warnings.push(Error {
            msg,
            src: stmt.src(),
            r#type: ErrorType::MissingSection,
            level: ErrorLevel::Warning,
        });
        None
    };

    // Either identity tag is accepted on either statement kind; real-world
    // exports mix them up.
    let acct_from = stmt.find("CCACCTFROM").or_else(|| stmt.find("BANKACCTFROM"));
    let acct_from = match acct_from {
        Some(node) => node,
        None => {
            return skipped(
                "Statement skipped: no account identity section.".to_string(),
                warnings,
            )
        }
    };
    let account_id = match acct_from.leaf("ACCTID") {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            return skipped(
                "Statement skipped: account identity carries no ACCTID.".to_string(),
                warnings,
            )
        }
    };

    let txn_list = match stmt.find("BANKTRANLIST") {
        Some(list) => list,
        None => {
            return skipped(
                format!(
                    "Statement for account {} skipped: no transaction list.",
                    account_id
                ),
                warnings,
            )
        }
    };
    let txn_nodes = txn_list
        .children()
        .iter()
        .filter(|child| child.name() == "STMTTRN")
        .collect();

    let account_type = if credit_card {
        AccountType::CreditCard
    } else {
        acct_from
            .leaf("ACCTTYPE")
            .map(AccountType::from_ofx)
            .unwrap_or(AccountType::Other)
    };

    Some(StatementDraft {
        account_id,
        account_type,
        bank_id: acct_from.leaf("BANKID").map(str::to_string),
        currency: stmt.leaf("CURDEF").map(str::to_string),
        balance: extract_balance(stmt),
        txn_nodes,
    })
}

/// The ledger balance snapshot, when present and readable. An unreadable
/// balance is simply absent; it never invalidates the statement.
fn extract_balance(stmt: &RawNode) -> Option<Balance> {
    let ledger_bal = stmt.find("LEDGERBAL")?;
    let amount = parse_amount_opt(ledger_bal.leaf("BALAMT")?)?;
    let as_of = ledger_bal
        .leaf("DTASOF")
        .and_then(parse_datetime)
        .map(|(date, _)| date);
    Some(Balance { amount, as_of })
}
