use chrono::NaiveDate;
pub use chrono::NaiveDate as Date;
pub use chrono::NaiveTime as Time;
use getset::{CopyGetters, Getters};
pub use rust_decimal::Decimal;
use rust_decimal::prelude::Zero;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Representing a location, line number and column number, in the source
/// document.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl From<(usize, usize)> for Location {
    fn from(tuple: (usize, usize)) -> Self {
        Location {
            line: tuple.0,
            col: tuple.1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Kinds of errors that `ofxkit` encountered while turning a document into a
/// [`StatementSet`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// A malformed line in the `KEY:VALUE` header block. Never fatal, the tag
    /// body is still parsed.
    Header,
    /// A syntax problem in the tag body.
    Syntax,
    /// The tag nesting exceeded [`ParseOptions::max_depth`](crate::ParseOptions).
    /// Fatal: such input is considered pathological.
    DepthLimit,
    /// The document contains no extractable statement at all. Fatal: there is
    /// nothing to normalize.
    NoStatements,
    /// A transaction date that cannot be parsed; the transaction is dropped.
    Date,
    /// A transaction amount that cannot be parsed; the transaction is dropped.
    Amount,
    /// A statement missing its account identity or transaction list; the
    /// statement is skipped.
    MissingSection,
}

/// The level of an error. Problems at [`ErrorLevel::Warning`] and below are
/// attached to the successful result; only document-structural problems carry
/// [`ErrorLevel::Error`] and abort the parse.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
}

/// Contains the full information of an error.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    pub msg: String,
    pub src: Location,
    pub r#type: ErrorType,
    pub level: ErrorLevel,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}\n  at {}", self.level, self.msg, self.src)
    }
}

pub type Currency = String;

/// The `KEY:VALUE` lines preceding the tag body of an OFX 1.x document. An
/// OFX 2.x (XML) document has no such block and yields an empty header.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pub(crate) entries: HashMap<String, String>,
}

impl Header {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|v| v.as_str())
    }

    /// The declared `VERSION` value, e.g. `102`.
    pub fn version(&self) -> Option<&str> {
        self.get("VERSION")
    }

    /// The declared `ENCODING` value, e.g. `USASCII`.
    pub fn encoding(&self) -> Option<&str> {
        self.get("ENCODING")
    }

    /// The declared `CHARSET` value, e.g. `1252`. The caller decodes raw
    /// bytes; this value is only surfaced, never acted upon.
    pub fn charset(&self) -> Option<&str> {
        self.get("CHARSET")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The kind of account a statement describes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Checking,
    Savings,
    CreditCard,
    Other,
}

impl AccountType {
    /// Maps an OFX `ACCTTYPE` value. Unrecognized values become
    /// [`AccountType::Other`].
    pub fn from_ofx(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CHECKING" => AccountType::Checking,
            "SAVINGS" => AccountType::Savings,
            "CREDITCARD" | "CREDITLINE" => AccountType::CreditCard,
            _ => AccountType::Other,
        }
    }

    pub fn as_ofx(&self) -> &'static str {
        match self {
            AccountType::Checking => "CHECKING",
            AccountType::Savings => "SAVINGS",
            AccountType::CreditCard => "CREDITCARD",
            AccountType::Other => "OTHER",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ofx())
    }
}

/// The type of a [`Transaction`], from the OFX `TRNTYPE` vocabulary.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxnType {
    Credit,
    Debit,
    Check,
    Interest,
    Dividend,
    Fee,
    ServiceCharge,
    Deposit,
    Atm,
    Pos,
    Transfer,
    Payment,
    Other,
}

impl TxnType {
    /// Maps an explicit `TRNTYPE` value, or `None` when the value is not part
    /// of the known vocabulary. Callers fall back to the amount's sign.
    pub fn from_ofx(value: &str) -> Option<Self> {
        let t = match value.trim().to_ascii_uppercase().as_str() {
            "CREDIT" => TxnType::Credit,
            "DEBIT" => TxnType::Debit,
            "CHECK" => TxnType::Check,
            "INT" => TxnType::Interest,
            "DIV" => TxnType::Dividend,
            "FEE" => TxnType::Fee,
            "SRVCHG" => TxnType::ServiceCharge,
            "DEP" | "DIRECTDEP" => TxnType::Deposit,
            "ATM" => TxnType::Atm,
            "POS" => TxnType::Pos,
            "XFER" | "DIRECTDEBIT" => TxnType::Transfer,
            "PAYMENT" | "REPEATPMT" => TxnType::Payment,
            "OTHER" => TxnType::Other,
            _ => return None,
        };
        Some(t)
    }

    /// Classifies by the amount's sign: inflows are credits, outflows debits.
    pub fn from_sign(amount: Decimal) -> Self {
        if amount.is_sign_negative() && !amount.is_zero() {
            TxnType::Debit
        } else {
            TxnType::Credit
        }
    }

    pub fn as_ofx(&self) -> &'static str {
        match self {
            TxnType::Credit => "CREDIT",
            TxnType::Debit => "DEBIT",
            TxnType::Check => "CHECK",
            TxnType::Interest => "INT",
            TxnType::Dividend => "DIV",
            TxnType::Fee => "FEE",
            TxnType::ServiceCharge => "SRVCHG",
            TxnType::Deposit => "DEP",
            TxnType::Atm => "ATM",
            TxnType::Pos => "POS",
            TxnType::Transfer => "XFER",
            TxnType::Payment => "PAYMENT",
            TxnType::Other => "OTHER",
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ofx())
    }
}

/// A ledger balance snapshot from a `LEDGERBAL` subtree.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
pub struct Balance {
    /// Returns the balance amount.
    #[getset(get_copy = "pub")]
    pub(crate) amount: Decimal,

    /// Returns the as-of date, when the statement declared one.
    #[getset(get_copy = "pub")]
    pub(crate) as_of: Option<Date>,
}

/// A single normalized transaction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Transaction {
    /// Returns the transaction identifier: the source `FITID` when present,
    /// otherwise a value derived from date, amount, name, and position, so
    /// reparsing identical input yields identical ids.
    #[getset(get = "pub")]
    pub(crate) id: String,

    /// Returns the posted date.
    #[getset(get_copy = "pub")]
    pub(crate) date: Date,

    /// Returns the posted time of day, if the source carried one. Only useful
    /// as a same-day ordering tiebreak; it never shifts [`Transaction::date`].
    #[getset(get_copy = "pub")]
    pub(crate) time: Option<Time>,

    /// Returns the signed amount: positive for inflows, negative for
    /// outflows.
    #[getset(get_copy = "pub")]
    pub(crate) amount: Decimal,

    /// Returns the payee or description.
    #[getset(get = "pub")]
    pub(crate) name: String,

    /// Returns the memo, if any.
    #[getset(get = "pub")]
    pub(crate) memo: Option<String>,

    /// Returns the transaction type.
    #[getset(get_copy = "pub")]
    pub(crate) r#type: TxnType,

    /// Returns the check number, if any.
    #[getset(get = "pub")]
    pub(crate) check_number: Option<String>,
}

/// One account's statement: identity, balance snapshot, and transactions in
/// source document order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Account {
    /// Returns the account identifier (`ACCTID`).
    #[getset(get = "pub")]
    pub(crate) account_id: String,

    /// Returns the account type.
    #[getset(get_copy = "pub")]
    pub(crate) account_type: AccountType,

    /// Returns the routing/bank identifier (`BANKID`), if any.
    #[getset(get = "pub")]
    pub(crate) bank_id: Option<String>,

    /// Returns the currency code (`CURDEF`), or the configured default when
    /// the statement declared none.
    #[getset(get = "pub")]
    pub(crate) currency: Currency,

    /// Returns the ledger balance snapshot, if present.
    #[getset(get_copy = "pub")]
    pub(crate) balance: Option<Balance>,

    /// Returns the transactions in source document order.
    #[getset(get = "pub")]
    pub(crate) txns: Vec<Transaction>,
}

/// The result of parsing one document: every extracted account statement,
/// the document header, and the warnings absorbed along the way.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StatementSet {
    /// Returns the parsed `KEY:VALUE` header block.
    #[getset(get = "pub")]
    pub(crate) header: Header,

    /// Returns the accounts in document order.
    #[getset(get = "pub")]
    pub(crate) accounts: Vec<Account>,

    /// Returns the non-fatal problems encountered: malformed header lines,
    /// dropped transactions, skipped statements.
    #[getset(get = "pub")]
    pub(crate) warnings: Vec<Error>,
}

/// Aggregate statistics over one transaction list. Derived on demand by
/// [`Stats::from_txns`](crate::Stats::from_txns), never stored on the model.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
pub struct Stats {
    /// Returns the number of transactions.
    #[getset(get_copy = "pub")]
    pub(crate) count: usize,

    /// Returns the sum of all positive amounts.
    #[getset(get_copy = "pub")]
    pub(crate) total_credits: Decimal,

    /// Returns the sum of the absolute values of all negative amounts.
    #[getset(get_copy = "pub")]
    pub(crate) total_debits: Decimal,

    /// Returns `total_credits - total_debits`, which equals the plain sum of
    /// every amount.
    #[getset(get_copy = "pub")]
    pub(crate) net_change: Decimal,

    /// Returns the earliest and latest posted dates, or `None` for an empty
    /// list.
    #[getset(get_copy = "pub")]
    pub(crate) date_range: Option<(NaiveDate, NaiveDate)>,
}
