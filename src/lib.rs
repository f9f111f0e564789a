//! # ofxkit
//!
//! ofxkit is a library for parsing OFX/QFX bank and credit-card statements
//! into a canonical transaction model, and for exporting that model to CSV,
//! QIF, a re-importable OFX document, and typed spreadsheet rows.
//!
//! The parser is tolerant by design: the format in the wild omits closing
//! tags, mixes locales, and packs several statements into one document.
//! Record-level problems are absorbed as warnings on the result; only
//! document-structural problems fail the parse.
//!
//! ```
//! let doc = "OFXHEADER:100\n\
//!     <OFX><STMTRS><CURDEF>USD\
//!     <BANKACCTFROM><ACCTID>77<ACCTTYPE>CHECKING</BANKACCTFROM>\
//!     <BANKTRANLIST>\
//!     <STMTTRN><TRNTYPE>DEBIT<DTPOSTED>20240115<TRNAMT>-42.50<NAME>COFFEE SHOP</STMTTRN>\
//!     </BANKTRANLIST></STMTRS></OFX>";
//! let statements = ofxkit::parse(doc).unwrap();
//! let account = &statements.accounts()[0];
//! let stats = ofxkit::stats(account.txns());
//! assert_eq!(stats.total_debits(), "42.50".parse().unwrap());
//! ```
#![doc(html_root_url = "https://docs.rs/ofxkit/0.1.0")]

pub mod export;
mod model;
mod options;
pub mod parse;
mod stats;
pub mod utils;

pub use export::{to_csv, to_ofx, to_qif, to_rows, Cell};
pub use model::*;
pub use options::ParseOptions;
pub use parse::{parse, parse_with};
pub use stats::stats;
