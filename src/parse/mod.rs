mod extract;
mod lexer;
mod normalize;
mod parser;
mod token;

pub use lexer::Lexer;
pub use parser::{Parser, RawNode};
pub use token::Token;

use crate::options::ParseOptions;
use crate::{Error, ErrorLevel, ErrorType, StatementSet};
use log::debug;

/// Parses a decoded statement document with default [`ParseOptions`].
///
/// The caller has already read the source bytes and decoded them according
/// to any declared character set; `content` is the header lines plus the tag
/// body. Field- and record-level problems are absorbed into
/// [`StatementSet::warnings`]; only document-structural problems (nesting
/// beyond the depth limit, no extractable statement at all) are returned as
/// `Err`.
pub fn parse(content: &str) -> Result<StatementSet, Error> {
    parse_with(content, &ParseOptions::default())
}

/// Like [`parse`], with explicit options.
pub fn parse_with(content: &str, options: &ParseOptions) -> Result<StatementSet, Error> {
    let mut warnings = Vec::new();
    let (header, root) = Parser::parse(content, options, &mut warnings)?;
    let drafts = extract::extract_statements(&root, &mut warnings);
    if drafts.is_empty() {
        return Err(Error {
            msg: "No statement found in the document.".to_string(),
            src: root.src(),
            r#type: ErrorType::NoStatements,
            level: ErrorLevel::Error,
        });
    }
    let accounts = drafts
        .into_iter()
        .map(|draft| normalize::normalize_statement(draft, options, &mut warnings))
        .collect::<Vec<_>>();
    debug!(
        "parsed {} account(s) with {} warning(s)",
        accounts.len(),
        warnings.len()
    );
    Ok(StatementSet {
        header,
        accounts,
        warnings,
    })
}
