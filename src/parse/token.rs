use logos::Logos;

#[derive(Debug, PartialEq, Logos, Clone, Copy)]
pub enum Token {
    /// An opening tag such as `<STMTTRN>` or `<TRNAMT>`.
    #[regex(r"<[^/<>!?\r\n][^<>\r\n]*>")]
    OpenTag,

    /// A closing tag such as `</STMTTRN>`.
    #[regex(r"</[^<>\r\n]+>")]
    CloseTag,

    /// An XML declaration, processing instruction, or doctype. Skipped.
    #[regex(r"<\?[^<>]*>")]
    #[regex(r"<![^<>]*>")]
    Decl,

    /// Raw text between tags, newlines included.
    #[regex(r"[^<]+")]
    Text,

    #[error]
    Error,
}

impl Token {
    /// The tag name inside an [`Token::OpenTag`]/[`Token::CloseTag`] slice,
    /// uppercased the way OFX element names are compared.
    pub fn tag_name(slice: &str) -> String {
        slice
            .trim_start_matches('<')
            .trim_end_matches('>')
            .trim_start_matches('/')
            .trim_end_matches('/')
            .trim()
            .to_ascii_uppercase()
    }
}
