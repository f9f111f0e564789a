use super::Token;
use crate::Location;
use logos::{Lexer as LogosLexer, Logos};

/// A peekable wrapper around the logos lexer that skips XML declarations and
/// whitespace-only text, and tracks the line/column of the current token.
pub struct Lexer<'source, Token: Logos<'source>> {
    llex: LogosLexer<'source, Token>,
    location: Location,
    peeked_token: Option<(Token, &'source str)>,
}

impl<'source> Lexer<'source, Token> {
    pub fn new(src: &'source str, start: Location) -> Self {
        let mut lexer = Lexer {
            llex: Token::lexer(src),
            location: start,
            peeked_token: None,
        };
        lexer.skip_insignificant();
        lexer
    }

    pub fn location(&self) -> Location {
        self.location
    }

    fn advance_location(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.location.line += 1;
                self.location.col = 1;
            } else {
                self.location.col += 1;
            }
        }
    }

    fn skip_insignificant(&mut self) {
        while let Some(token) = self.llex.next() {
            let slice = self.llex.slice();
            match token {
                Token::Decl => self.advance_location(slice),
                Token::Text if slice.trim().is_empty() => self.advance_location(slice),
                _ => {
                    self.peeked_token = Some((token, slice));
                    return;
                }
            }
        }
    }

    pub fn peek(&mut self) -> Option<(Token, &'source str)> {
        self.peeked_token
    }

    pub fn consume(&mut self) {
        if let Some((_, text)) = self.peeked_token.take() {
            self.advance_location(text);
            self.skip_insignificant();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_whitespace_only_text() {
        let mut lexer = Lexer::new("<OFX>\n  <CURDEF>USD\n</OFX>", (1, 1).into());
        assert_eq!(lexer.peek(), Some((Token::OpenTag, "<OFX>")));
        lexer.consume();
        assert_eq!(lexer.peek(), Some((Token::OpenTag, "<CURDEF>")));
        lexer.consume();
        assert_eq!(lexer.peek(), Some((Token::Text, "USD\n")));
        lexer.consume();
        assert_eq!(lexer.peek(), Some((Token::CloseTag, "</OFX>")));
        lexer.consume();
        assert_eq!(lexer.peek(), None);
    }

    #[test]
    fn tracks_line_numbers() {
        let mut lexer = Lexer::new("<OFX>\n<STMTTRN>", (1, 1).into());
        assert_eq!(lexer.location().line, 1);
        lexer.consume();
        assert_eq!(lexer.location().line, 2);
        assert_eq!(lexer.location().col, 1);
    }
}
