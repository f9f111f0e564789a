use super::lexer::Lexer;
use super::token::Token;
use crate::options::ParseOptions;
use crate::utils::decode_entities;
use crate::{Error, ErrorLevel, ErrorType, Header, Location};
use log::{debug, warn};

/// A node of the raw tag tree. Either a leaf holding a text value, closed
/// implicitly at the next tag, or a container holding child nodes. The tree
/// is built once per parse and dropped after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawNode {
    Leaf {
        name: String,
        value: String,
        src: Location,
    },
    Container {
        name: String,
        children: Vec<RawNode>,
        src: Location,
    },
}

impl RawNode {
    pub fn name(&self) -> &str {
        match self {
            RawNode::Leaf { name, .. } => name,
            RawNode::Container { name, .. } => name,
        }
    }

    pub fn src(&self) -> Location {
        match self {
            RawNode::Leaf { src, .. } => *src,
            RawNode::Container { src, .. } => *src,
        }
    }

    pub fn children(&self) -> &[RawNode] {
        match self {
            RawNode::Container { children, .. } => children,
            RawNode::Leaf { .. } => &[],
        }
    }

    /// The first direct child with the given name.
    pub fn find(&self, name: &str) -> Option<&RawNode> {
        self.children().iter().find(|child| child.name() == name)
    }

    /// The value of the first direct leaf child with the given name.
    pub fn leaf(&self, name: &str) -> Option<&str> {
        self.children().iter().find_map(|child| match child {
            RawNode::Leaf { name: n, value, .. } if n == name => Some(value.as_str()),
            _ => None,
        })
    }
}

/// An open container on the tree builder's stack.
struct Frame {
    name: String,
    children: Vec<RawNode>,
    src: Location,
}

/// Builds the raw tag tree from the body of a document.
pub struct Parser<'source> {
    lexer: Lexer<'source, Token>,
    stack: Vec<Frame>,
    max_depth: usize,
}

impl<'source> Parser<'source> {
    /// Splits `content` into the `KEY:VALUE` header block and the tag body,
    /// then builds the tree. Malformed header lines are reported in
    /// `warnings` and do not stop body parsing; exceeding the nesting limit
    /// is fatal.
    pub fn parse(
        content: &'source str,
        options: &ParseOptions,
        warnings: &mut Vec<Error>,
    ) -> Result<(Header, RawNode), Error> {
        let content = content.trim_start_matches('\u{feff}');
        let body_start = content.find('<').unwrap_or(content.len());
        let (header_text, body) = content.split_at(body_start);
        let header = Self::parse_header(header_text, warnings);
        debug!(
            "header block: {} entries, body: {} bytes",
            header.entries.len(),
            body.len()
        );

        let start_line = header_text.chars().filter(|&c| c == '\n').count() + 1;
        let mut parser = Parser {
            lexer: Lexer::new(body, (start_line, 1).into()),
            stack: vec![Frame {
                name: String::new(),
                children: Vec::new(),
                src: (start_line, 1).into(),
            }],
            max_depth: options.max_depth,
        };
        let root = parser.build_tree(warnings)?;
        Ok((header, root))
    }

    fn parse_header(text: &str, warnings: &mut Vec<Error>) -> Header {
        let mut header = Header::default();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.split_once(':') {
                Some((key, val)) => {
                    header
                        .entries
                        .insert(key.trim().to_ascii_uppercase(), val.trim().to_string());
                }
                None => {
                    warn!("unreadable header line {}: {:?}", index + 1, line);
                    warnings.push(Error {
                        msg: format!("Unreadable header line: {:?}.", line),
                        src: (index + 1, 1).into(),
                        r#type: ErrorType::Header,
                        level: ErrorLevel::Warning,
                    });
                }
            }
        }
        header
    }

    fn build_tree(&mut self, warnings: &mut Vec<Error>) -> Result<RawNode, Error> {
        while let Some((token, text)) = self.lexer.peek() {
            match token {
                Token::OpenTag => self.open_tag(Token::tag_name(text))?,
                Token::CloseTag => {
                    self.close_tag(&Token::tag_name(text));
                    self.lexer.consume();
                }
                Token::Text => {
                    // Text not preceded by an open tag belongs to nothing.
                    warnings.push(Error {
                        msg: format!("Stray text outside any tag: {:?}.", text.trim()),
                        src: self.lexer.location(),
                        r#type: ErrorType::Syntax,
                        level: ErrorLevel::Info,
                    });
                    self.lexer.consume();
                }
                Token::Decl => self.lexer.consume(),
                Token::Error => {
                    warnings.push(Error {
                        msg: format!("Unrecognized input: {:?}.", text),
                        src: self.lexer.location(),
                        r#type: ErrorType::Syntax,
                        level: ErrorLevel::Warning,
                    });
                    self.lexer.consume();
                }
            }
        }
        // EOF implicitly closes whatever is still open.
        while self.stack.len() > 1 {
            self.pop_frame();
        }
        let root = self.stack.pop().unwrap();
        Ok(RawNode::Container {
            name: root.name,
            children: root.children,
            src: root.src,
        })
    }

    /// A tag followed by text is a leaf, closed at that point; a tag followed
    /// by another tag opens a container.
    fn open_tag(&mut self, name: String) -> Result<(), Error> {
        let src = self.lexer.location();
        self.lexer.consume();
        if let Some((Token::Text, text)) = self.lexer.peek() {
            let value = decode_entities(text.trim());
            self.lexer.consume();
            self.top().children.push(RawNode::Leaf { name, value, src });
            return Ok(());
        }
        if self.stack.len() >= self.max_depth {
            return Err(Error {
                msg: format!(
                    "Tag nesting exceeds the limit of {} at <{}>.",
                    self.max_depth, name
                ),
                src,
                r#type: ErrorType::DepthLimit,
                level: ErrorLevel::Error,
            });
        }
        self.stack.push(Frame {
            name,
            children: Vec::new(),
            src,
        });
        Ok(())
    }

    /// Pops to the nearest open container with a matching name, implicitly
    /// closing anything above it. A close tag matching nothing is ignored;
    /// non-conformant documents close leaves explicitly all the time.
    fn close_tag(&mut self, name: &str) {
        let matched = self
            .stack
            .iter()
            .skip(1)
            .rposition(|frame| frame.name == name);
        if let Some(index) = matched {
            while self.stack.len() > index + 1 {
                self.pop_frame();
            }
        }
    }

    fn pop_frame(&mut self) {
        let frame = self.stack.pop().unwrap();
        self.top().children.push(RawNode::Container {
            name: frame.name,
            children: frame.children,
            src: frame.src,
        });
    }

    fn top(&mut self) -> &mut Frame {
        self.stack.last_mut().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(content: &str) -> (Header, RawNode, Vec<Error>) {
        let mut warnings = Vec::new();
        let (header, root) =
            Parser::parse(content, &ParseOptions::default(), &mut warnings).unwrap();
        (header, root, warnings)
    }

    #[test]
    fn header_and_body_split() {
        let (header, root, warnings) = parse_ok(
            "OFXHEADER:100\nDATA:OFXSGML\nVERSION:102\n\n<OFX><CURDEF>USD</OFX>",
        );
        assert_eq!(header.version(), Some("102"));
        assert!(warnings.is_empty());
        let ofx = root.find("OFX").unwrap();
        assert_eq!(ofx.leaf("CURDEF"), Some("USD"));
    }

    #[test]
    fn malformed_header_line_is_non_fatal() {
        let (header, root, warnings) = parse_ok("OFXHEADER:100\ngarbage\n<OFX><A>1</OFX>");
        assert_eq!(header.get("OFXHEADER"), Some("100"));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].r#type, ErrorType::Header);
        assert!(root.find("OFX").is_some());
    }

    #[test]
    fn bom_is_tolerated() {
        let (_, root, _) = parse_ok("\u{feff}OFXHEADER:100\n<OFX><A>x</OFX>");
        assert_eq!(root.find("OFX").unwrap().leaf("A"), Some("x"));
    }

    #[test]
    fn leaf_self_closes_before_sibling_tag() {
        // A value tag with no explicit close followed by a sibling: the
        // sibling must not become a child.
        let (_, root, _) = parse_ok("<STMTTRN><NAME>COFFEE SHOP<MEMO>morning</STMTTRN>");
        let txn = root.find("STMTTRN").unwrap();
        assert_eq!(txn.leaf("NAME"), Some("COFFEE SHOP"));
        assert_eq!(txn.leaf("MEMO"), Some("morning"));
        assert_eq!(txn.children().len(), 2);
    }

    #[test]
    fn explicit_leaf_close_tags_are_ignored() {
        let (_, root, _) = parse_ok("<OFX><ACCTID>12345</ACCTID><BANKID>999</BANKID></OFX>");
        let ofx = root.find("OFX").unwrap();
        assert_eq!(ofx.leaf("ACCTID"), Some("12345"));
        assert_eq!(ofx.leaf("BANKID"), Some("999"));
    }

    #[test]
    fn mismatched_close_pops_to_nearest_match() {
        // </OFX> arrives while <BANKTRANLIST> is still open.
        let (_, root, _) = parse_ok("<OFX><BANKTRANLIST><STMTTRN><NAME>A</OFX>");
        let ofx = root.find("OFX").unwrap();
        let list = ofx.find("BANKTRANLIST").unwrap();
        assert_eq!(list.children()[0].name(), "STMTTRN");
    }

    #[test]
    fn unmatched_close_is_ignored() {
        let (_, root, _) = parse_ok("<OFX><A>1</NOTOPEN><B>2</OFX>");
        let ofx = root.find("OFX").unwrap();
        assert_eq!(ofx.leaf("A"), Some("1"));
        assert_eq!(ofx.leaf("B"), Some("2"));
    }

    #[test]
    fn eof_closes_open_containers() {
        let (_, root, _) = parse_ok("<OFX><BANKMSGSRSV1><STMTTRNRS>");
        let ofx = root.find("OFX").unwrap();
        assert!(ofx.find("BANKMSGSRSV1").unwrap().find("STMTTRNRS").is_some());
    }

    #[test]
    fn depth_limit_is_fatal() {
        let mut doc = String::new();
        for i in 0..300 {
            doc.push_str(&format!("<T{}>", i));
        }
        let mut warnings = Vec::new();
        let err = Parser::parse(&doc, &ParseOptions::default(), &mut warnings).unwrap_err();
        assert_eq!(err.r#type, ErrorType::DepthLimit);
        assert_eq!(err.level, ErrorLevel::Error);
    }

    #[test]
    fn depth_limit_is_configurable() {
        let options = ParseOptions {
            max_depth: 4,
            ..ParseOptions::default()
        };
        let mut warnings = Vec::new();
        assert!(Parser::parse("<A><B><C>", &options, &mut warnings).is_ok());
        assert!(Parser::parse("<A><B><C><D><E>", &options, &mut warnings).is_err());
    }

    #[test]
    fn entities_are_decoded_in_leaf_values() {
        let (_, root, _) = parse_ok("<OFX><NAME>AT&amp;T &lt;WIRELESS&gt;</OFX>");
        assert_eq!(root.find("OFX").unwrap().leaf("NAME"), Some("AT&T <WIRELESS>"));
    }

    #[test]
    fn xml_flavored_document_parses() {
        let (header, root, _) = parse_ok(
            "<?xml version=\"1.0\"?>\n<?OFX OFXHEADER=\"200\"?>\n<OFX><SIGNONMSGSRSV1></SIGNONMSGSRSV1></OFX>",
        );
        assert!(header.is_empty());
        assert!(root.find("OFX").is_some());
    }
}
