//! Grammar rules for markup documents.
//!
//! Token-level pieces come from the lexer; element nesting is driven by a
//! small stateful parser that tracks the byte offset for error reporting.

use xname_core::{Attribute, MarkupDocument, MarkupElement, MarkupNode, ParseError, QualifiedName, Span};

use crate::lexer::*;

/// Deepest element nesting accepted before the document is rejected.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parse a complete markup document.
pub fn parse(input: &str) -> Result<MarkupDocument, ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut parser = Parser::new(input);
    parser.parse_document()
}

/// Stateful parser that tracks the unconsumed remainder of the source.
struct Parser<'a> {
    source: &'a str,
    rest: &'a str,
    /// Byte offset of the first character of each line.
    line_starts: Vec<usize>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            rest: source,
            line_starts,
            depth: 0,
        }
    }

    fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    /// 1-based line and column for a byte offset.
    fn position(&self, offset: usize) -> (u32, u32) {
        // line_starts[0] is 0, so the partition point is at least 1.
        let index = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let column = self.source[self.line_starts[index]..offset].chars().count() + 1;
        (index as u32 + 1, column as u32)
    }

    fn span_from(&self, start: usize) -> Span {
        let (line, column) = self.position(start);
        Span {
            start,
            end: self.offset(),
            line,
            column,
        }
    }

    fn line(&self) -> u32 {
        self.position(self.offset()).0
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        if self.rest.is_empty() {
            return ParseError::UnexpectedEof;
        }
        let (line, column) = self.position(self.offset());
        ParseError::UnexpectedToken {
            found: self
                .rest
                .chars()
                .take_while(|c| !c.is_whitespace())
                .take(24)
                .collect(),
            expected: expected.to_string(),
            line,
            column,
        }
    }

    fn unterminated(&self, construct: &str) -> ParseError {
        ParseError::Unterminated {
            construct: construct.to_string(),
            line: self.line(),
        }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    /// Skip whitespace, comments, processing instructions and doctype.
    fn skip_misc(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            if self.rest.starts_with("<!--") {
                self.rest = comment(self.rest)
                    .map_err(|_| self.unterminated("comment"))?
                    .0;
            } else if self.rest.starts_with("<?") {
                self.rest = processing_instruction(self.rest)
                    .map_err(|_| self.unterminated("processing instruction"))?
                    .0;
            } else if self.rest.starts_with("<!DOCTYPE") {
                self.rest = doctype(self.rest)
                    .map_err(|_| self.unterminated("doctype"))?
                    .0;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_document(&mut self) -> Result<MarkupDocument, ParseError> {
        self.skip_misc()?;
        if self.rest.is_empty() {
            return Err(ParseError::MissingRoot);
        }
        if !self.rest.starts_with('<') {
            return Err(self.unexpected("root element"));
        }

        let root = self.parse_element()?;

        self.skip_misc()?;
        if !self.rest.is_empty() {
            return Err(ParseError::TrailingContent { line: self.line() });
        }

        Ok(MarkupDocument { root })
    }

    /// Parse an element starting at `<`, including its children and closing tag.
    fn parse_element(&mut self) -> Result<MarkupElement, ParseError> {
        let start = self.offset();
        if self.depth == MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                line: self.line(),
            });
        }
        self.depth += 1;
        let element = self.parse_element_body(start);
        self.depth -= 1;
        element
    }

    fn parse_element_body(&mut self, start: usize) -> Result<MarkupElement, ParseError> {
        self.rest = self
            .rest
            .strip_prefix('<')
            .ok_or_else(|| self.unexpected("'<'"))?;

        let (rest, raw_name) = name(self.rest).map_err(|_| self.unexpected("element name"))?;
        self.rest = rest;

        let attributes = self.parse_attributes()?;

        if let Some(rest) = self.rest.strip_prefix("/>") {
            self.rest = rest;
            return Ok(MarkupElement {
                name: QualifiedName::parse(raw_name),
                attributes,
                children: Vec::new(),
                span: self.span_from(start),
            });
        }

        self.rest = self
            .rest
            .strip_prefix('>')
            .ok_or_else(|| self.unexpected("'>' or '/>'"))?;

        let children = self.parse_content(raw_name, start)?;

        Ok(MarkupElement {
            name: QualifiedName::parse(raw_name),
            attributes,
            children,
            span: self.span_from(start),
        })
    }

    fn parse_attributes(&mut self) -> Result<Vec<Attribute>, ParseError> {
        let mut attributes: Vec<Attribute> = Vec::new();

        loop {
            let before = self.rest.len();
            self.skip_whitespace();
            if self.rest.starts_with("/>") || self.rest.starts_with('>') {
                return Ok(attributes);
            }
            if self.rest.is_empty() {
                return Err(self.unterminated("start tag"));
            }
            if self.rest.len() == before {
                return Err(self.unexpected("whitespace before attribute"));
            }

            let start = self.offset();
            let (rest, raw_name) =
                name(self.rest).map_err(|_| self.unexpected("attribute name"))?;
            self.rest = rest;
            let (rest, raw_value) =
                attribute_value(self.rest).map_err(|_| self.unexpected("quoted attribute value"))?;
            self.rest = rest;

            let span = self.span_from(start);
            let value = decode_entities(raw_value, span.line)?;
            let name = QualifiedName::parse(raw_name);
            if attributes.iter().any(|a| a.name == name) {
                return Err(ParseError::DuplicateAttribute {
                    name: raw_name.to_string(),
                    span,
                });
            }
            attributes.push(Attribute { name, value, span });
        }
    }

    /// Parse element content up to and including the matching closing tag.
    fn parse_content(&mut self, open_name: &str, start: usize) -> Result<Vec<MarkupNode>, ParseError> {
        let mut children = Vec::new();

        loop {
            if self.rest.is_empty() {
                return Err(ParseError::Unterminated {
                    construct: format!("element <{}>", open_name),
                    line: self.position(start).0,
                });
            }

            if self.rest.starts_with("</") {
                let close_start = self.offset();
                let (rest, close_name) =
                    closing_tag(self.rest).map_err(|_| self.unexpected("closing tag"))?;
                self.rest = rest;
                if close_name != open_name {
                    return Err(ParseError::MismatchedTag {
                        expected: open_name.to_string(),
                        found: close_name.to_string(),
                        span: self.span_from(close_start),
                    });
                }
                return Ok(children);
            }

            if self.rest.starts_with("<!--") {
                self.rest = comment(self.rest)
                    .map_err(|_| self.unterminated("comment"))?
                    .0;
            } else if self.rest.starts_with("<![CDATA[") {
                let (rest, text) = cdata(self.rest).map_err(|_| self.unterminated("CDATA section"))?;
                self.rest = rest;
                children.push(MarkupNode::Text(text.to_string()));
            } else if self.rest.starts_with("<?") {
                self.rest = processing_instruction(self.rest)
                    .map_err(|_| self.unterminated("processing instruction"))?
                    .0;
            } else if self.rest.starts_with('<') {
                children.push(MarkupNode::Element(self.parse_element()?));
            } else {
                let line = self.line();
                let (rest, raw) = char_data(self.rest).map_err(|_| self.unexpected("text"))?;
                self.rest = rest;
                if !raw.trim().is_empty() {
                    children.push(MarkupNode::Text(decode_entities(raw, line)?));
                }
            }
        }
    }
}
