//! Parser for XAML view documents.
//!
//! This crate turns markup text into the element tree defined in `xname-core`.
//! Built on `nom` for the token-level grammar. Only well-formed XML is
//! accepted; DTD internal subsets and custom entities are not supported.

mod grammar;
mod lexer;

pub use grammar::{parse, MAX_NESTING_DEPTH};

use xname_core::{MarkupDocument, ParseError};

/// Parse a markup document from source text.
///
/// # Example
///
/// ```
/// use xname_parser::parse_document;
///
/// let source = r#"
/// <UserControl xmlns="https://github.com/avaloniaui">
///   <Button Name="okButton" />
/// </UserControl>
/// "#;
///
/// let doc = parse_document(source).unwrap();
/// assert_eq!(doc.root.name.local, "UserControl");
/// ```
pub fn parse_document(source: &str) -> Result<MarkupDocument, ParseError> {
    parse(source)
}
