//! Error types for the xname generator.

use crate::markup::Span;
use thiserror::Error;

/// Errors while parsing markup text into a tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at line {line}, column {column}: expected {expected}, found {found:?}")]
    UnexpectedToken {
        found: String,
        expected: String,
        line: u32,
        column: u32,
    },

    #[error("Mismatched closing tag at line {}: expected </{expected}>, found </{found}>", .span.line)]
    MismatchedTag {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unterminated {construct} starting at line {line}")]
    Unterminated { construct: String, line: u32 },

    #[error("Invalid entity reference '&{entity};' at line {line}")]
    InvalidEntity { entity: String, line: u32 },

    #[error("Duplicate attribute '{name}' at line {}", .span.line)]
    DuplicateAttribute { name: String, span: Span },

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Unexpected content after the root element at line {line}")]
    TrailingContent { line: u32 },

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Elements nested deeper than {limit} levels at line {line}")]
    NestingTooDeep { limit: usize, line: u32 },
}

/// Errors while resolving a view, its types, or its names.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Undeclared namespace prefix '{prefix}' at line {}", .span.line)]
    UndeclaredPrefix { prefix: String, span: Span },

    #[error("XML namespace '{uri}' does not map to a CLR namespace (element <{element}> at line {})", .span.line)]
    UnmappedNamespace {
        uri: String,
        element: String,
        span: Span,
    },

    #[error("Name '{name}' is declared twice (lines {first_line} and {})", .span.line)]
    DuplicateName {
        name: String,
        first_line: u32,
        span: Span,
    },

    #[error("Invalid x:TypeArguments '{value}': {reason}")]
    InvalidTypeArguments {
        value: String,
        reason: String,
        span: Span,
    },
}

/// Errors in generator configuration. Always fatal for the whole run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    #[error("Unknown naming strategy: {value}")]
    UnknownNamingStrategy { value: String },

    #[error("Unknown generator behavior: {value}")]
    UnknownBehavior { value: String },

    #[error("Unknown target language: {value}")]
    UnknownLanguage { value: String },

    #[error("Unknown field modifier: {value}")]
    UnknownFieldModifier { value: String },

    #[error("Invalid options: {reason}")]
    InvalidOptions { reason: String },
}
