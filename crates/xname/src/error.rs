//! Top-level error type.

use thiserror::Error;
use xname_codegen::CodegenError;
use xname_core::{ConfigError, ParseError, ResolveError};

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, XNameError>;

/// Any failure of a generation run.
#[derive(Error, Debug)]
pub enum XNameError {
    /// The document is not well-formed markup.
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(ResolveError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl From<ResolveError> for XNameError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Parse(parse) => Self::Parse(parse),
            other => Self::Resolve(other),
        }
    }
}
