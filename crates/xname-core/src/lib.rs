//! Core types, markup tree definitions, and errors for the xname generator.
//!
//! This crate provides the foundational types used across all other xname crates:
//! - Markup tree types produced by the parser
//! - Resolved view and name types consumed by the code generators
//! - The XML namespace map used for type resolution
//! - Error types

pub mod errors;
pub mod markup;
pub mod namespaces;
pub mod types;

pub use errors::*;
pub use markup::*;
pub use namespaces::*;
pub use types::*;
