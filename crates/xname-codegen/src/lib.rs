//! Partial-class source generation for resolved XAML views.
//!
//! Given a view's class name, namespace, root type, and resolved names, the
//! generators render a C# or Visual Basic compilation unit that exposes
//! each named element on the code-behind class.
//!
//! # Strategies
//!
//! - `OnlyProperties` - one lookup property per name
//! - `InitializeComponent` - fields plus an `InitializeComponent` method
//!
//! # Example
//!
//! ```
//! use xname_codegen::{AccessorGenerator, AccessorStrategy, CodeGenerator, CodegenOptions};
//! use xname_core::{FieldModifier, ResolvedName, TypeRef};
//!
//! let generator = AccessorGenerator::new(AccessorStrategy::OnlyProperties, CodegenOptions::default())?;
//! let names = [ResolvedName::new("global::Avalonia.Controls.Button", "ok", FieldModifier::Private)];
//! let code = generator.generate_code("Dialog", "App", &TypeRef::new("Avalonia.Controls", "Window"), &names)?;
//! assert!(code.contains("partial class Dialog"));
//! # Ok::<(), xname_codegen::CodegenError>(())
//! ```

pub mod error;
pub mod generators;

pub use error::{CodegenError, Result};
pub use generators::{
    AccessorGenerator, AccessorStrategy, CodeGenerator, CodegenOptions,
    InitializeComponentGenerator, OnlyPropertiesGenerator, TemplateEngine,
};
