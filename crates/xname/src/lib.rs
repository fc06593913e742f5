//! Typed name-reference generator for XAML views.
//!
//! Given a batch of markup documents, the generator finds every view (a
//! document whose root declares `x:Class`), collects its named elements, and
//! emits a partial class exposing one typed accessor per name.
//!
//! # Features
//!
//! - `parallel` - resolve and generate documents on a `rayon` thread pool
//!
//! # Example
//!
//! ```
//! use xname::{Document, GenerationPipeline, GeneratorOptions};
//!
//! let markup = r#"<Window xmlns="https://github.com/avaloniaui"
//!         xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml"
//!         x:Class="App.Views.MainWindow">
//!     <Button x:Name="submit"/>
//! </Window>"#;
//!
//! let pipeline = GenerationPipeline::new(GeneratorOptions::default())?;
//! let output = pipeline.generate(&[Document::new("Views/MainWindow.axaml", markup)])?;
//!
//! assert_eq!(output[0].file_name, "MainWindow.g.cs");
//! assert!(output[0].content.contains("global::Avalonia.Controls.Button submit =>"));
//! # Ok::<(), xname::XNameError>(())
//! ```

pub mod error;
pub mod glob;
pub mod options;
pub mod pipeline;

pub use error::{Result, XNameError};
pub use glob::{GlobMatcher, GlobMatcherGroup};
pub use options::{GeneratorOptions, NamingStrategy};
pub use pipeline::{Document, GenerationPipeline, VIEW_EXTENSIONS};

pub use xname_codegen::AccessorStrategy;
pub use xname_core::{FieldModifier, GeneratedPartialClass, TargetLanguage};

/// Run a one-off generation with the given options.
pub fn generate(options: GeneratorOptions, documents: &[Document]) -> Result<Vec<GeneratedPartialClass>> {
    GenerationPipeline::new(options)?.generate(documents)
}
