//! Accessor generators.
//!
//! Each strategy renders a class body; the body is then wrapped in a
//! compilation unit (header, imports, namespace) shared by all strategies.

mod initialize;
mod properties;
mod templates;

pub use initialize::InitializeComponentGenerator;
pub use properties::OnlyPropertiesGenerator;
pub use templates::TemplateEngine;

use crate::error::Result;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use xname_core::{ConfigError, ResolvedName, TargetLanguage, TypeRef};

/// Common trait for accessor generators.
pub trait CodeGenerator {
    /// Strategy name, as accepted by [`AccessorStrategy::from_str`].
    fn strategy_name(&self) -> &'static str;

    /// Render the partial class for one view.
    ///
    /// Pure: identical arguments always produce identical output.
    fn generate_code(
        &self,
        class_name: &str,
        namespace: &str,
        root_type: &TypeRef,
        names: &[ResolvedName],
    ) -> Result<String>;
}

/// How named elements are exposed on the generated class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AccessorStrategy {
    /// One property per name that looks the element up on every access.
    #[default]
    OnlyProperties,
    /// One field per name, assigned by a generated `InitializeComponent`.
    InitializeComponent,
}

impl FromStr for AccessorStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "OnlyProperties" => Ok(Self::OnlyProperties),
            "InitializeComponent" => Ok(Self::InitializeComponent),
            other => Err(ConfigError::UnknownBehavior {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AccessorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnlyProperties => write!(f, "OnlyProperties"),
            Self::InitializeComponent => write!(f, "InitializeComponent"),
        }
    }
}

/// Options shared by all generators.
#[derive(Debug, Clone, Default)]
pub struct CodegenOptions {
    pub language: TargetLanguage,
    /// Extra namespaces imported after the built-in ones.
    pub additional_namespaces: Vec<String>,
}

/// The configured generator, selected once per run.
pub enum AccessorGenerator {
    OnlyProperties(OnlyPropertiesGenerator),
    InitializeComponent(InitializeComponentGenerator),
}

impl AccessorGenerator {
    pub fn new(strategy: AccessorStrategy, options: CodegenOptions) -> Result<Self> {
        Ok(match strategy {
            AccessorStrategy::OnlyProperties => {
                Self::OnlyProperties(OnlyPropertiesGenerator::new(options)?)
            }
            AccessorStrategy::InitializeComponent => {
                Self::InitializeComponent(InitializeComponentGenerator::new(options)?)
            }
        })
    }
}

impl CodeGenerator for AccessorGenerator {
    fn strategy_name(&self) -> &'static str {
        match self {
            Self::OnlyProperties(g) => g.strategy_name(),
            Self::InitializeComponent(g) => g.strategy_name(),
        }
    }

    fn generate_code(
        &self,
        class_name: &str,
        namespace: &str,
        root_type: &TypeRef,
        names: &[ResolvedName],
    ) -> Result<String> {
        match self {
            Self::OnlyProperties(g) => g.generate_code(class_name, namespace, root_type, names),
            Self::InitializeComponent(g) => {
                g.generate_code(class_name, namespace, root_type, names)
            }
        }
    }
}

#[derive(Serialize)]
struct FileData<'a> {
    root_type: String,
    imports: String,
    namespace: &'a str,
    body: &'a str,
}

/// Wrap a rendered class body in a compilation unit.
pub(crate) fn render_file(
    engine: &TemplateEngine,
    options: &CodegenOptions,
    builtin_imports: &[&str],
    namespace: &str,
    root_type: &TypeRef,
    body: &str,
) -> Result<String> {
    let language = options.language;
    let imports: String = builtin_imports
        .iter()
        .copied()
        .chain(options.additional_namespaces.iter().map(String::as_str))
        .map(|ns| match language {
            TargetLanguage::CSharp => format!("using {};\n", ns),
            TargetLanguage::VisualBasic => format!("Imports {}\n", ns),
        })
        .collect();

    let template = match (language, namespace.is_empty()) {
        (TargetLanguage::CSharp, false) => "cs_file",
        (TargetLanguage::CSharp, true) => "cs_file_global",
        (TargetLanguage::VisualBasic, false) => "vb_file",
        (TargetLanguage::VisualBasic, true) => "vb_file_global",
    };

    engine.render(
        template,
        &FileData {
            root_type: root_type.qualified(language),
            imports,
            namespace,
            body: body.trim_end(),
        },
    )
}
