//! Resolved view, name, and output types.

use crate::errors::ConfigError;
use crate::markup::MarkupDocument;
use std::fmt;
use std::str::FromStr;

/// The language of the generated source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetLanguage {
    #[default]
    CSharp,
    VisualBasic,
}

impl TargetLanguage {
    /// Source file extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::CSharp => "cs",
            Self::VisualBasic => "vb",
        }
    }
}

impl FromStr for TargetLanguage {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csharp" | "c#" | "cs" => Ok(Self::CSharp),
            "visualbasic" | "vb" => Ok(Self::VisualBasic),
            _ => Err(ConfigError::UnknownLanguage {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CSharp => write!(f, "CSharp"),
            Self::VisualBasic => write!(f, "VisualBasic"),
        }
    }
}

/// A CLR type reference, possibly generic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRef {
    pub namespace: String,
    pub name: String,
    pub type_arguments: Vec<TypeRef>,
}

impl TypeRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }

    pub fn with_type_arguments(mut self, args: Vec<TypeRef>) -> Self {
        self.type_arguments = args;
        self
    }

    /// `Namespace.Name` without generic arguments or global qualifier.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Fully qualified form that compiles without extra imports.
    ///
    /// A type with no namespace is left bare so normal lookup applies.
    pub fn qualified(&self, language: TargetLanguage) -> String {
        let (global, open, separator, close) = match language {
            TargetLanguage::CSharp => ("global::", "<", ", ", ">"),
            TargetLanguage::VisualBasic => ("Global.", "(Of ", ", ", ")"),
        };
        let global = if self.namespace.is_empty() { "" } else { global };
        let mut out = format!("{}{}", global, self.full_name());
        if !self.type_arguments.is_empty() {
            let args: Vec<String> = self
                .type_arguments
                .iter()
                .map(|arg| arg.qualified(language))
                .collect();
            out.push_str(open);
            out.push_str(&args.join(separator));
            out.push_str(close);
        }
        out
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified(TargetLanguage::CSharp))
    }
}

/// Visibility of a generated accessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldModifier {
    Public,
    #[default]
    Private,
    Protected,
    Internal,
}

impl FieldModifier {
    /// Interpret an `x:FieldModifier` value. Unknown values yield `None`.
    pub fn from_directive(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "protected" => Some(Self::Protected),
            "internal" | "friend" | "notpublic" => Some(Self::Internal),
            _ => None,
        }
    }

    /// The modifier keyword in the target language.
    pub fn keyword(self, language: TargetLanguage) -> &'static str {
        match (language, self) {
            (TargetLanguage::CSharp, Self::Public) => "public",
            (TargetLanguage::CSharp, Self::Private) => "private",
            (TargetLanguage::CSharp, Self::Protected) => "protected",
            (TargetLanguage::CSharp, Self::Internal) => "internal",
            (TargetLanguage::VisualBasic, Self::Public) => "Public",
            (TargetLanguage::VisualBasic, Self::Private) => "Private",
            (TargetLanguage::VisualBasic, Self::Protected) => "Protected",
            (TargetLanguage::VisualBasic, Self::Internal) => "Friend",
        }
    }
}

impl fmt::Display for FieldModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword(TargetLanguage::CSharp))
    }
}

impl FromStr for FieldModifier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_directive(s).ok_or_else(|| ConfigError::UnknownFieldModifier {
            value: s.to_string(),
        })
    }
}

/// A named element found in a view.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedName {
    /// Fully qualified type in the target language.
    pub type_name: String,
    /// Declared identifier; member name and lookup key.
    pub name: String,
    pub field_modifier: FieldModifier,
}

impl ResolvedName {
    pub fn new(
        type_name: impl Into<String>,
        name: impl Into<String>,
        field_modifier: FieldModifier,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            field_modifier,
        }
    }
}

/// A markup document bound to a code-behind class.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedView {
    /// Simple class name, never empty.
    pub class_name: String,
    /// Containing namespace; empty for the global namespace.
    pub namespace: String,
    pub root_type: TypeRef,
    pub document: MarkupDocument,
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedPartialClass {
    pub file_name: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_qualified() {
        let button = TypeRef::new("Avalonia.Controls", "Button");
        assert_eq!(
            button.qualified(TargetLanguage::CSharp),
            "global::Avalonia.Controls.Button"
        );
        assert_eq!(
            button.qualified(TargetLanguage::VisualBasic),
            "Global.Avalonia.Controls.Button"
        );
    }

    #[test]
    fn test_type_ref_without_namespace_is_bare() {
        let shell = TypeRef::new("", "BaseWindow");
        assert_eq!(shell.qualified(TargetLanguage::CSharp), "BaseWindow");
        assert_eq!(shell.qualified(TargetLanguage::VisualBasic), "BaseWindow");

        let generic = shell.with_type_arguments(vec![TypeRef::new("System", "String")]);
        assert_eq!(
            generic.qualified(TargetLanguage::CSharp),
            "BaseWindow<global::System.String>"
        );
    }

    #[test]
    fn test_type_ref_generic() {
        let list = TypeRef::new("App.Controls", "ItemList").with_type_arguments(vec![
            TypeRef::new("System", "String"),
            TypeRef::new("System", "Int32"),
        ]);
        assert_eq!(
            list.qualified(TargetLanguage::CSharp),
            "global::App.Controls.ItemList<global::System.String, global::System.Int32>"
        );
        assert_eq!(
            list.qualified(TargetLanguage::VisualBasic),
            "Global.App.Controls.ItemList(Of Global.System.String, Global.System.Int32)"
        );
    }

    #[test]
    fn test_field_modifier_directive() {
        assert_eq!(FieldModifier::from_directive("Public"), Some(FieldModifier::Public));
        assert_eq!(FieldModifier::from_directive("NotPublic"), Some(FieldModifier::Internal));
        assert_eq!(FieldModifier::from_directive("Friend"), Some(FieldModifier::Internal));
        assert_eq!(FieldModifier::from_directive("sealed"), None);
        assert_eq!(FieldModifier::default(), FieldModifier::Private);
    }

    #[test]
    fn test_field_modifier_keywords() {
        assert_eq!(FieldModifier::Internal.keyword(TargetLanguage::CSharp), "internal");
        assert_eq!(FieldModifier::Internal.keyword(TargetLanguage::VisualBasic), "Friend");
        assert!("bogus".parse::<FieldModifier>().is_err());
    }

    #[test]
    fn test_target_language_parse() {
        assert_eq!("CSharp".parse::<TargetLanguage>().unwrap(), TargetLanguage::CSharp);
        assert_eq!("VB".parse::<TargetLanguage>().unwrap(), TargetLanguage::VisualBasic);
        assert_eq!(TargetLanguage::VisualBasic.extension(), "vb");
        assert!(matches!(
            "fsharp".parse::<TargetLanguage>(),
            Err(ConfigError::UnknownLanguage { .. })
        ));
    }
}
