//! View, type, and name resolution for XAML view documents.
//!
//! This crate resolves:
//! - The code-behind class a document is bound to (`x:Class`)
//! - Element types (XML namespace + local name -> CLR type)
//! - Named elements and their field modifiers

mod names;
mod types;
mod views;

pub use names::NameResolver;
pub use types::{NamespaceScope, TypeResolver};
pub use views::ViewResolver;

use xname_core::{FieldModifier, ResolveError, ResolvedName, ResolvedView, TargetLanguage, XmlnsMap};

/// Resolve a document into a view and its names using default namespace mappings.
pub fn resolve(
    text: &str,
    language: TargetLanguage,
) -> Result<Option<(ResolvedView, Vec<ResolvedName>)>, ResolveError> {
    let types = TypeResolver::new(XmlnsMap::new());
    let Some(view) = ViewResolver::new(types.clone()).resolve_view(text)? else {
        return Ok(None);
    };
    let names = NameResolver::new(types, language, FieldModifier::default()).resolve_names(&view.document)?;
    Ok(Some((view, names)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_view_and_names() {
        let (view, names) = resolve(
            r#"<UserControl xmlns="https://github.com/avaloniaui"
                            xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml"
                            x:Class="App.Views.Card">
                 <TextBlock x:Name="title"/>
               </UserControl>"#,
            TargetLanguage::CSharp,
        )
        .unwrap()
        .unwrap();

        assert_eq!(view.class_name, "Card");
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].type_name, "global::Avalonia.Controls.TextBlock");
    }

    #[test]
    fn test_resolve_fragment() {
        let resolved = resolve(
            r#"<ResourceDictionary xmlns="https://github.com/avaloniaui"/>"#,
            TargetLanguage::CSharp,
        )
        .unwrap();
        assert!(resolved.is_none());
    }
}
