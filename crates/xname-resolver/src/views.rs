//! View resolution: binding a document's root element to its code-behind class.

use tracing::{debug, trace};
use xname_core::{ResolveError, ResolvedView, TypeRef};

use crate::types::{NamespaceScope, TypeResolver};

/// Parses documents and reads their `x:Class` identity.
#[derive(Debug, Clone, Default)]
pub struct ViewResolver {
    types: TypeResolver,
}

impl ViewResolver {
    pub fn new(types: TypeResolver) -> Self {
        Self { types }
    }

    /// Resolve a document into a view.
    ///
    /// Returns `Ok(None)` when the root element declares no `x:Class`, which
    /// means the document is not a view. Malformed markup is an error.
    ///
    /// A root whose type cannot be resolved (an unmapped namespace or an
    /// undeclared prefix) keeps its bare local name; only named descendants
    /// must resolve.
    pub fn resolve_view(&self, text: &str) -> Result<Option<ResolvedView>, ResolveError> {
        let document = xname_parser::parse(text)?;

        let mut scope = NamespaceScope::new();
        scope.push(&document.root);

        let Some(class) = scope.directive(&document.root, "Class") else {
            trace!(root = %document.root.name, "no x:Class on root element");
            return Ok(None);
        };

        let full_name = class.value.trim();
        let (namespace, class_name) = match full_name.rsplit_once('.') {
            Some((namespace, class_name)) => (namespace.trim(), class_name.trim()),
            None => ("", full_name),
        };
        if class_name.is_empty() {
            trace!(class = full_name, "blank class name");
            return Ok(None);
        }

        let root_type = self
            .types
            .resolve_element(&document.root, &scope)
            .unwrap_or_else(|err| {
                debug!(error = %err, root = %document.root.name, "root type unresolved, using element name");
                TypeRef::new("", document.root.name.local.clone())
            });
        let (namespace, class_name) = (namespace.to_string(), class_name.to_string());

        Ok(Some(ResolvedView {
            class_name,
            namespace,
            root_type,
            document,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;
    use xname_core::{ParseError, TypeRef};

    #[test]
    fn test_resolve_view() {
        let view = ViewResolver::default()
            .resolve_view(
                r#"<Window xmlns="https://github.com/avaloniaui"
                           xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml"
                           x:Class="App.Views.MainWindow"/>"#,
            )
            .unwrap()
            .unwrap();

        assert_eq!(view.class_name, "MainWindow");
        assert_eq!(view.namespace, "App.Views");
        assert_eq!(view.root_type, TypeRef::new("Avalonia.Controls", "Window"));
        assert_eq!(view.document.root.name.local, "Window");
    }

    #[test]
    fn test_no_class_is_not_a_view() {
        let view = ViewResolver::default()
            .resolve_view(r#"<Styles xmlns="https://github.com/avaloniaui"><Style/></Styles>"#)
            .unwrap();
        assert!(view.is_none());
    }

    #[test]
    fn test_blank_class_is_not_a_view() {
        let resolver = ViewResolver::default();
        for class in ["", "   ", "App.Views."] {
            let source = format!(
                r#"<Window xmlns="https://github.com/avaloniaui" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml" x:Class="{}"/>"#,
                class
            );
            assert!(resolver.resolve_view(&source).unwrap().is_none(), "class {class:?}");
        }
    }

    #[test]
    fn test_global_namespace_class() {
        let view = ViewResolver::default()
            .resolve_view(
                r#"<Window xmlns="https://github.com/avaloniaui" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml" x:Class="Shell"/>"#,
            )
            .unwrap()
            .unwrap();
        assert_eq!(view.class_name, "Shell");
        assert_eq!(view.namespace, "");
    }

    #[test]
    fn test_class_attribute_without_xaml_namespace_ignored() {
        let view = ViewResolver::default()
            .resolve_view(r#"<Window xmlns="https://github.com/avaloniaui" Class="App.Views.MainWindow"/>"#)
            .unwrap();
        assert!(view.is_none());
    }

    #[test]
    fn test_unmapped_root_keeps_local_name() {
        let view = ViewResolver::default()
            .resolve_view(
                r#"<lib:BaseWindow xmlns="https://github.com/avaloniaui"
                                   xmlns:lib="http://schemas.acme.com/controls"
                                   xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml"
                                   x:Class="App.Views.Shell">
                     <Button x:Name="ok"/>
                   </lib:BaseWindow>"#,
            )
            .unwrap()
            .unwrap();

        assert_eq!(view.class_name, "Shell");
        assert_eq!(view.namespace, "App.Views");
        assert_eq!(view.root_type, TypeRef::new("", "BaseWindow"));
    }

    #[test]
    fn test_undeclared_root_prefix_keeps_local_name() {
        let view = ViewResolver::default()
            .resolve_view(
                r#"<ui:Shell xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml" x:Class="App.Shell"/>"#,
            )
            .unwrap()
            .unwrap();
        assert_eq!(view.root_type, TypeRef::new("", "Shell"));
    }

    #[test]
    fn test_malformed_is_error() {
        let err = ViewResolver::default()
            .resolve_view("<Window><Button></Window>")
            .unwrap_err();
        assert!(matches!(err, ResolveError::Parse(ParseError::MismatchedTag { .. })));
    }
}
