//! Named element extraction.
//!
//! Walks the element tree in document order and collects every object
//! element that declares `x:Name` or `Name`. Property elements are not
//! objects, but their contents are walked like any other children.

use indexmap::IndexMap;
use tracing::trace;
use xname_core::{
    FieldModifier, MarkupDocument, MarkupElement, ResolveError, ResolvedName, TargetLanguage,
};

use crate::types::{NamespaceScope, TypeResolver};

/// Resolves the named elements of a document.
#[derive(Debug, Clone)]
pub struct NameResolver {
    types: TypeResolver,
    language: TargetLanguage,
    default_modifier: FieldModifier,
}

impl NameResolver {
    pub fn new(types: TypeResolver, language: TargetLanguage, default_modifier: FieldModifier) -> Self {
        Self {
            types,
            language,
            default_modifier,
        }
    }

    /// Collect the named elements of `document` in pre-order.
    ///
    /// A name declared twice is an error: both accessors would end up as
    /// members with the same identifier.
    pub fn resolve_names(&self, document: &MarkupDocument) -> Result<Vec<ResolvedName>, ResolveError> {
        let mut walker = NameWalker {
            resolver: self,
            scope: NamespaceScope::new(),
            seen: IndexMap::new(),
        };
        walker.visit(&document.root)?;
        Ok(walker.seen.into_values().map(|(name, _)| name).collect())
    }

    fn field_modifier(&self, element: &MarkupElement, scope: &NamespaceScope) -> FieldModifier {
        scope
            .directive(element, "FieldModifier")
            .and_then(|attr| FieldModifier::from_directive(&attr.value))
            .unwrap_or(self.default_modifier)
    }
}

struct NameWalker<'r> {
    resolver: &'r NameResolver,
    scope: NamespaceScope,
    /// Names in discovery order, with the line they were declared on.
    seen: IndexMap<String, (ResolvedName, u32)>,
}

impl NameWalker<'_> {
    fn visit(&mut self, element: &MarkupElement) -> Result<(), ResolveError> {
        self.scope.push(element);
        let result = self.visit_in_scope(element);
        self.scope.pop();
        result
    }

    fn visit_in_scope(&mut self, element: &MarkupElement) -> Result<(), ResolveError> {
        if !element.is_property_element() {
            if let Some(name) = self.declared_name(element) {
                self.record(element, name)?;
            }
        }

        for child in element.child_elements() {
            self.visit(child)?;
        }
        Ok(())
    }

    fn declared_name<'e>(&self, element: &'e MarkupElement) -> Option<&'e str> {
        let attr = self
            .scope
            .directive(element, "Name")
            .or_else(|| element.attribute(None, "Name"))?;
        let name = attr.value.trim();
        // `{Binding ...}` and other markup extensions are not static identifiers.
        if name.is_empty() || name.starts_with('{') {
            None
        } else {
            Some(name)
        }
    }

    fn record(&mut self, element: &MarkupElement, name: &str) -> Result<(), ResolveError> {
        if let Some((_, first_line)) = self.seen.get(name) {
            return Err(ResolveError::DuplicateName {
                name: name.to_string(),
                first_line: *first_line,
                span: element.span,
            });
        }

        let resolver = self.resolver;
        let type_ref = resolver.types.resolve_element(element, &self.scope)?;
        let resolved = ResolvedName::new(
            type_ref.qualified(resolver.language),
            name,
            resolver.field_modifier(element, &self.scope),
        );
        trace!(identifier = name, type_name = %resolved.type_name, line = element.span.line, "named element");

        self.seen.insert(name.to_string(), (resolved, element.span.line));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const HEADER: &str = r#"xmlns="https://github.com/avaloniaui" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml""#;

    fn names_of(body: &str) -> Result<Vec<ResolvedName>, ResolveError> {
        names_with(body, TargetLanguage::CSharp)
    }

    fn names_with(body: &str, language: TargetLanguage) -> Result<Vec<ResolvedName>, ResolveError> {
        let source = format!("<UserControl {}>{}</UserControl>", HEADER, body);
        let doc = xname_parser::parse(&source).unwrap();
        NameResolver::new(TypeResolver::default(), language, FieldModifier::Private).resolve_names(&doc)
    }

    #[test]
    fn test_names_in_document_order() {
        let names = names_of(
            r#"<StackPanel>
                 <Button x:Name="submitBtn"/>
                 <TextBox Name="nameField"/>
               </StackPanel>"#,
        )
        .unwrap();

        assert_eq!(
            names,
            vec![
                ResolvedName::new("global::Avalonia.Controls.Button", "submitBtn", FieldModifier::Private),
                ResolvedName::new("global::Avalonia.Controls.TextBox", "nameField", FieldModifier::Private),
            ]
        );
    }

    #[test]
    fn test_unnamed_parent_children_visited() {
        let names = names_of(
            r#"<Grid><Border><StackPanel><Button Name="deep"/></StackPanel></Border></Grid>"#,
        )
        .unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].name, "deep");
    }

    #[test]
    fn test_pre_order_parent_before_child() {
        let names = names_of(r#"<Border Name="outer"><Button Name="inner"/></Border><Label Name="after"/>"#)
            .unwrap();
        let order: Vec<_> = names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(order, vec!["outer", "inner", "after"]);
    }

    #[test]
    fn test_property_elements_and_templates() {
        let names = names_of(
            r#"<Button Name="host">
                 <Button.Content>
                   <TextBlock Name="caption"/>
                 </Button.Content>
               </Button>
               <ItemsControl>
                 <ItemsControl.ItemTemplate>
                   <DataTemplate>
                     <TextBlock x:Name="itemText"/>
                   </DataTemplate>
                 </ItemsControl.ItemTemplate>
               </ItemsControl>"#,
        )
        .unwrap();
        let order: Vec<_> = names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(order, vec!["host", "caption", "itemText"]);
    }

    #[test]
    fn test_property_element_name_attribute_ignored() {
        let names = names_of(r#"<Button><Button.Tag Name="notAnObject"/></Button>"#).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_default_modifier_is_private() {
        let names = names_of(r#"<Button Name="plain"/>"#).unwrap();
        assert_eq!(names[0].field_modifier, FieldModifier::Private);
    }

    #[test]
    fn test_field_modifier_directive() {
        let names = names_of(
            r#"<Button Name="a" x:FieldModifier="Public"/>
               <Button Name="b" x:FieldModifier="notpublic"/>
               <Button Name="c" x:FieldModifier="protected"/>
               <Button Name="d" x:FieldModifier="weird"/>"#,
        )
        .unwrap();
        let modifiers: Vec<_> = names.iter().map(|n| n.field_modifier).collect();
        assert_eq!(
            modifiers,
            vec![
                FieldModifier::Public,
                FieldModifier::Internal,
                FieldModifier::Protected,
                FieldModifier::Private,
            ]
        );
    }

    #[test]
    fn test_custom_default_modifier() {
        let doc = xname_parser::parse(&format!("<UserControl {}><Button Name=\"a\"/></UserControl>", HEADER)).unwrap();
        let names = NameResolver::new(TypeResolver::default(), TargetLanguage::CSharp, FieldModifier::Internal)
            .resolve_names(&doc)
            .unwrap();
        assert_eq!(names[0].field_modifier, FieldModifier::Internal);
    }

    #[test]
    fn test_custom_namespace_and_generic() {
        let names = names_of(
            r#"<local:ItemList xmlns:local="using:App.Controls" x:TypeArguments="x:String" x:Name="items"/>"#,
        )
        .unwrap();
        assert_eq!(
            names[0].type_name,
            "global::App.Controls.ItemList<global::System.String>"
        );
    }

    #[test]
    fn test_controls_outside_default_namespace() {
        let names = names_of(
            r#"<ToggleButton x:Name="toggle"/>
               <Rectangle x:Name="rect"/>
               <ScrollBar x:Name="bar"/>
               <ContentPresenter x:Name="presenter"/>"#,
        )
        .unwrap();
        let types: Vec<_> = names.iter().map(|n| n.type_name.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "global::Avalonia.Controls.Primitives.ToggleButton",
                "global::Avalonia.Controls.Shapes.Rectangle",
                "global::Avalonia.Controls.Primitives.ScrollBar",
                "global::Avalonia.Controls.Presenters.ContentPresenter",
            ]
        );
    }

    #[test]
    fn test_visual_basic_type_names() {
        let names = names_with(r#"<Button Name="ok"/>"#, TargetLanguage::VisualBasic).unwrap();
        assert_eq!(names[0].type_name, "Global.Avalonia.Controls.Button");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = names_of("<Button Name=\"twin\"/>\n<TextBox x:Name=\"twin\"/>").unwrap_err();
        match err {
            ResolveError::DuplicateName { name, first_line, span } => {
                assert_eq!(name, "twin");
                assert_eq!(first_line, 1);
                assert_eq!(span.line, 2);
            }
            other => panic!("Expected duplicate name, got {other:?}"),
        }
    }

    #[test]
    fn test_binding_name_skipped() {
        let names = names_of(r#"<Button Name="{Binding Title}"/><Button Name="  "/>"#).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_unnamed_unknown_elements_do_not_fail() {
        let names = names_of(r#"<Grid><mystery:Thing xmlns:mystery="urn:unknown"/></Grid>"#).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_named_unknown_element_fails() {
        let err = names_of(r#"<mystery:Thing xmlns:mystery="urn:unknown" Name="x"/>"#).unwrap_err();
        assert!(matches!(err, ResolveError::UnmappedNamespace { .. }));
    }
}
