//! Namespace scoping and element type resolution.
//!
//! XML namespace declarations are lexically scoped: a declaration applies to
//! the element that carries it and to all of its descendants, unless a
//! descendant re-binds the same prefix.

use xname_core::{
    intrinsic_type, Attribute, MarkupElement, ResolveError, Span, TypeRef, XmlnsMap,
    XAML_2006_NAMESPACE,
};
use xname_parser::MAX_NESTING_DEPTH;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Stack of in-scope namespace declarations.
#[derive(Debug, Default)]
pub struct NamespaceScope {
    frames: Vec<Vec<(String, String)>>,
}

impl NamespaceScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter an element, bringing its declarations into scope.
    pub fn push(&mut self, element: &MarkupElement) {
        let frame = element
            .namespace_declarations()
            .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
            .collect();
        self.frames.push(frame);
    }

    /// Leave the innermost element.
    pub fn pop(&mut self) {
        self.frames.pop();
    }

    /// Look up the URI bound to `prefix`; the default namespace is `""`.
    pub fn lookup(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Find a XAML language directive (`x:Class`, `x:Name`, ...) on `element`,
    /// whatever prefix the document binds to the XAML namespace.
    pub fn directive<'e>(&self, element: &'e MarkupElement, local: &str) -> Option<&'e Attribute> {
        element.attributes.iter().find(|a| {
            a.name.local == local
                && a.name
                    .prefix
                    .as_deref()
                    .is_some_and(|p| self.lookup(p) == Some(XAML_2006_NAMESPACE))
        })
    }
}

/// Maps markup elements to CLR types.
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    xmlns: XmlnsMap,
}

impl TypeResolver {
    pub fn new(xmlns: XmlnsMap) -> Self {
        Self { xmlns }
    }

    /// Resolve the type an object element instantiates, including any
    /// `x:TypeArguments`. `scope` must already include `element`'s frame.
    pub fn resolve_element(
        &self,
        element: &MarkupElement,
        scope: &NamespaceScope,
    ) -> Result<TypeRef, ResolveError> {
        let base = self.resolve_name(
            element.name.prefix.as_deref(),
            &element.name.local,
            scope,
            element.span,
        )?;

        match scope.directive(element, "TypeArguments") {
            Some(attr) => {
                let args = self.parse_type_arguments(&attr.value, scope, attr.span, 1)?;
                Ok(base.with_type_arguments(args))
            }
            None => Ok(base),
        }
    }

    fn resolve_name(
        &self,
        prefix: Option<&str>,
        local: &str,
        scope: &NamespaceScope,
        span: Span,
    ) -> Result<TypeRef, ResolveError> {
        let prefix = prefix.unwrap_or_default();
        let uri = scope
            .lookup(prefix)
            .ok_or_else(|| ResolveError::UndeclaredPrefix {
                prefix: prefix.to_string(),
                span,
            })?;

        let element = if prefix.is_empty() {
            local.to_string()
        } else {
            format!("{}:{}", prefix, local)
        };

        if uri == XAML_2006_NAMESPACE {
            return intrinsic_type(local)
                .map(|(ns, name)| TypeRef::new(ns, name))
                .ok_or(ResolveError::UnmappedNamespace {
                    uri: uri.to_string(),
                    element,
                    span,
                });
        }

        match self.xmlns.resolve_type(uri, local) {
            Some(ns) => Ok(TypeRef::new(ns, local)),
            None => Err(ResolveError::UnmappedNamespace {
                uri: uri.to_string(),
                element,
                span,
            }),
        }
    }

    /// Parse `x:String, local:Pair(x:String, x:Int32)` into type references.
    fn parse_type_arguments(
        &self,
        value: &str,
        scope: &NamespaceScope,
        span: Span,
        depth: usize,
    ) -> Result<Vec<TypeRef>, ResolveError> {
        let invalid = |reason: &str| ResolveError::InvalidTypeArguments {
            value: value.to_string(),
            reason: reason.to_string(),
            span,
        };
        if depth > MAX_NESTING_DEPTH {
            return Err(invalid("type arguments nested too deeply"));
        }

        let mut args = Vec::new();
        for part in split_top_level(value).ok_or_else(|| invalid("unbalanced parentheses"))? {
            let part = part.trim();
            if part.is_empty() {
                return Err(invalid("empty type argument"));
            }

            let (head, nested) = match part.find('(') {
                Some(open) if part.ends_with(')') => (&part[..open], Some(&part[open + 1..part.len() - 1])),
                Some(_) => return Err(invalid("text after closing parenthesis")),
                None => (part, None),
            };

            let (prefix, local) = match head.trim().split_once(':') {
                Some((p, l)) => (Some(p), l),
                None => (None, head.trim()),
            };
            if local.is_empty() {
                return Err(invalid("missing type name"));
            }

            let mut arg = self.resolve_name(prefix, local, scope, span)?;
            if let Some(inner) = nested {
                arg = arg.with_type_arguments(self.parse_type_arguments(inner, scope, span, depth + 1)?);
            }
            args.push(arg);
        }
        Ok(args)
    }
}

/// Split on commas that are not nested inside parentheses.
fn split_top_level(value: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&value[start..]);
    Some(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xname_core::TargetLanguage;

    fn root_of(source: &str) -> MarkupElement {
        xname_parser::parse(source).unwrap().root
    }

    #[test]
    fn test_scope_shadowing() {
        let root = root_of(
            r#"<a:Outer xmlns:a="using:First"><a:Inner xmlns:a="using:Second"/></a:Outer>"#,
        );
        let inner = root.child_elements().next().unwrap();

        let mut scope = NamespaceScope::new();
        scope.push(&root);
        assert_eq!(scope.lookup("a"), Some("using:First"));
        scope.push(inner);
        assert_eq!(scope.lookup("a"), Some("using:Second"));
        scope.pop();
        assert_eq!(scope.lookup("a"), Some("using:First"));
        assert_eq!(scope.lookup("missing"), None);
        assert_eq!(scope.lookup("xml"), Some(XML_NAMESPACE));
    }

    #[test]
    fn test_directive_any_prefix() {
        let root = root_of(
            r#"<Window xmlns="https://github.com/avaloniaui" xmlns:xaml="http://schemas.microsoft.com/winfx/2006/xaml" xaml:Class="A.B" x:Class="ignored"/>"#,
        );
        let mut scope = NamespaceScope::new();
        scope.push(&root);
        assert_eq!(scope.directive(&root, "Class").unwrap().value, "A.B");
    }

    #[test]
    fn test_resolve_default_namespace() {
        let root = root_of(r#"<Window xmlns="https://github.com/avaloniaui"/>"#);
        let mut scope = NamespaceScope::new();
        scope.push(&root);

        let ty = TypeResolver::default().resolve_element(&root, &scope).unwrap();
        assert_eq!(ty, TypeRef::new("Avalonia.Controls", "Window"));
    }

    #[test]
    fn test_resolve_generic() {
        let root = root_of(
            r#"<local:Pair xmlns:local="clr-namespace:App.Controls;assembly=App" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml" x:TypeArguments="x:String, local:Box(x:Int32)"/>"#,
        );
        let mut scope = NamespaceScope::new();
        scope.push(&root);

        let ty = TypeResolver::default().resolve_element(&root, &scope).unwrap();
        assert_eq!(
            ty.qualified(TargetLanguage::CSharp),
            "global::App.Controls.Pair<global::System.String, global::App.Controls.Box<global::System.Int32>>"
        );
    }

    #[test]
    fn test_invalid_type_arguments() {
        let root = root_of(
            r#"<local:Pair xmlns:local="using:App" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml" x:TypeArguments="x:String, (x:Int32"/>"#,
        );
        let mut scope = NamespaceScope::new();
        scope.push(&root);

        let err = TypeResolver::default().resolve_element(&root, &scope).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidTypeArguments { .. }));
    }

    #[test]
    fn test_deeply_nested_type_arguments() {
        let depth = 5_000;
        let value = format!("{}x:Int32{}", "local:Box(".repeat(depth), ")".repeat(depth));
        let root = root_of(&format!(
            r#"<local:Box xmlns:local="using:App" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml" x:TypeArguments="{}"/>"#,
            value
        ));
        let mut scope = NamespaceScope::new();
        scope.push(&root);

        let err = TypeResolver::default().resolve_element(&root, &scope).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::InvalidTypeArguments { reason, .. } if reason == "type arguments nested too deeply"
        ));
    }

    #[test]
    fn test_undeclared_prefix() {
        let root = root_of(r#"<local:Card/>"#);
        let mut scope = NamespaceScope::new();
        scope.push(&root);

        let err = TypeResolver::default().resolve_element(&root, &scope).unwrap_err();
        assert!(matches!(err, ResolveError::UndeclaredPrefix { prefix, .. } if prefix == "local"));
    }

    #[test]
    fn test_unmapped_namespace() {
        let root = root_of(r#"<Card xmlns="urn:nowhere"/>"#);
        let mut scope = NamespaceScope::new();
        scope.push(&root);

        let err = TypeResolver::default().resolve_element(&root, &scope).unwrap_err();
        assert!(matches!(err, ResolveError::UnmappedNamespace { uri, .. } if uri == "urn:nowhere"));

        let mut xmlns = XmlnsMap::new();
        xmlns.insert("urn:nowhere", "Somewhere");
        let ty = TypeResolver::new(xmlns).resolve_element(&root, &scope).unwrap();
        assert_eq!(ty.full_name(), "Somewhere.Card");
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(split_top_level("a, b(c, d), e"), Some(vec!["a", " b(c, d)", " e"]));
        assert_eq!(split_top_level("a)"), None);
    }
}
