//! Markup tree types for parsed XAML documents.

/// The XAML 2006 language namespace that carries `x:Class`, `x:Name` and friends.
pub const XAML_2006_NAMESPACE: &str = "http://schemas.microsoft.com/winfx/2006/xaml";

/// A parsed markup document. Always has exactly one root element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkupDocument {
    pub root: MarkupElement,
}

/// An element name with an optional namespace prefix, e.g. `local:Card`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualifiedName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QualifiedName {
    pub fn new(prefix: Option<&str>, local: &str) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            local: local.to_string(),
        }
    }

    /// Split `prefix:local` at the first colon.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((prefix, local)) => Self::new(Some(prefix), local),
            None => Self::new(None, raw),
        }
    }

    /// Whether this attribute name declares an XML namespace.
    pub fn is_xmlns(&self) -> bool {
        match &self.prefix {
            Some(prefix) => prefix == "xmlns",
            None => self.local == "xmlns",
        }
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// An attribute with its entity-decoded value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: String,
    pub span: Span,
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkupNode {
    Element(MarkupElement),
    Text(String),
}

/// A markup element with its attributes and children in document order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkupElement {
    pub name: QualifiedName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<MarkupNode>,
    pub span: Span,
}

impl MarkupElement {
    /// Find an attribute by prefix and local name.
    pub fn attribute(&self, prefix: Option<&str>, local: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.prefix.as_deref() == prefix && a.name.local == local)
    }

    /// Namespace declarations on this element as `(prefix, uri)`; the default
    /// namespace has an empty prefix.
    pub fn namespace_declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().filter(|a| a.name.is_xmlns()).map(|a| {
            let prefix = match &a.name.prefix {
                Some(_) => a.name.local.as_str(),
                None => "",
            };
            (prefix, a.value.as_str())
        })
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &MarkupElement> {
        self.children.iter().filter_map(|c| match c {
            MarkupNode::Element(e) => Some(e),
            MarkupNode::Text(_) => None,
        })
    }

    /// Property elements such as `<Grid.RowDefinitions>` set a property on
    /// their parent instead of creating an object.
    pub fn is_property_element(&self) -> bool {
        self.name.local.contains('.')
    }

    /// Concatenated text content of this element's direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                MarkupNode::Text(t) => Some(t.as_str()),
                MarkupNode::Element(_) => None,
            })
            .collect()
    }
}

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}
