//! XML namespace to CLR namespace mapping.

use indexmap::IndexMap;

/// The Avalonia control namespace URI.
pub const AVALONIA_NAMESPACE: &str = "https://github.com/avaloniaui";

/// The WPF presentation namespace URI.
pub const WPF_PRESENTATION_NAMESPACE: &str =
    "http://schemas.microsoft.com/winfx/2006/xaml/presentation";

/// Avalonia types published under the control URI but living outside
/// `Avalonia.Controls`.
const AVALONIA_KNOWN_TYPES: &[(&str, &[&str])] = &[
    (
        "Avalonia.Controls.Primitives",
        &[
            "AccessText", "AdornerLayer", "ChromeOverlayLayer", "HeaderedContentControl",
            "HeaderedItemsControl", "HeaderedSelectingItemsControl", "LightDismissOverlayLayer",
            "OverlayLayer", "Popup", "PopupRoot", "RangeBase", "ScrollBar", "SelectingItemsControl",
            "TabStrip", "TabStripItem", "TemplatedControl", "Thumb", "ToggleButton", "Track",
            "UniformGrid", "VisualLayerManager",
        ],
    ),
    (
        "Avalonia.Controls.Shapes",
        &["Arc", "Ellipse", "Line", "Path", "Polygon", "Polyline", "Rectangle", "Sector", "Shape"],
    ),
    (
        "Avalonia.Controls.Presenters",
        &["ContentPresenter", "ItemsPresenter", "ScrollContentPresenter", "TextPresenter"],
    ),
    (
        "Avalonia.Controls.Documents",
        &["Bold", "Inline", "InlineUIContainer", "Italic", "LineBreak", "Run", "Span", "Underline"],
    ),
    ("Avalonia.Styling", &["ControlTheme", "Style", "Styles"]),
];

/// WPF types published under the presentation URI but living outside
/// `System.Windows.Controls`.
const WPF_KNOWN_TYPES: &[(&str, &[&str])] = &[
    (
        "System.Windows.Controls.Primitives",
        &[
            "Popup", "RepeatButton", "ScrollBar", "StatusBar", "StatusBarItem", "TabPanel", "Thumb",
            "ToggleButton", "Track", "UniformGrid",
        ],
    ),
    (
        "System.Windows.Shapes",
        &["Ellipse", "Line", "Path", "Polygon", "Polyline", "Rectangle"],
    ),
    (
        "System.Windows.Documents",
        &["Bold", "Hyperlink", "InlineUIContainer", "Italic", "LineBreak", "Run", "Span", "Underline"],
    ),
];

/// A map from XML namespace URIs to CLR namespaces.
///
/// A URI can publish types from several CLR namespaces. Each URI has a
/// default namespace plus a table of types that live elsewhere.
///
/// `using:` and `clr-namespace:` URIs never need an entry; they name their
/// CLR namespace directly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XmlnsMap {
    mappings: IndexMap<String, String>,
    /// URI -> local type name -> CLR namespace.
    types: IndexMap<String, IndexMap<String, String>>,
}

impl Default for XmlnsMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.insert(AVALONIA_NAMESPACE, "Avalonia.Controls");
        map.insert(WPF_PRESENTATION_NAMESPACE, "System.Windows.Controls");
        for (uri, table) in [
            (AVALONIA_NAMESPACE, AVALONIA_KNOWN_TYPES),
            (WPF_PRESENTATION_NAMESPACE, WPF_KNOWN_TYPES),
        ] {
            for (clr_namespace, names) in table {
                for name in *names {
                    map.insert_type(uri, name, clr_namespace);
                }
            }
        }
        map
    }
}

impl XmlnsMap {
    /// A map with the well-known UI namespaces registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A map with no registered URIs.
    pub fn empty() -> Self {
        Self {
            mappings: IndexMap::new(),
            types: IndexMap::new(),
        }
    }

    /// Map an XML namespace URI to a CLR namespace. Replaces any existing entry.
    pub fn insert(&mut self, uri: &str, clr_namespace: &str) {
        self.mappings
            .insert(uri.to_string(), clr_namespace.to_string());
    }

    /// Place one type published under `uri` in a specific CLR namespace.
    /// Takes precedence over the URI's default namespace.
    pub fn insert_type(&mut self, uri: &str, local_name: &str, clr_namespace: &str) {
        self.types
            .entry(uri.to_string())
            .or_default()
            .insert(local_name.to_string(), clr_namespace.to_string());
    }

    /// Resolve the CLR namespace of the type `local_name` published under `uri`.
    pub fn resolve_type(&self, uri: &str, local_name: &str) -> Option<String> {
        self.types
            .get(uri)
            .and_then(|table| table.get(local_name))
            .cloned()
            .or_else(|| self.resolve(uri))
    }

    /// Resolve a namespace URI to its default CLR namespace.
    pub fn resolve(&self, uri: &str) -> Option<String> {
        if let Some(ns) = uri.strip_prefix("using:") {
            return Some(ns.trim().to_string());
        }
        if let Some(rest) = uri.strip_prefix("clr-namespace:") {
            let ns = rest.split(';').next().unwrap_or_default();
            return Some(ns.trim().to_string());
        }
        self.mappings.get(uri).cloned()
    }

    /// Iterate over the registered URIs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Map a XAML intrinsic type (`x:String`, `x:Int32`, ...) to its CLR name.
pub fn intrinsic_type(local: &str) -> Option<(&'static str, &'static str)> {
    let name = match local {
        "Object" => "Object",
        "String" => "String",
        "Char" => "Char",
        "Boolean" => "Boolean",
        "Byte" => "Byte",
        "Int16" => "Int16",
        "Int32" => "Int32",
        "Int64" => "Int64",
        "Single" => "Single",
        "Double" => "Double",
        "Decimal" => "Decimal",
        "TimeSpan" => "TimeSpan",
        "Uri" => "Uri",
        _ => return None,
    };
    Some(("System", name))
}
