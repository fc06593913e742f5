//! Generator configuration.
//!
//! Options can be built in code, deserialized from JSON, or read from the
//! string properties a build host passes along (`NameGeneratorBehavior` and
//! friends). Every enum-valued option is spelled as text in both formats.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;
use xname_codegen::{AccessorStrategy, CodegenOptions};
use xname_core::{ConfigError, FieldModifier, TargetLanguage, XmlnsMap};

pub const BEHAVIOR_PROPERTY: &str = "NameGeneratorBehavior";
pub const DEFAULT_FIELD_MODIFIER_PROPERTY: &str = "NameGeneratorDefaultFieldModifier";
pub const FILTER_BY_PATH_PROPERTY: &str = "NameGeneratorFilterByPath";
pub const FILTER_BY_NAMESPACE_PROPERTY: &str = "NameGeneratorFilterByNamespace";
pub const NAMING_STRATEGY_PROPERTY: &str = "NameGeneratorViewFileNamingStrategy";
pub const LANGUAGE_PROPERTY: &str = "NameGeneratorLanguage";
pub const ADDITIONAL_NAMESPACES_PROPERTY: &str = "NameGeneratorAdditionalNamespaces";

/// Prefix build hosts put in front of forwarded MSBuild properties.
const BUILD_PROPERTY_PREFIX: &str = "build_property.";

/// How the generated file for a view is named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NamingStrategy {
    /// `{ClassName}.g.{ext}`
    #[default]
    ByClassName,
    /// `{Namespace}.{ClassName}.g.{ext}`
    ByNamespaceAndClassName,
}

impl NamingStrategy {
    /// File name for a view. A view in the global namespace always uses the class name alone.
    pub fn file_name(self, class_name: &str, namespace: &str, language: TargetLanguage) -> String {
        let ext = language.extension();
        match self {
            Self::ByNamespaceAndClassName if !namespace.is_empty() => {
                format!("{}.{}.g.{}", namespace, class_name, ext)
            }
            _ => format!("{}.g.{}", class_name, ext),
        }
    }
}

impl FromStr for NamingStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ClassName" => Ok(Self::ByClassName),
            "NamespaceAndClassName" => Ok(Self::ByNamespaceAndClassName),
            other => Err(ConfigError::UnknownNamingStrategy {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByClassName => write!(f, "ClassName"),
            Self::ByNamespaceAndClassName => write!(f, "NamespaceAndClassName"),
        }
    }
}

/// Full generator configuration. Immutable once a pipeline is built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratorOptions {
    #[serde(with = "as_string")]
    pub behavior: AccessorStrategy,
    #[serde(with = "as_string")]
    pub default_field_modifier: FieldModifier,
    /// Path globs; a document must match at least one.
    pub filter_by_path: Vec<String>,
    /// Namespace globs; a view's namespace must match at least one.
    pub filter_by_namespace: Vec<String>,
    #[serde(with = "as_string")]
    pub naming_strategy: NamingStrategy,
    #[serde(with = "as_string")]
    pub language: TargetLanguage,
    /// Imported after the built-in namespaces.
    pub additional_namespaces: Vec<String>,
    /// Extra XML namespace URI to CLR namespace mappings.
    pub namespace_mappings: IndexMap<String, String>,
    /// Per-type placements for URIs that span several CLR namespaces:
    /// URI -> local type name -> CLR namespace.
    pub type_mappings: IndexMap<String, IndexMap<String, String>>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            behavior: AccessorStrategy::default(),
            default_field_modifier: FieldModifier::default(),
            filter_by_path: vec!["**".to_string()],
            filter_by_namespace: vec!["**".to_string()],
            naming_strategy: NamingStrategy::default(),
            language: TargetLanguage::default(),
            additional_namespaces: Vec::new(),
            namespace_mappings: IndexMap::new(),
            type_mappings: IndexMap::new(),
        }
    }
}

impl GeneratorOptions {
    /// Deserialize options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidOptions {
            reason: e.to_string(),
        })
    }

    /// Read options from host build properties.
    ///
    /// Keys may carry a `build_property.` prefix. Unknown keys are ignored
    /// and empty values leave the default in place.
    pub fn from_properties<I, K, V>(properties: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();

        for (key, value) in properties {
            let key = key.as_ref();
            let key = key.strip_prefix(BUILD_PROPERTY_PREFIX).unwrap_or(key);
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }

            match key {
                BEHAVIOR_PROPERTY => options.behavior = value.parse()?,
                DEFAULT_FIELD_MODIFIER_PROPERTY => options.default_field_modifier = value.parse()?,
                FILTER_BY_PATH_PROPERTY => options.filter_by_path = split_list(value),
                FILTER_BY_NAMESPACE_PROPERTY => options.filter_by_namespace = split_list(value),
                NAMING_STRATEGY_PROPERTY => options.naming_strategy = value.parse()?,
                LANGUAGE_PROPERTY => options.language = value.parse()?,
                ADDITIONAL_NAMESPACES_PROPERTY => options.additional_namespaces = split_list(value),
                _ => trace!(key, "ignoring unrelated build property"),
            }
        }

        Ok(options)
    }

    /// The options the code generators need.
    pub fn codegen_options(&self) -> CodegenOptions {
        CodegenOptions {
            language: self.language,
            additional_namespaces: self.additional_namespaces.clone(),
        }
    }

    /// The default XML namespace map extended with `namespace_mappings`
    /// and `type_mappings`.
    pub fn xmlns_map(&self) -> XmlnsMap {
        let mut map = XmlnsMap::new();
        for (uri, clr_namespace) in &self.namespace_mappings {
            map.insert(uri, clr_namespace);
        }
        for (uri, types) in &self.type_mappings {
            for (local_name, clr_namespace) in types {
                map.insert_type(uri, local_name, clr_namespace);
            }
        }
        map
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Serialize through `Display`, deserialize through `FromStr`.
mod as_string {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GeneratorOptions::default();
        assert_eq!(options.behavior, AccessorStrategy::OnlyProperties);
        assert_eq!(options.default_field_modifier, FieldModifier::Private);
        assert_eq!(options.filter_by_path, ["**"]);
        assert_eq!(options.filter_by_namespace, ["**"]);
        assert_eq!(options.naming_strategy, NamingStrategy::ByClassName);
        assert_eq!(options.language, TargetLanguage::CSharp);
    }

    #[test]
    fn test_file_names() {
        let cs = TargetLanguage::CSharp;
        assert_eq!(NamingStrategy::ByClassName.file_name("MainWindow", "App.Views", cs), "MainWindow.g.cs");
        assert_eq!(
            NamingStrategy::ByNamespaceAndClassName.file_name("MainWindow", "App.Views", cs),
            "App.Views.MainWindow.g.cs"
        );
        assert_eq!(
            NamingStrategy::ByNamespaceAndClassName.file_name("Shell", "", TargetLanguage::VisualBasic),
            "Shell.g.vb"
        );
    }

    #[test]
    fn test_unknown_naming_strategy() {
        assert_eq!(
            "ByFolder".parse::<NamingStrategy>(),
            Err(ConfigError::UnknownNamingStrategy {
                value: "ByFolder".to_string()
            })
        );
    }

    #[test]
    fn test_from_properties() {
        let options = GeneratorOptions::from_properties([
            ("build_property.NameGeneratorBehavior", "InitializeComponent"),
            ("NameGeneratorDefaultFieldModifier", "Internal"),
            ("NameGeneratorFilterByPath", "Views/**; Controls/*.axaml"),
            ("NameGeneratorFilterByNamespace", ""),
            ("NameGeneratorViewFileNamingStrategy", "NamespaceAndClassName"),
            ("NameGeneratorLanguage", "VisualBasic"),
            ("NameGeneratorAdditionalNamespaces", "App.Models;App.Services"),
            ("RootNamespace", "App"),
        ])
        .unwrap();

        assert_eq!(options.behavior, AccessorStrategy::InitializeComponent);
        assert_eq!(options.default_field_modifier, FieldModifier::Internal);
        assert_eq!(options.filter_by_path, ["Views/**", "Controls/*.axaml"]);
        assert_eq!(options.filter_by_namespace, ["**"]);
        assert_eq!(options.naming_strategy, NamingStrategy::ByNamespaceAndClassName);
        assert_eq!(options.language, TargetLanguage::VisualBasic);
        assert_eq!(options.additional_namespaces, ["App.Models", "App.Services"]);
    }

    #[test]
    fn test_from_properties_rejects_unknown_values() {
        let err = GeneratorOptions::from_properties([(NAMING_STRATEGY_PROPERTY, "Flat")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNamingStrategy { .. }));

        let err = GeneratorOptions::from_properties([(BEHAVIOR_PROPERTY, "Fields")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBehavior { .. }));

        let err = GeneratorOptions::from_properties([(DEFAULT_FIELD_MODIFIER_PROPERTY, "sealed")]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFieldModifier { .. }));
    }

    #[test]
    fn test_from_json() {
        let options = GeneratorOptions::from_json(
            r#"{
                "behavior": "InitializeComponent",
                "namingStrategy": "NamespaceAndClassName",
                "filterByNamespace": ["App.*"],
                "namespaceMappings": { "urn:controls": "App.Controls" }
            }"#,
        )
        .unwrap();

        assert_eq!(options.behavior, AccessorStrategy::InitializeComponent);
        assert_eq!(options.naming_strategy, NamingStrategy::ByNamespaceAndClassName);
        assert_eq!(options.filter_by_namespace, ["App.*"]);
        assert_eq!(options.filter_by_path, ["**"]);
        assert_eq!(options.xmlns_map().resolve("urn:controls").as_deref(), Some("App.Controls"));
    }

    #[test]
    fn test_type_mappings_from_json() {
        let options = GeneratorOptions::from_json(
            r#"{
                "namespaceMappings": { "urn:gauges": "Gauges.Controls" },
                "typeMappings": {
                    "urn:gauges": { "Needle": "Gauges.Controls.Parts" },
                    "https://github.com/avaloniaui": { "ToggleButton": "App.Overrides" }
                }
            }"#,
        )
        .unwrap();

        let map = options.xmlns_map();
        assert_eq!(map.resolve_type("urn:gauges", "Needle").as_deref(), Some("Gauges.Controls.Parts"));
        assert_eq!(map.resolve_type("urn:gauges", "Dial").as_deref(), Some("Gauges.Controls"));
        assert_eq!(
            map.resolve_type("https://github.com/avaloniaui", "ToggleButton").as_deref(),
            Some("App.Overrides")
        );
    }

    #[test]
    fn test_from_json_errors() {
        for json in [
            r#"{ "namingStrategy": "Flat" }"#,
            r#"{ "language": "Fortran" }"#,
            r#"{ "unknown": true }"#,
            "not json",
        ] {
            assert!(
                matches!(GeneratorOptions::from_json(json), Err(ConfigError::InvalidOptions { .. })),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn test_json_uses_text_for_enums() {
        let json = serde_json::to_value(GeneratorOptions::default()).unwrap();
        assert_eq!(json["behavior"], "OnlyProperties");
        assert_eq!(json["defaultFieldModifier"], "private");
        assert_eq!(json["namingStrategy"], "ClassName");
        assert_eq!(json["language"], "CSharp");

        let back: GeneratorOptions = serde_json::from_value(json).unwrap();
        assert_eq!(back, GeneratorOptions::default());
    }
}
