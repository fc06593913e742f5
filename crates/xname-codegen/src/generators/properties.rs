//! Property accessor generator.
//!
//! Every named element becomes a read-only property that performs the
//! name-scope lookup on each access. Nothing has to be called from the
//! constructor, and a missing element yields null at run time.

use super::templates::TemplateEngine;
use super::{render_file, CodeGenerator, CodegenOptions};
use crate::error::Result;
use serde::Serialize;
use xname_core::{ResolvedName, TargetLanguage, TypeRef};

const CSHARP_PROPERTIES: &str = r#"partial class {{class_name}}
{
{{members}}
}
"#;

const VISUAL_BASIC_PROPERTIES: &str = r#"Partial Class {{class_name}}
{{members}}
End Class
"#;

const IMPORTS: &[&str] = &["Avalonia.Controls"];

#[derive(Serialize)]
struct BodyData<'a> {
    class_name: &'a str,
    members: String,
}

/// Generates expression-bodied lookup properties.
pub struct OnlyPropertiesGenerator {
    engine: TemplateEngine<'static>,
    options: CodegenOptions,
}

impl OnlyPropertiesGenerator {
    pub fn new(options: CodegenOptions) -> Result<Self> {
        let mut engine = TemplateEngine::with_file_templates()?;
        engine.register_template("cs_properties", CSHARP_PROPERTIES)?;
        engine.register_template("vb_properties", VISUAL_BASIC_PROPERTIES)?;
        Ok(Self { engine, options })
    }

    fn member(&self, name: &ResolvedName) -> String {
        let modifier = name.field_modifier.keyword(self.options.language);
        let (ty, id) = (&name.type_name, &name.name);
        match self.options.language {
            TargetLanguage::CSharp => format!(
                "    {} {} {} => this.FindNameScope()?.Find<{}>(\"{}\");",
                modifier, ty, id, ty, id
            ),
            TargetLanguage::VisualBasic => [
                format!("    {} ReadOnly Property {} As {}", modifier, id, ty),
                "        Get".to_string(),
                format!("            Return Me.FindNameScope()?.Find(Of {})(\"{}\")", ty, id),
                "        End Get".to_string(),
                "    End Property".to_string(),
            ]
            .join("\n"),
        }
    }
}

impl CodeGenerator for OnlyPropertiesGenerator {
    fn strategy_name(&self) -> &'static str {
        "OnlyProperties"
    }

    fn generate_code(
        &self,
        class_name: &str,
        namespace: &str,
        root_type: &TypeRef,
        names: &[ResolvedName],
    ) -> Result<String> {
        let members = names
            .iter()
            .map(|name| self.member(name))
            .collect::<Vec<_>>()
            .join("\n");

        let template = match self.options.language {
            TargetLanguage::CSharp => "cs_properties",
            TargetLanguage::VisualBasic => "vb_properties",
        };
        let body = self.engine.render(template, &BodyData { class_name, members })?;

        render_file(&self.engine, &self.options, IMPORTS, namespace, root_type, &body)
    }
}
