//! `InitializeComponent` generator.
//!
//! Named elements become fields, assigned once from the name scope after
//! the markup has been loaded.

use super::templates::TemplateEngine;
use super::{render_file, CodeGenerator, CodegenOptions};
use crate::error::Result;
use serde::Serialize;
use xname_core::{ResolvedName, TargetLanguage, TypeRef};

const CSHARP_INITIALIZE: &str = r#"partial class {{class_name}}
{
{{fields}}    /// <summary>
    /// Wires up the named controls and optionally loads the XAML markup.
    /// </summary>
    /// <param name="loadXaml">Should the XAML be loaded into the component.</param>
    public void InitializeComponent(bool loadXaml = true)
    {
        if (loadXaml)
        {
            AvaloniaXamlLoader.Load(this);
        }{{assignments}}
    }
}
"#;

const VISUAL_BASIC_INITIALIZE: &str = r#"Partial Class {{class_name}}
{{fields}}    ''' <summary>
    ''' Wires up the named controls and optionally loads the XAML markup.
    ''' </summary>
    ''' <param name="loadXaml">Should the XAML be loaded into the component.</param>
    Public Sub InitializeComponent(Optional loadXaml As Boolean = True)
        If loadXaml Then
            AvaloniaXamlLoader.Load(Me)
        End If{{assignments}}
    End Sub
End Class
"#;

const IMPORTS: &[&str] = &["Avalonia.Controls", "Avalonia.Markup.Xaml"];

#[derive(Serialize)]
struct BodyData<'a> {
    class_name: &'a str,
    fields: String,
    assignments: String,
}

/// Generates fields plus an `InitializeComponent` method that assigns them.
pub struct InitializeComponentGenerator {
    engine: TemplateEngine<'static>,
    options: CodegenOptions,
}

impl InitializeComponentGenerator {
    pub fn new(options: CodegenOptions) -> Result<Self> {
        let mut engine = TemplateEngine::with_file_templates()?;
        engine.register_template("cs_initialize", CSHARP_INITIALIZE)?;
        engine.register_template("vb_initialize", VISUAL_BASIC_INITIALIZE)?;
        Ok(Self { engine, options })
    }

    /// Field declarations, each on its own line, followed by a blank line.
    fn fields(&self, names: &[ResolvedName]) -> String {
        if names.is_empty() {
            return String::new();
        }
        let language = self.options.language;
        let mut out: String = names
            .iter()
            .map(|name| {
                let modifier = name.field_modifier.keyword(language);
                match language {
                    TargetLanguage::CSharp => {
                        format!("    {} {} {};\n", modifier, name.type_name, name.name)
                    }
                    TargetLanguage::VisualBasic => {
                        format!("    {} {} As {}\n", modifier, name.name, name.type_name)
                    }
                }
            })
            .collect();
        out.push('\n');
        out
    }

    /// Name-scope lookup and assignments, preceded by a blank line.
    fn assignments(&self, names: &[ResolvedName]) -> String {
        if names.is_empty() {
            return String::new();
        }
        let mut lines = vec![String::new()];
        match self.options.language {
            TargetLanguage::CSharp => {
                lines.push("        var __thisNameScope__ = this.FindNameScope();".to_string());
                lines.extend(names.iter().map(|name| {
                    format!(
                        "        {} = __thisNameScope__?.Find<{}>(\"{}\");",
                        name.name, name.type_name, name.name
                    )
                }));
            }
            TargetLanguage::VisualBasic => {
                lines.push("        Dim thisNameScope = Me.FindNameScope()".to_string());
                lines.extend(names.iter().map(|name| {
                    format!(
                        "        {} = thisNameScope?.Find(Of {})(\"{}\")",
                        name.name, name.type_name, name.name
                    )
                }));
            }
        }
        // Leading newline ends the `if` block's line.
        format!("\n{}", lines.join("\n"))
    }
}

impl CodeGenerator for InitializeComponentGenerator {
    fn strategy_name(&self) -> &'static str {
        "InitializeComponent"
    }

    fn generate_code(
        &self,
        class_name: &str,
        namespace: &str,
        root_type: &TypeRef,
        names: &[ResolvedName],
    ) -> Result<String> {
        let template = match self.options.language {
            TargetLanguage::CSharp => "cs_initialize",
            TargetLanguage::VisualBasic => "vb_initialize",
        };
        let body = self.engine.render(
            template,
            &BodyData {
                class_name,
                fields: self.fields(names),
                assignments: self.assignments(names),
            },
        )?;

        render_file(&self.engine, &self.options, IMPORTS, namespace, root_type, &body)
    }
}
