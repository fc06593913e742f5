//! Template engine for code generation.

use crate::error::{CodegenError, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// C# compilation unit wrapping a class body in a namespace.
pub(crate) const CSHARP_FILE: &str = r#"// <auto-generated />
// Root: {{root_type}}

{{imports}}
namespace {{namespace}}
{
{{indent body 4}}
}
"#;

/// C# compilation unit for a class in the global namespace.
pub(crate) const CSHARP_FILE_GLOBAL: &str = r#"// <auto-generated />
// Root: {{root_type}}

{{imports}}
{{body}}
"#;

/// Visual Basic compilation unit wrapping a class body in a namespace.
pub(crate) const VISUAL_BASIC_FILE: &str = r#"' <auto-generated />
' Root: {{root_type}}

{{imports}}
Namespace {{namespace}}
{{indent body 4}}
End Namespace
"#;

/// Visual Basic compilation unit for a class in the global namespace.
pub(crate) const VISUAL_BASIC_FILE_GLOBAL: &str = r#"' <auto-generated />
' Root: {{root_type}}

{{imports}}
{{body}}
"#;

/// Template engine using Handlebars.
///
/// Output is source code, so HTML escaping is disabled and missing fields
/// are errors rather than empty strings.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a new template engine.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        // Register custom helpers
        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Create an engine with the compilation-unit templates registered.
    pub(crate) fn with_file_templates() -> Result<Self> {
        let mut engine = Self::new();
        engine.register_template("cs_file", CSHARP_FILE)?;
        engine.register_template("cs_file_global", CSHARP_FILE_GLOBAL)?;
        engine.register_template("vb_file", VISUAL_BASIC_FILE)?;
        engine.register_template("vb_file_global", VISUAL_BASIC_FILE_GLOBAL)?;
        Ok(engine)
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        if !self.handlebars.has_template(name) {
            return Err(CodegenError::TemplateNotFound(name.to_string()));
        }
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Render a template string directly.
    #[cfg(test)]
    pub(crate) fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Register custom helpers.
    fn register_helpers(handlebars: &mut Handlebars) {
        // Indent every non-blank line of a block by N spaces.
        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    let spaces = h
                        .param(1)
                        .and_then(|v| v.value().as_u64())
                        .unwrap_or(4) as usize;

                    out.write(&indent(content, spaces))?;
                    Ok(())
                },
            ),
        );
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Indent non-blank lines; blank lines stay empty so no trailing whitespace appears.
fn indent(content: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
