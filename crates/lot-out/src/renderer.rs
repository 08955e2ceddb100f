//! Template rendering for LOT-OUT.
//!
//! Uses Handlebars with HTML escaping switched off; XML templates escape
//! explicitly through the `xml` helper so the human-readable template can
//! print text as-is.

use handlebars::{
    no_escape, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};
use serde::Serialize;
use serde_json::Value;

use lot_core::{LotError, LotResult};

use crate::templates::TemplatesFile;

/// Escape the five XML special characters.
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Compiled renderer with registered helpers
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
    templates: TemplatesFile,
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer")
            .field("templates", &self.templates.list_templates())
            .finish()
    }
}

impl TemplateRenderer {
    /// Create a new renderer from a templates file
    pub fn new(templates: TemplatesFile) -> LotResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(no_escape);
        handlebars.register_helper("xml", Box::new(XmlHelper));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| LotError::Config(format!("template '{}': {}", name, e)))?;
        }

        Ok(Self { handlebars, templates })
    }

    /// Renderer over the embedded export templates
    pub fn embedded() -> LotResult<Self> {
        Self::new(TemplatesFile::embedded()?)
    }

    /// Render a named template with data
    pub fn render<T: Serialize>(&self, template_name: &str, data: &T) -> LotResult<String> {
        if self.templates.get(template_name).is_none() {
            return Err(LotError::Config(format!("no template named '{}'", template_name)));
        }
        self.handlebars
            .render(template_name, data)
            .map_err(|e| LotError::Serialize(format!("Render error: {}", e)))
    }

    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.list_templates()
    }
}

// ============================================================================
// Custom Helpers
// ============================================================================

/// `{{xml value}}`: XML-escaped text; null renders as nothing
struct XmlHelper;

impl HelperDef for XmlHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        match h.param(0).map(|p| p.value()) {
            Some(Value::String(s)) => out.write(&xml_escape(s))?,
            Some(Value::Null) | None => {}
            Some(other) => out.write(&xml_escape(&other.to_string()))?,
        }
        Ok(())
    }
}
