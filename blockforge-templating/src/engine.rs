//! Template engine for parsing and rendering block templates
//!
//! Thin wrapper around a configured `liquid::Parser`. The engine validates
//! template sources at parse time and maps liquid's errors into the local
//! error taxonomy; what gets bound into a template comes from the renderer.

use liquid_core::Object;

use crate::error::{Result, TemplatingError};

/// Template engine with Liquid configuration
pub struct TemplateEngine {
    parser: liquid::Parser,
}

impl TemplateEngine {
    /// Create a new template engine with the stdlib tag and filter set
    pub fn new() -> Result<Self> {
        let parser = liquid::ParserBuilder::with_stdlib()
            .build()
            .map_err(|e| TemplatingError::Parse(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Create a new template engine with a custom parser
    pub fn with_parser(parser: liquid::Parser) -> Self {
        Self { parser }
    }

    /// Parse a template string
    pub fn parse(&self, template_str: &str) -> Result<liquid::Template> {
        self.parser
            .parse(template_str)
            .map_err(|e| TemplatingError::Parse(e.to_string()))
    }

    /// Parse and render a template string against the given bindings
    pub fn render(&self, template_str: &str, globals: &Object) -> Result<String> {
        let template = self.parse(template_str)?;
        template
            .render(globals)
            .map_err(|e| TemplatingError::Render(e.to_string()))
    }
}
