// Server-rendered view seam

use std::collections::HashMap;

use crate::core::errors::ServerError;

/// Rendering boundary consumed by routes. The engine behind it is not this
/// server's concern; routes only name the view they want.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &str) -> Result<String, ServerError>;
}

/// Renderer over templates compiled into the binary.
pub struct TemplateRenderer {
    templates: HashMap<&'static str, &'static str>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut templates = HashMap::new();
        templates.insert(
            "update_firefox",
            include_str!("../../templates/update_firefox.html"),
        );
        Self { templates }
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for TemplateRenderer {
    fn render(&self, view: &str) -> Result<String, ServerError> {
        self.templates
            .get(view)
            .map(|template| (*template).to_string())
            .ok_or_else(|| ServerError::RenderError(format!("unknown view '{}'", view)))
    }
}
