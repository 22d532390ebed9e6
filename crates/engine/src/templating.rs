//! Minijinja rendering for narrative titles and bodies.
//!
//! Template sources come from the compiled template table and are syntax
//! checked when rule documents are validated. Rendering itself never fails:
//! a template that errors at render time is logged and returned verbatim.

use serde::Serialize;
use tracing::warn;

/// Values substituted into narrative text.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplateContext {
    pub matches: u64,
    /// `matches - 1`, floored at 0.
    pub others: u64,
    pub total: u64,
    pub milestone: Option<u64>,
    /// Phrase for the window, e.g. "this week".
    pub period: &'static str,
}

#[derive(Debug)]
pub struct TemplateRenderer {
    env: minijinja::Environment<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self {
            env: minijinja::Environment::new(),
        }
    }

    pub fn render(&self, source: &str, ctx: &TemplateContext) -> String {
        match self.env.render_str(source, ctx) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, template = source, "narrative template failed to render");
                source.to_string()
            }
        }
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
