//! Boundary to the template engine.
//!
//! A resolved view hands its template to a [`TemplateRenderer`]; what the
//! template syntax means is entirely up to the renderer. [`JinjaRenderer`]
//! is the stock implementation, backed by minijinja.

use crate::error::{AutoloadError, Result};
use minijinja::Environment;
use serde_json::Value;

pub trait TemplateRenderer {
    /// Render `template` with `context`. `name` only labels errors.
    fn render(&self, name: &str, template: &str, context: &Value) -> Result<String>;
}

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for JinjaRenderer {
    fn render(&self, name: &str, template: &str, context: &Value) -> Result<String> {
        self.env
            .render_named_str(name, template, context)
            .map_err(|e| AutoloadError::Render(e.to_string()))
    }
}

/// The context a view renders with: the view's own fields, overridden by
/// whatever the caller passes in.
pub fn view_context(view: &Value, overrides: &Value) -> Value {
    match (view, overrides) {
        (Value::Object(base), Value::Object(extra)) => {
            let mut merged = base.clone();
            for (key, value) in extra {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        (Value::Object(_), Value::Null) => view.clone(),
        _ => overrides.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_template() {
        let renderer = JinjaRenderer::new();
        let out = renderer
            .render("greeting", "Hello {{ name }}!", &json!({ "name": "world" }))
            .unwrap();
        assert_eq!(out, "Hello world!");
    }

    #[test]
    fn test_render_syntax_error() {
        let renderer = JinjaRenderer::new();
        let err = renderer
            .render("broken", "{% if %}", &json!({}))
            .unwrap_err();
        assert!(matches!(err, AutoloadError::Render(_)));
    }

    #[test]
    fn test_view_context_merges_overrides() {
        let view = json!({ "title": "Home", "name": "default" });
        let ctx = view_context(&view, &json!({ "name": "Ada" }));
        assert_eq!(ctx, json!({ "title": "Home", "name": "Ada" }));
    }

    #[test]
    fn test_view_context_without_overrides() {
        let view = json!({ "title": "Home" });
        assert_eq!(view_context(&view, &Value::Null), view);
    }
}
