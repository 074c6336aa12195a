//! Template engines that render view sources with local variables.

use crate::calls::{ComponentCalls, ComponentDeclaration, HELPER_NAME};
use crate::error::{LoadError, LoadResult};
use crate::output::OutputStyle;
use crate::Locals;
use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, JsonRender, Output, RenderContext,
    RenderError, Renderable,
};
use minijinja::value::{Kwargs, Value};
use std::fmt;

/// A template engine that can render source text with locals.
pub trait TemplateEngine: Send + Sync + fmt::Debug {
    /// Canonical tag of the engine, also its preferred file extension.
    fn name(&self) -> &str;

    /// How blocks rendered by this engine hand their output back.
    fn output_style(&self) -> OutputStyle;

    /// Render `source` with `locals`.
    ///
    /// Engines that support nested declarations expose a `vue_component`
    /// helper that records into `calls`.
    fn render(&self, source: &str, locals: &Locals, calls: &ComponentCalls) -> LoadResult<String>;
}

/// Handlebars views (`.hbs`).
///
/// Interpolated locals are HTML-escaped; missing locals render empty.
/// `{{vue_component "name" color="red"}}` and its block form declare a
/// nested component.
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
}

impl HandlebarsEngine {
    /// Create a non-strict Handlebars engine.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        Self { registry }
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlebarsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlebarsEngine").finish_non_exhaustive()
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn name(&self) -> &str {
        "hbs"
    }

    fn output_style(&self) -> OutputStyle {
        OutputStyle::ErbLike
    }

    fn render(&self, source: &str, locals: &Locals, calls: &ComponentCalls) -> LoadResult<String> {
        let mut registry = self.registry.clone();
        registry.register_helper(
            HELPER_NAME,
            Box::new(ComponentHelper {
                calls: calls.clone(),
            }),
        );
        registry
            .render_template(source, locals)
            .map_err(|e| LoadError::render(self.name(), e))
    }
}

/// The Handlebars `vue_component` helper.
struct ComponentHelper {
    calls: ComponentCalls,
}

impl HelperDef for ComponentHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let name = h
            .param(0)
            .ok_or_else(|| RenderError::new("vue_component requires a name"))?
            .value()
            .render();
        let mut declaration = ComponentDeclaration::new(name);
        for (key, value) in h.hash() {
            declaration.set(key, value.value().render());
        }

        let mut block = Collect::default();
        if let Some(template) = h.template() {
            template.render(r, ctx, rc, &mut block)?;
        }
        out.write(&self.calls.declare(declaration, &block.0))?;
        Ok(())
    }
}

/// Output sink for a helper's block.
#[derive(Default)]
struct Collect(String);

impl Output for Collect {
    fn write(&mut self, seg: &str) -> Result<(), std::io::Error> {
        self.0.push_str(seg);
        Ok(())
    }
}

/// Jinja views (`.jinja`), rendered with minijinja.
///
/// `{{ vue_component("name", color="red") }}` declares a nested component.
#[derive(Debug)]
pub struct JinjaEngine {
    env: minijinja::Environment<'static>,
}

impl JinjaEngine {
    /// Create a Jinja engine with the default environment.
    pub fn new() -> Self {
        Self {
            env: minijinja::Environment::new(),
        }
    }
}

impl Default for JinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for JinjaEngine {
    fn name(&self) -> &str {
        "jinja"
    }

    fn output_style(&self) -> OutputStyle {
        OutputStyle::HamlLike
    }

    fn render(&self, source: &str, locals: &Locals, calls: &ComponentCalls) -> LoadResult<String> {
        let mut env = self.env.clone();
        let calls = calls.clone();
        env.add_function(
            HELPER_NAME,
            move |name: String, kwargs: Kwargs| -> Result<Value, minijinja::Error> {
                let mut declaration = ComponentDeclaration::new(name);
                for key in kwargs.args() {
                    let value: Value = kwargs.get(key)?;
                    declaration.set(key, value.to_string());
                }
                kwargs.assert_all_used()?;
                Ok(Value::from_safe_string(calls.declare(declaration, "")))
            },
        );
        env.render_str(source, locals)
            .map_err(|e| LoadError::render(self.name(), e))
    }
}

/// Plain views (`.html`): the source is the output, locals are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainEngine;

impl TemplateEngine for PlainEngine {
    fn name(&self) -> &str {
        "html"
    }

    fn output_style(&self) -> OutputStyle {
        OutputStyle::Generic
    }

    fn render(
        &self,
        source: &str,
        _locals: &Locals,
        _calls: &ComponentCalls,
    ) -> LoadResult<String> {
        Ok(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn locals() -> Locals {
        let mut locals = Locals::new();
        locals.insert("title".to_string(), json!("Cart <1>"));
        locals
    }

    #[test]
    fn test_handlebars_render_escapes() {
        let out = HandlebarsEngine::new()
            .render(
                "<template><h1>{{title}}</h1></template>",
                &locals(),
                &ComponentCalls::default(),
            )
            .unwrap();
        assert_eq!(out, "<template><h1>Cart &lt;1&gt;</h1></template>");
    }

    #[test]
    fn test_handlebars_missing_local_renders_empty() {
        let out = HandlebarsEngine::new()
            .render("[{{nope}}]", &Locals::new(), &ComponentCalls::default())
            .unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_handlebars_syntax_error() {
        let err = HandlebarsEngine::new()
            .render("{{#if}}", &Locals::new(), &ComponentCalls::default())
            .unwrap_err();
        assert_eq!(err.kind(), "render");
    }

    #[test]
    fn test_jinja_render() {
        let out = JinjaEngine::new()
            .render(
                "{% for i in [1, 2] %}{{ i }}{% endfor %} {{ title }}",
                &locals(),
                &ComponentCalls::default(),
            )
            .unwrap();
        assert_eq!(out, "12 Cart <1>");
    }

    #[test]
    fn test_handlebars_component_helper() {
        let calls = ComponentCalls::default();
        let out = HandlebarsEngine::new()
            .render(
                r#"<ul>{{vue_component "todo-item" tag_name="li" label=title}}</ul>{{#vue_component "card"}}<b>{{title}}</b>{{/vue_component}}"#,
                &locals(),
                &calls,
            )
            .unwrap();
        assert_eq!(
            out,
            r#"<ul><li label="Cart <1>" is="todo-item"></li></ul><card><b>Cart &lt;1&gt;</b></card>"#
        );
        let declared = calls.take();
        assert_eq!(declared.len(), 2);
        assert_eq!(declared[0].name, "todo-item");
        assert_eq!(declared[0].tag_name.as_deref(), Some("li"));
        assert_eq!(declared[1].name, "card");
    }

    #[test]
    fn test_jinja_component_function() {
        let calls = ComponentCalls::default();
        let out = JinjaEngine::new()
            .render(
                r#"{{ vue_component("price", root_name="shop", amount=3) }}"#,
                &Locals::new(),
                &calls,
            )
            .unwrap();
        assert_eq!(out, r#"<price amount="3"></price>"#);
        let declared = calls.take();
        assert_eq!(declared[0].root_name.as_deref(), Some("shop"));
    }

    #[test]
    fn test_plain_passthrough() {
        let out = PlainEngine
            .render("{{title}}", &locals(), &ComponentCalls::default())
            .unwrap();
        assert_eq!(out, "{{title}}");
    }

    #[test]
    fn test_output_styles() {
        assert_eq!(HandlebarsEngine::new().output_style(), OutputStyle::ErbLike);
        assert_eq!(JinjaEngine::new().output_style(), OutputStyle::HamlLike);
        assert_eq!(PlainEngine.output_style(), OutputStyle::Generic);
    }
}
