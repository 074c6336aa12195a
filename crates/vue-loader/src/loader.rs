//! Template lookup, loading and rendering.

use crate::calls::ComponentCalls;
use crate::context::RenderContext;
use crate::engine::TemplateEngine;
use crate::error::{LoadError, LoadResult};
use crate::output::OutputStyle;
use crate::registry::EngineRegistry;
use crate::search::find_template;
use crate::Locals;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vue_codegen::Wrappers;

/// Default engine tag when nothing else determines one.
pub const DEFAULT_ENGINE: &str = "hbs";

/// Where template text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource<'a> {
    /// A view name resolved against the views path.
    Named(&'a str),
    /// Template text given directly.
    Inline(&'a str),
}

/// A template bound to its engine but not yet rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTemplate {
    /// Engine tag the template renders with.
    pub engine: String,
    /// Unrendered template text.
    pub source: String,
    /// File the text was read from; `None` for inline sources.
    pub path: Option<PathBuf>,
}

/// Finds view files and renders them with the registered engines.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    views_path: Vec<PathBuf>,
    registry: EngineRegistry,
    default_engine: String,
    wrappers: Arc<Wrappers>,
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new(["app/views"])
    }
}

impl TemplateLoader {
    /// Create a loader over `views_path` with the built-in engines.
    pub fn new<I, P>(views_path: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            views_path: views_path.into_iter().map(Into::into).collect(),
            registry: EngineRegistry::with_defaults(),
            default_engine: DEFAULT_ENGINE.to_string(),
            wrappers: Arc::new(Wrappers::default()),
        }
    }

    /// Replace the engine registry.
    pub fn with_registry(mut self, registry: EngineRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the engine used when no other engine can be inferred.
    pub fn with_default_engine(mut self, tag: impl Into<String>) -> Self {
        self.default_engine = tag.into();
        self
    }

    /// Set the markup used for components declared from inside views.
    pub fn with_wrappers(mut self, wrappers: Wrappers) -> Self {
        self.wrappers = Arc::new(wrappers);
        self
    }

    /// View roots, searched in order.
    pub fn views_path(&self) -> &[PathBuf] {
        &self.views_path
    }

    /// The engine registry.
    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    /// Mutable access to the engine registry, for custom engines.
    pub fn registry_mut(&mut self) -> &mut EngineRegistry {
        &mut self.registry
    }

    /// The fallback engine tag.
    pub fn default_engine(&self) -> &str {
        &self.default_engine
    }

    /// Resolve a view name to a file path.
    pub fn template_path(&self, name: &str, engine: Option<&str>) -> Option<PathBuf> {
        find_template(&self.views_path, name, engine, &self.registry)
    }

    /// Load a template, logging and swallowing any failure.
    pub fn load(
        &self,
        source: TemplateSource<'_>,
        engine: Option<&str>,
        ctx: &RenderContext,
    ) -> Option<LoadedTemplate> {
        self.try_load(source, engine, ctx)
            .map_err(|e| log_failure(source, &e))
            .ok()
    }

    /// Load a template.
    ///
    /// The engine is the explicit tag, else the file's extension when it is
    /// a registered engine, else the engine currently rendering, else the
    /// default engine.
    pub fn try_load(
        &self,
        source: TemplateSource<'_>,
        engine: Option<&str>,
        ctx: &RenderContext,
    ) -> LoadResult<LoadedTemplate> {
        let fallback = || {
            ctx.current_engine()
                .unwrap_or(&self.default_engine)
                .to_string()
        };

        let template = match source {
            TemplateSource::Named(name) => {
                let path = self
                    .template_path(name, engine)
                    .ok_or_else(|| LoadError::NotFound(name.to_string()))?;
                let text = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?;
                let engine = engine
                    .map(str::to_string)
                    .or_else(|| self.registry.tag_for_path(&path))
                    .unwrap_or_else(fallback);
                LoadedTemplate {
                    engine,
                    source: text,
                    path: Some(path),
                }
            }
            TemplateSource::Inline(text) => LoadedTemplate {
                engine: engine.map(str::to_string).unwrap_or_else(fallback),
                source: text.to_string(),
                path: None,
            },
        };

        if template.engine.is_empty() {
            return Err(LoadError::UndeterminedEngine);
        }
        self.engine(&template.engine)?;
        tracing::debug!(
            engine = %template.engine,
            path = ?template.path.as_deref().map(Path::display),
            "template loaded"
        );
        Ok(template)
    }

    /// Render a loaded template, logging and swallowing any failure.
    pub fn render(
        &self,
        template: &LoadedTemplate,
        locals: &Locals,
        ctx: &mut RenderContext,
    ) -> Option<String> {
        self.try_render(template, locals, ctx)
            .map_err(|e| {
                tracing::debug!(
                    engine = %template.engine,
                    kind = e.kind(),
                    error = %e,
                    "template render failed"
                );
            })
            .ok()
    }

    /// Render a loaded template with its engine marked as current.
    ///
    /// Components the view declares are recorded on `ctx` when the render
    /// succeeds.
    pub fn try_render(
        &self,
        template: &LoadedTemplate,
        locals: &Locals,
        ctx: &mut RenderContext,
    ) -> LoadResult<String> {
        let engine = self.engine(&template.engine)?;
        let calls = ComponentCalls::new(Arc::clone(&self.wrappers));
        let text = ctx.with_engine(&template.engine, |_| {
            engine.render(&template.source, locals, &calls)
        })?;
        ctx.record_declarations(calls.take());
        Ok(text)
    }

    /// Load and render in one step.
    pub fn render_source(
        &self,
        source: TemplateSource<'_>,
        engine: Option<&str>,
        locals: &Locals,
        ctx: &mut RenderContext,
    ) -> Option<String> {
        let template = self.load(source, engine, ctx)?;
        self.render(&template, locals, ctx)
    }

    /// Capture style of an engine; unknown or absent engines are generic.
    pub fn output_style(&self, engine: Option<&str>) -> OutputStyle {
        engine
            .and_then(|tag| self.registry.get(tag))
            .map_or(OutputStyle::Generic, |e| e.output_style())
    }

    fn engine(&self, tag: &str) -> LoadResult<Arc<dyn TemplateEngine>> {
        self.registry
            .get(tag)
            .cloned()
            .ok_or_else(|| LoadError::UnknownEngine(tag.to_string()))
    }
}

fn log_failure(source: TemplateSource<'_>, error: &LoadError) {
    let name = match source {
        TemplateSource::Named(name) => name,
        TemplateSource::Inline(_) => "<inline>",
    };
    tracing::debug!(name, kind = error.kind(), error = %error, "template not loaded");
}
