//! Engine lookup by tag.

use crate::engine::{HandlebarsEngine, JinjaEngine, PlainEngine, TemplateEngine};
use indexmap::IndexMap;
use std::path::Path;
use std::sync::Arc;

/// Maps engine tags and file extensions to engines.
#[derive(Debug, Clone, Default)]
pub struct EngineRegistry {
    engines: IndexMap<String, Arc<dyn TemplateEngine>>,
}

impl EngineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in engines.
    ///
    /// `hbs`/`handlebars`, `jinja`/`j2` and `html`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let handlebars: Arc<dyn TemplateEngine> = Arc::new(HandlebarsEngine::new());
        let jinja: Arc<dyn TemplateEngine> = Arc::new(JinjaEngine::new());
        registry.register_shared("hbs", handlebars.clone());
        registry.register_shared("handlebars", handlebars);
        registry.register_shared("jinja", jinja.clone());
        registry.register_shared("j2", jinja);
        registry.register("html", PlainEngine);
        registry
    }

    /// Register an engine under a tag, replacing any previous one.
    pub fn register(&mut self, tag: impl Into<String>, engine: impl TemplateEngine + 'static) {
        self.register_shared(tag, Arc::new(engine));
    }

    /// Register an already shared engine under a tag.
    pub fn register_shared(&mut self, tag: impl Into<String>, engine: Arc<dyn TemplateEngine>) {
        self.engines.insert(normalize(&tag.into()), engine);
    }

    /// Look up an engine by tag. A leading dot is ignored.
    pub fn get(&self, tag: &str) -> Option<&Arc<dyn TemplateEngine>> {
        self.engines.get(&normalize(tag))
    }

    /// Check if a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// The registered tag matching a file's final extension.
    pub fn tag_for_path(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?;
        self.contains(ext).then(|| normalize(ext))
    }

    /// All registered tags, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }
}

fn normalize(tag: &str) -> String {
    tag.trim_start_matches('.').to_ascii_lowercase()
}
