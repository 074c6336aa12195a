//! Shared, process-wide helper environment.

use crate::cache::CacheStore;
use crate::config::HelperConfig;
use crate::error::HelperResult;
use crate::helpers::VueHelpers;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use vue_codegen::{Minifier, WhitespaceMinifier};
use vue_loader::{EngineRegistry, TemplateEngine, TemplateLoader};

/// Everything a request's helpers share: configuration, view loader,
/// bundle cache and minifier.
pub struct Environment {
    config: HelperConfig,
    loader: TemplateLoader,
    cache: CacheStore,
    minifier: Arc<dyn Minifier>,
}

impl Environment {
    /// Build an environment from a configuration.
    ///
    /// Bundles go to the process-wide cache store.
    pub fn new(config: HelperConfig) -> Self {
        let loader = TemplateLoader::new(config.views_path.iter().cloned())
            .with_default_engine(config.template_engine.clone())
            .with_wrappers(config.wrappers.clone());
        Self {
            config,
            loader,
            cache: CacheStore::global(),
            minifier: Arc::new(WhitespaceMinifier),
        }
    }

    /// Build an environment from a `vue-helpers.json` file.
    pub fn from_config_file(path: impl AsRef<Path>) -> HelperResult<Self> {
        let config = HelperConfig::load(path.as_ref())?;
        Ok(Self::new(config))
    }

    /// Use a different cache store.
    pub fn with_cache(mut self, cache: CacheStore) -> Self {
        self.cache = cache;
        self
    }

    /// Use a different minifier.
    pub fn with_minifier(mut self, minifier: impl Minifier + 'static) -> Self {
        self.minifier = Arc::new(minifier);
        self
    }

    /// Replace the engine registry.
    pub fn with_registry(mut self, registry: EngineRegistry) -> Self {
        self.loader = self.loader.with_registry(registry);
        self
    }

    /// Register an additional engine.
    pub fn with_engine(mut self, tag: &str, engine: impl TemplateEngine + 'static) -> Self {
        self.loader.registry_mut().register(tag, engine);
        self
    }

    /// Start helpers for one request.
    pub fn request(self: &Arc<Self>) -> VueHelpers {
        VueHelpers::new(Arc::clone(self))
    }

    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    pub fn loader(&self) -> &TemplateLoader {
        &self.loader
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn minifier(&self) -> &dyn Minifier {
        self.minifier.as_ref()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(HelperConfig::default())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("config", &self.config)
            .field("loader", &self.loader)
            .field("cache", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use vue_loader::PlainEngine;

    #[test]
    fn test_loader_follows_config() {
        let env = Environment::new(
            HelperConfig::default()
                .with_views_path(["views", "shared"])
                .with_template_engine("jinja"),
        );
        assert_eq!(env.loader().views_path().len(), 2);
        assert_eq!(env.loader().default_engine(), "jinja");
    }

    #[test]
    fn test_custom_engine_and_minifier() {
        let env = Environment::default()
            .with_engine("txt", PlainEngine)
            .with_minifier(|js: &str| js.replace(' ', ""));
        assert!(env.loader().registry().contains("txt"));
        assert_eq!(env.minifier().minify("a = 1"), "a=1");
    }

    #[test]
    fn test_from_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(crate::CONFIG_FILE);
        std::fs::write(&path, r#"{"template_engine": "html", "root_name": "shop"}"#).unwrap();
        let env = Environment::from_config_file(&path).unwrap();
        assert_eq!(env.config().root_name, "shop");
        assert_eq!(env.loader().default_engine(), "html");

        std::fs::write(&path, "{ not json").unwrap();
        let err = Environment::from_config_file(&path).unwrap_err();
        assert_eq!(err.as_str(), "config");
        let err = Environment::from_config_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, crate::HelperError::Config(ConfigError::Read { .. })));
    }

    #[test]
    fn test_environment_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Environment>();
    }
}
