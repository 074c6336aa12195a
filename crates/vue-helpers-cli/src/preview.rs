//! Render a root and its components the way a view would.

use crate::cli::Args;
use std::sync::Arc;
use vue_helpers::{CacheStore, Environment, HelperConfig, HelperResult};

/// Output of one preview run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    /// Call site markup per declared component, in order.
    pub components: Vec<(String, String)>,
    /// The root app output.
    pub app: String,
    /// Bundles cached for the callback endpoint, keyed by request path.
    pub bundles: Vec<(String, String)>,
}

/// Declare every component, then render the root app.
pub fn run(config: HelperConfig, args: &Args) -> HelperResult<Preview> {
    let cache = CacheStore::new();
    let prefix = config.callback_prefix.clone();
    let root = config.root_name.clone();
    let env = Arc::new(Environment::new(config).with_cache(cache.clone()));
    let mut helpers = env.request();

    let mut preview = Preview::default();
    for name in &args.components {
        let html = helpers.vue_component(name.as_str()).root_name(root.as_str()).render()?;
        preview.components.push((name.clone(), html));
    }

    let app = helpers.vue_app(root.as_str());
    preview.app = match &args.block {
        Some(block) => app.render_with(|_| block.clone())?,
        None => app.render()?,
    };

    for key in cache.keys() {
        if let Some(js) = cache.take(&key) {
            preview.bundles.push((format!("{prefix}/{key}"), js));
        }
    }
    tracing::debug!(
        components = preview.components.len(),
        bundles = preview.bundles.len(),
        "preview rendered"
    );
    Ok(preview)
}
