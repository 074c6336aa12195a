//! Helper configuration (`vue-helpers.json`).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vue_codegen::Wrappers;

/// File name looked up by [`HelperConfig::find`].
pub const CONFIG_FILE: &str = "vue-helpers.json";

/// Process-wide helper defaults.
///
/// Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    /// View roots searched for `.vue` files, in order.
    pub views_path: Vec<PathBuf>,
    /// Engine used when no other engine can be inferred.
    pub template_engine: String,
    /// Path prefix the callback endpoint serves bundles under.
    pub callback_prefix: String,
    /// Root that components attach to when none is named.
    pub root_name: String,
    /// Serve bundles through the callback endpoint instead of inline.
    pub external_resource: ExternalResource,
    /// Inline templates as JS template literals.
    pub template_literal: bool,
    /// Register components locally on the root instead of globally.
    pub register_local: bool,
    /// Minify bundles.
    pub minify: bool,
    /// Markup around generated code.
    pub wrappers: Wrappers,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            views_path: vec![PathBuf::from("app/views")],
            template_engine: "hbs".to_string(),
            callback_prefix: "/vuecallback".to_string(),
            root_name: "vue-app".to_string(),
            external_resource: ExternalResource::default(),
            template_literal: true,
            register_local: false,
            minify: false,
            wrappers: Wrappers::default(),
        }
    }
}

impl HelperConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find `vue-helpers.json` in a directory or its parents.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        let mut current = dir;
        loop {
            let candidate = current.join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    /// Set the view roots.
    pub fn with_views_path<I, P>(mut self, views_path: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.views_path = views_path.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default engine.
    pub fn with_template_engine(mut self, tag: impl Into<String>) -> Self {
        self.template_engine = tag.into();
        self
    }

    /// Set the callback prefix.
    pub fn with_callback_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.callback_prefix = prefix.into();
        self
    }

    /// Set the default root name.
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Set the default external resource mode.
    pub fn with_external_resource(mut self, external: impl Into<ExternalResource>) -> Self {
        self.external_resource = external.into();
        self
    }

    /// Set the default template strategy.
    pub fn with_template_literal(mut self, literal: bool) -> Self {
        self.template_literal = literal;
        self
    }

    /// Set the default registration mode.
    pub fn with_register_local(mut self, local: bool) -> Self {
        self.register_local = local;
        self
    }

    /// Set the default minification.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Replace the wrappers.
    pub fn with_wrappers(mut self, wrappers: Wrappers) -> Self {
        self.wrappers = wrappers;
        self
    }
}

/// Whether a root's bundle is served through the callback endpoint.
///
/// Accepts a bool or any string; a string also enables it. Bundles are
/// always served under the configured callback prefix, so the endpoint
/// finds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalResource {
    Enabled(bool),
    Named(String),
}

impl Default for ExternalResource {
    fn default() -> Self {
        Self::Enabled(false)
    }
}

impl ExternalResource {
    /// Check if bundles go through the callback endpoint.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(true) | Self::Named(_))
    }
}

impl From<bool> for ExternalResource {
    fn from(enabled: bool) -> Self {
        Self::Enabled(enabled)
    }
}

impl From<&str> for ExternalResource {
    fn from(value: &str) -> Self {
        Self::Named(value.to_string())
    }
}

impl From<String> for ExternalResource {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}
