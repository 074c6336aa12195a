//! Inline Vue components for server-rendered views.
//!
//! View code declares components and root applications through
//! [`VueHelpers`]. Each declaration loads the matching `.vue` view once per
//! request, and rendering a root stitches every component attached to it
//! into one script, emitted inline or cached for the callback endpoint.
//!
//! ```no_run
//! use std::sync::Arc;
//! use vue_helpers::{Environment, HelperConfig};
//!
//! let env = Arc::new(Environment::new(HelperConfig::default()));
//! let mut helpers = env.request();
//! let cart = helpers.vue_component("cart").attribute("id", "main").render()?;
//! let app = helpers.vue_app("vue-app").render()?;
//! # Ok::<(), vue_helpers::HelperError>(())
//! ```

pub mod cache;
pub mod component;
pub mod config;
pub mod env;
pub mod error;
pub mod helpers;
pub mod object;
pub mod options;
pub mod repository;
pub mod root;

pub use cache::{generate_key, CacheStore, KEY_LEN};
pub use component::VueComponent;
pub use config::{ExternalResource, HelperConfig, CONFIG_FILE};
pub use env::Environment;
pub use error::{ConfigError, HelperError, HelperResult};
pub use helpers::{AppCall, ComponentCall, VueHelpers};
pub use object::VueObject;
pub use options::{Data, JsOptions, ObjectOptions};
pub use repository::{VueEntry, VueRepository};
pub use root::{RootSettings, VueRoot};

pub use vue_codegen::{Minifier, WhitespaceMinifier, Wrappers};
pub use vue_loader::{Locals, OutputStyle, TemplateEngine};
