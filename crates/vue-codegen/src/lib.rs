//! Vue component and root application code generation.
//!
//! This crate turns parsed SFC fragments into the JavaScript that registers
//! components and boots the root `Vue` instance. Everything is textual:
//! scripts are rewritten by pattern, never parsed.

pub mod helpers;
pub mod minify;
pub mod script;
pub mod template;
pub mod wrappers;

use indexmap::IndexMap;

pub use helpers::{camelize, html_attributes, interpolate, kebabize, Attributes};
pub use minify::{Minifier, WhitespaceMinifier};
pub use script::{compile_component, ComponentSource};
pub use template::{component_call, template_spec, x_template};
pub use wrappers::Wrappers;

/// Options for component code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Emit `var Name = {...}` instead of a global `Vue.component` call.
    pub register_local: bool,
    /// Inline templates as JS template literals instead of x-template ids.
    pub template_literal: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            register_local: false,
            template_literal: true,
        }
    }
}

/// Inputs for the generated default root instance.
#[derive(Debug, Clone, Default)]
pub struct RootObject<'a> {
    /// Declared root name.
    pub name: &'a str,
    /// JS identifiers of components that produced a definition.
    pub components: Vec<String>,
    /// Root data as a JSON object.
    pub data_json: &'a str,
    /// Watchers as raw JS expressions.
    pub watch: Option<&'a IndexMap<String, String>>,
    /// Computed properties as raw JS expressions.
    pub computed: Option<&'a IndexMap<String, String>>,
}

impl RootObject<'_> {
    /// Render the root instance through the `root_object_js` wrapper.
    pub fn to_js(&self, wrappers: &Wrappers) -> String {
        let app_name = camelize(self.name);
        let root_id = kebabize(self.name);
        let components = self
            .components
            .iter()
            .map(|c| format!("{c}: {c}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut options = String::new();
        for (key, entries) in [("watch", self.watch), ("computed", self.computed)] {
            if let Some(entries) = entries.filter(|e| !e.is_empty()) {
                options.push_str(&format!(", {}: {}", key, helpers::js_object(entries)));
            }
        }

        interpolate(
            &wrappers.root_object_js,
            &[
                ("app_name", app_name.as_str()),
                ("root_name", root_id.as_str()),
                ("components", components.as_str()),
                ("vue_data_json", self.data_json),
                ("vue_options", options.as_str()),
            ],
        )
    }
}

/// Join component definitions and the root script into one bundle.
///
/// Components keep the given order; the root script always comes last.
pub fn bundle<'a>(components: impl IntoIterator<Item = &'a str>, root_script: &'a str) -> String {
    components
        .into_iter()
        .chain(std::iter::once(root_script.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
