//! Declaration options and their first-write-wins merge.

use crate::config::ExternalResource;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use vue_loader::Locals;

/// Vue `data` values.
pub type Data = IndexMap<String, serde_json::Value>;

/// Raw JS expressions keyed by name, for `watch` and `computed`.
pub type JsOptions = IndexMap<String, String>;

/// Options supplied when a root or component is declared.
///
/// Every field is optional; an unset field falls back to the object's own
/// default or the helper configuration. Root-only fields are ignored on
/// components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectOptions {
    pub root_name: Option<String>,
    pub file_name: Option<String>,
    pub template_engine: Option<String>,
    pub locals: Option<Locals>,
    pub data: Option<Data>,
    pub watch: Option<JsOptions>,
    pub computed: Option<JsOptions>,
    pub external_resource: Option<ExternalResource>,
    pub template_literal: Option<bool>,
    pub register_local: Option<bool>,
    pub minify: Option<bool>,
}

impl ObjectOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no option is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill unset fields from `other`. Fields already set are kept.
    pub fn merge_from(&mut self, other: ObjectOptions) {
        fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
            if slot.is_none() {
                *slot = value;
            }
        }

        fill(&mut self.root_name, other.root_name);
        fill(&mut self.file_name, other.file_name);
        fill(&mut self.template_engine, other.template_engine);
        fill(&mut self.locals, other.locals);
        fill(&mut self.data, other.data);
        fill(&mut self.watch, other.watch);
        fill(&mut self.computed, other.computed);
        fill(&mut self.external_resource, other.external_resource);
        fill(&mut self.template_literal, other.template_literal);
        fill(&mut self.register_local, other.register_local);
        fill(&mut self.minify, other.minify);
    }

    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = Some(name.into());
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn with_template_engine(mut self, tag: impl Into<String>) -> Self {
        self.template_engine = Some(tag.into());
        self
    }

    /// Add one template local.
    pub fn with_local(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.locals
            .get_or_insert_with(Locals::new)
            .insert(key.into(), value.into());
        self
    }

    /// Add one `data` entry.
    pub fn with_data(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.data
            .get_or_insert_with(Data::new)
            .insert(key.into(), value.into());
        self
    }

    /// Add one watcher.
    pub fn with_watch(mut self, key: impl Into<String>, js: impl Into<String>) -> Self {
        self.watch
            .get_or_insert_with(JsOptions::new)
            .insert(key.into(), js.into());
        self
    }

    /// Add one computed property.
    pub fn with_computed(mut self, key: impl Into<String>, js: impl Into<String>) -> Self {
        self.computed
            .get_or_insert_with(JsOptions::new)
            .insert(key.into(), js.into());
        self
    }

    pub fn with_external_resource(mut self, external: impl Into<ExternalResource>) -> Self {
        self.external_resource = Some(external.into());
        self
    }

    pub fn with_template_literal(mut self, literal: bool) -> Self {
        self.template_literal = Some(literal);
        self
    }

    pub fn with_register_local(mut self, local: bool) -> Self {
        self.register_local = Some(local);
        self
    }

    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = Some(minify);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_write_wins() {
        let mut options = ObjectOptions::new()
            .with_file_name("cart")
            .with_data("count", 1);
        options.merge_from(
            ObjectOptions::new()
                .with_file_name("basket")
                .with_data("count", 2)
                .with_template_engine("jinja"),
        );

        assert_eq!(options.file_name.as_deref(), Some("cart"));
        assert_eq!(options.data.unwrap()["count"], json!(1));
        assert_eq!(options.template_engine.as_deref(), Some("jinja"));
    }

    #[test]
    fn test_is_empty() {
        assert!(ObjectOptions::new().is_empty());
        assert!(!ObjectOptions::new().with_minify(false).is_empty());
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ObjectOptions =
            serde_json::from_str(r#"{"external_resource": true, "data": {"a": [1]}}"#).unwrap();
        assert_eq!(options.external_resource, Some(ExternalResource::Enabled(true)));
        assert_eq!(options.data.unwrap()["a"], json!([1]));
        assert_eq!(options.minify, None);
    }
}
