//! State shared by roots and components.

use crate::options::{Data, JsOptions, ObjectOptions};
use once_cell::unsync::OnceCell;
use vue_loader::{
    ComponentDeclaration, LoadedTemplate, Locals, RenderContext, TemplateLoader, TemplateSource,
};
use vue_parser::Sfc;

/// A declared root or component within one request.
///
/// Options merge until the object is finalized, which happens the first
/// time a declaring call loads it. The SFC is rendered and parsed at most
/// once.
#[derive(Debug)]
pub struct VueObject {
    name: String,
    options: ObjectOptions,
    finalized: bool,
    loaded: Option<LoadedTemplate>,
    rendered: OnceCell<Option<String>>,
    sfc: OnceCell<Sfc>,
}

impl VueObject {
    /// Create an object with no options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ObjectOptions::default(),
            finalized: false,
            loaded: None,
            rendered: OnceCell::new(),
            sfc: OnceCell::new(),
        }
    }

    /// Declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Merged options.
    pub fn options(&self) -> &ObjectOptions {
        &self.options
    }

    /// Name of the owning root, if set.
    pub fn root_name(&self) -> Option<&str> {
        self.options.root_name.as_deref()
    }

    /// View file name; defaults to the object name.
    pub fn file_name(&self) -> &str {
        self.options.file_name.as_deref().unwrap_or(&self.name)
    }

    /// Engine the view was loaded with, or the requested one before loading.
    pub fn template_engine(&self) -> Option<&str> {
        self.loaded
            .as_ref()
            .map(|t| t.engine.as_str())
            .or(self.options.template_engine.as_deref())
    }

    /// Check if options are frozen.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Merge declaration options, first write wins.
    ///
    /// Returns `false` when the object is already finalized and the options
    /// were dropped.
    pub fn merge_options(&mut self, options: ObjectOptions) -> bool {
        if options.is_empty() {
            return true;
        }
        if self.finalized {
            tracing::debug!(name = %self.name, "object finalized, options ignored");
            return false;
        }
        self.options.merge_from(options);
        true
    }

    /// Freeze options, load the view and render it once.
    ///
    /// Returns the components the view declared while rendering; empty when
    /// the object was already finalized.
    pub fn finalize(
        &mut self,
        loader: &TemplateLoader,
        ctx: &mut RenderContext,
    ) -> Vec<ComponentDeclaration> {
        if self.finalized {
            return Vec::new();
        }
        self.finalized = true;
        self.rendered.take();
        self.sfc.take();

        let engine = self.options.template_engine.clone();
        self.loaded = loader.load(
            TemplateSource::Named(self.file_name()),
            engine.as_deref(),
            ctx,
        );
        if self.loaded.is_none() {
            tracing::debug!(name = %self.name, file = self.file_name(), "no view for object");
        }
        self.render(loader, ctx);
        ctx.take_declarations()
    }

    /// Rendered SFC text, rendering on first use.
    pub fn render(&self, loader: &TemplateLoader, ctx: &mut RenderContext) -> Option<&str> {
        self.rendered
            .get_or_init(|| {
                let template = self.loaded.as_ref()?;
                let locals = self.options.locals.clone().unwrap_or_default();
                loader.render(template, &locals, ctx)
            })
            .as_deref()
    }

    /// Rendered SFC text, if rendering already happened and succeeded.
    pub fn rendered_text(&self) -> Option<&str> {
        self.rendered.get().and_then(Option::as_deref)
    }

    /// Parsed SFC; empty when there is no rendered text.
    pub fn sfc(&self) -> &Sfc {
        self.sfc.get_or_init(|| {
            let sfc = vue_parser::parse(self.rendered_text().unwrap_or_default());
            tracing::trace!(
                name = %self.name,
                template = sfc.template.is_some(),
                script = sfc.script.is_some(),
                "sfc parsed"
            );
            sfc
        })
    }

    /// Parsed `<template>` fragment.
    pub fn parsed_template(&self) -> Option<&str> {
        self.sfc().template_content()
    }

    /// Parsed `<script>` fragment.
    pub fn parsed_script(&self) -> Option<&str> {
        self.sfc().script_content()
    }

    /// `data` values.
    pub fn data(&self) -> Option<&Data> {
        self.options.data.as_ref()
    }

    /// `data` as a JSON object, `{}` when unset.
    pub fn data_json(&self) -> String {
        self.data()
            .and_then(|data| serde_json::to_string(data).ok())
            .unwrap_or_else(|| "{}".to_string())
    }

    /// Watchers.
    pub fn watch(&self) -> Option<&JsOptions> {
        self.options.watch.as_ref()
    }

    /// Computed properties.
    pub fn computed(&self) -> Option<&JsOptions> {
        self.options.computed.as_ref()
    }

    /// Template locals.
    pub fn locals(&self) -> Option<&Locals> {
        self.options.locals.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn loader(files: &[(&str, &str)]) -> (TempDir, TemplateLoader) {
        let dir = TempDir::new().unwrap();
        for (name, text) in files {
            fs::write(dir.path().join(name), text).unwrap();
        }
        let loader = TemplateLoader::new([dir.path()]);
        (dir, loader)
    }

    #[test]
    fn test_finalize_loads_and_parses() {
        let (_dir, loader) = loader(&[(
            "cart.vue.hbs",
            "<template><p>{{title}}</p></template><script>export default {}</script>",
        )]);
        let mut ctx = RenderContext::new();
        let mut object = VueObject::new("cart");
        object.merge_options(ObjectOptions::new().with_local("title", "Cart"));
        object.finalize(&loader, &mut ctx);

        assert!(object.is_finalized());
        assert_eq!(object.template_engine(), Some("hbs"));
        assert_eq!(object.parsed_template(), Some("<p>Cart</p>"));
        assert_eq!(object.parsed_script(), Some("export default {}"));
    }

    #[test]
    fn test_options_ignored_after_finalize() {
        let (_dir, loader) = loader(&[]);
        let mut ctx = RenderContext::new();
        let mut object = VueObject::new("cart");
        assert!(object.merge_options(ObjectOptions::new().with_data("a", 1)));
        object.finalize(&loader, &mut ctx);

        assert!(!object.merge_options(ObjectOptions::new().with_data("b", 2)));
        assert_eq!(object.data_json(), r#"{"a":1}"#);
    }

    #[test]
    fn test_render_memoized() {
        let (dir, loader) = loader(&[("cart.vue", "<template>one</template>")]);
        let mut ctx = RenderContext::new();
        let mut object = VueObject::new("cart");
        object.finalize(&loader, &mut ctx);

        fs::write(dir.path().join("cart.vue"), "<template>two</template>").unwrap();
        object.finalize(&loader, &mut ctx);
        assert_eq!(object.render(&loader, &mut ctx), Some("<template>one</template>"));
        assert_eq!(object.parsed_template(), Some("one"));
    }

    #[test]
    fn test_missing_view_is_empty() {
        let (_dir, loader) = loader(&[]);
        let mut ctx = RenderContext::new();
        let mut object = VueObject::new("ghost");
        object.finalize(&loader, &mut ctx);

        assert_eq!(object.rendered_text(), None);
        assert_eq!(object.parsed_template(), None);
        assert_eq!(object.parsed_script(), None);
        assert_eq!(object.data_json(), "{}");
    }

    #[test]
    fn test_file_name_default() {
        let mut object = VueObject::new("cart");
        assert_eq!(object.file_name(), "cart");
        object.merge_options(ObjectOptions::new().with_file_name("shop/cart"));
        assert_eq!(object.file_name(), "shop/cart");
        assert_eq!(object.locals(), None);
        assert_eq!(object.data(), None);
    }
}
