//! Helper entry points called from view code.
//!
//! A [`VueHelpers`] lives for one request. It owns the repository of
//! declared roots and components, the render context and the output
//! buffer. Blocks are closures that receive the helpers back, so they can
//! declare nested components and write output of their own.

use crate::component::VueComponent;
use crate::config::ExternalResource;
use crate::env::Environment;
use crate::error::{HelperError, HelperResult};
use crate::options::{JsOptions, ObjectOptions};
use crate::repository::VueRepository;
use crate::root::{RootSettings, VueRoot};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use vue_codegen::{interpolate, kebabize, Attributes};
use vue_loader::{
    ComponentDeclaration, Locals, OutputBuffer, OutputSink, OutputStyle, RenderContext,
};

/// Per-request helper state.
#[derive(Debug)]
pub struct VueHelpers {
    env: Arc<Environment>,
    repo: VueRepository,
    ctx: RenderContext,
}

impl VueHelpers {
    pub fn new(env: Arc<Environment>) -> Self {
        Self {
            env,
            repo: VueRepository::new(),
            ctx: RenderContext::new(),
        }
    }

    pub fn environment(&self) -> &Arc<Environment> {
        &self.env
    }

    /// Roots and components declared so far.
    pub fn vue_repository(&self) -> &VueRepository {
        &self.repo
    }

    pub fn render_context(&self) -> &RenderContext {
        &self.ctx
    }

    /// Root name used when a declaration names none.
    pub fn default_root_name(&self) -> &str {
        &self.env.config().root_name
    }

    /// The engine of the template being rendered, if any.
    pub fn current_engine(&self) -> Option<&str> {
        self.ctx.current_engine()
    }

    /// Capture style of the current engine; generic outside any template.
    pub fn output_style(&self) -> OutputStyle {
        self.env.loader().output_style(self.ctx.current_engine())
    }

    /// Run `f` as if a template of engine `tag` were rendering.
    pub fn with_engine<T>(&mut self, tag: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.ctx.push_engine(tag);
        let mut scope = EngineScope { helpers: self };
        f(&mut *scope)
    }

    /// Run `block` and return what it produced, per the current output
    /// style. Text the block wrote to the buffer is taken back out.
    pub fn capture_html<F>(&mut self, block: F) -> String
    where
        F: FnOnce(&mut Self) -> String,
    {
        let style = self.output_style();
        style.capture(self, block)
    }

    /// Place helper output per the current output style.
    ///
    /// Buffered styles append `text` to the buffer and return an empty
    /// string; the generic style returns `text`.
    pub fn concat_content(&mut self, text: impl Into<String>) -> String {
        let style = self.output_style();
        style.emit(self, text.into()).unwrap_or_default()
    }

    /// Write template output straight to the buffer.
    pub fn write(&mut self, text: &str) {
        self.ctx.output().write(text);
    }

    /// Drain the output buffer.
    pub fn take_output(&mut self) -> String {
        self.ctx.output().take()
    }

    /// Get or create the root `name` and merge `options` into it.
    ///
    /// The root's view is loaded when the app renders.
    pub fn vue_root(&mut self, name: &str, options: ObjectOptions) -> HelperResult<&mut VueRoot> {
        let root = self.repo.root(name)?;
        root.merge_options(options);
        Ok(root)
    }

    /// Declare a component call site.
    pub fn vue_component(&mut self, name: impl Into<String>) -> ComponentCall<'_> {
        ComponentCall {
            helpers: self,
            name: name.into(),
            tag_name: None,
            attributes: Attributes::new(),
            options: ObjectOptions::new(),
        }
    }

    /// Declare a root application and its mount point.
    pub fn vue_app(&mut self, name: impl Into<String>) -> AppCall<'_> {
        AppCall {
            helpers: self,
            name: name.into(),
            options: ObjectOptions::new(),
        }
    }

    /// Compile the bundle of root `name` without emitting it.
    pub fn compile_app_js(&self, name: &str) -> HelperResult<String> {
        let root = self.declared_root(name)?;
        let settings = root.settings(self.env.config());
        Ok(root.compile_app_js(
            self.repo.components_of(name),
            &settings,
            &self.env.config().wrappers,
            self.env.minifier(),
        ))
    }

    fn declared_root(&self, name: &str) -> HelperResult<&VueRoot> {
        self.repo
            .get_root(name)
            .ok_or_else(|| HelperError::NotDeclared {
                name: name.to_string(),
                kind: "root",
            })
    }

    fn declare_component(&mut self, name: &str, mut options: ObjectOptions) -> HelperResult<()> {
        let root_name = options
            .root_name
            .take()
            .unwrap_or_else(|| self.env.config().root_name.clone());
        self.repo.root(&root_name)?;

        let component = self.repo.component(name)?;
        options.root_name = Some(root_name.clone());
        component.merge_options(options);
        let nested = component.finalize(self.env.loader(), &mut self.ctx);
        let engine = component.template_engine().map(str::to_string);
        self.declare_nested(nested, &root_name, engine.as_deref())
    }

    fn declare_app(&mut self, name: &str, options: ObjectOptions) -> HelperResult<()> {
        let root = self.repo.root(name)?;
        root.merge_options(options);
        let nested = root.finalize(self.env.loader(), &mut self.ctx);
        let engine = root.template_engine().map(str::to_string);
        self.declare_nested(nested, name, engine.as_deref())
    }

    /// Declare components called from inside a rendered view, with the
    /// view's engine current. They join the declaring object's root unless
    /// they name their own.
    fn declare_nested(
        &mut self,
        nested: Vec<ComponentDeclaration>,
        root_name: &str,
        engine: Option<&str>,
    ) -> HelperResult<()> {
        if nested.is_empty() {
            return Ok(());
        }
        match engine {
            Some(tag) => self.with_engine(tag, |h| h.declare_each(nested, root_name)),
            None => self.declare_each(nested, root_name),
        }
    }

    fn declare_each(
        &mut self,
        nested: Vec<ComponentDeclaration>,
        root_name: &str,
    ) -> HelperResult<()> {
        for declaration in nested {
            let options = ObjectOptions {
                root_name: Some(declaration.root_name.unwrap_or_else(|| root_name.to_string())),
                file_name: declaration.file_name,
                template_engine: declaration.template_engine,
                ..ObjectOptions::default()
            };
            tracing::debug!(name = %declaration.name, root = root_name, "nested component");
            self.declare_component(&declaration.name, options)?;
        }
        Ok(())
    }

    /// The script markup for root `name`: x-templates when templates are
    /// not literals, then the inline bundle or its external script tag.
    fn root_script_output(&self, name: &str) -> HelperResult<String> {
        let compiled = self.compile_app_js(name)?;
        let config = self.env.config();
        let settings: RootSettings = self.declared_root(name)?.settings(config);

        let mut output = String::new();
        if !settings.template_literal {
            output.push_str(&VueRoot::x_templates(
                self.repo.components_of(name),
                &config.wrappers,
            ));
        }

        if settings.external_resource.is_enabled() {
            let key = self.env.cache().insert(compiled);
            output.push_str(&interpolate(
                &config.wrappers.external_resource_html,
                &[
                    ("callback_prefix", config.callback_prefix.as_str()),
                    ("key", key.as_str()),
                ],
            ));
        } else {
            output.push_str(&interpolate(
                &config.wrappers.inline_script_html,
                &[("compiled", compiled.as_str())],
            ));
        }
        Ok(output)
    }
}

impl OutputSink for VueHelpers {
    fn output(&mut self) -> &mut OutputBuffer {
        self.ctx.output()
    }
}

/// Pops the engine pushed by [`VueHelpers::with_engine`].
struct EngineScope<'a> {
    helpers: &'a mut VueHelpers,
}

impl Deref for EngineScope<'_> {
    type Target = VueHelpers;

    fn deref(&self) -> &VueHelpers {
        self.helpers
    }
}

impl DerefMut for EngineScope<'_> {
    fn deref_mut(&mut self) -> &mut VueHelpers {
        self.helpers
    }
}

impl Drop for EngineScope<'_> {
    fn drop(&mut self) {
        self.helpers.ctx.pop_engine();
    }
}

/// Builder for one component call site, from [`VueHelpers::vue_component`].
#[must_use = "a component call does nothing until rendered"]
pub struct ComponentCall<'h> {
    helpers: &'h mut VueHelpers,
    name: String,
    tag_name: Option<String>,
    attributes: Attributes,
    options: ObjectOptions,
}

impl<'h> ComponentCall<'h> {
    /// Attach the component to a root other than the default one.
    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.options.root_name = Some(name.into());
        self
    }

    /// Render this element instead, with `is` pointing at the component.
    pub fn tag_name(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = Some(tag.into());
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attributes<K, V>(mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Load the view from this file name instead of the component name.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.options.file_name = Some(name.into());
        self
    }

    /// Locals for rendering the view.
    pub fn locals(mut self, locals: Locals) -> Self {
        self.options.locals = Some(locals);
        self
    }

    pub fn local(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options = self.options.with_local(key, value);
        self
    }

    pub fn template_engine(mut self, tag: impl Into<String>) -> Self {
        self.options.template_engine = Some(tag.into());
        self
    }

    /// Add a `data` entry to the component definition.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options = self.options.with_data(key, value);
        self
    }

    /// Render the mount tag with no inner content.
    pub fn render(mut self) -> HelperResult<String> {
        self.declare()?;
        self.markup("")
    }

    /// Render the mount tag around the captured output of `block`.
    ///
    /// The tag is placed through the current output style.
    pub fn render_with<F>(mut self, block: F) -> HelperResult<String>
    where
        F: FnOnce(&mut VueHelpers) -> String,
    {
        self.declare()?;
        let content = self.helpers.capture_html(block);
        let html = self.markup(&content)?;
        Ok(self.helpers.concat_content(html))
    }

    fn declare(&mut self) -> HelperResult<()> {
        let options = std::mem::take(&mut self.options);
        self.helpers.declare_component(&self.name, options)
    }

    fn markup(&self, block_content: &str) -> HelperResult<String> {
        let component: &VueComponent = self
            .helpers
            .repo
            .get_component(&self.name)
            .ok_or_else(|| HelperError::NotDeclared {
                name: self.name.clone(),
                kind: "component",
            })?;
        Ok(component.render_call(
            &self.helpers.env.config().wrappers,
            self.tag_name.as_deref(),
            &self.attributes,
            block_content,
        ))
    }
}

/// Builder for a root application, from [`VueHelpers::vue_app`].
#[must_use = "an app call does nothing until rendered"]
pub struct AppCall<'h> {
    helpers: &'h mut VueHelpers,
    name: String,
    options: ObjectOptions,
}

impl<'h> AppCall<'h> {
    /// Serve the bundle through the callback endpoint under the configured
    /// callback prefix. Any string enables it too.
    pub fn external_resource(mut self, external: impl Into<ExternalResource>) -> Self {
        self.options.external_resource = Some(external.into());
        self
    }

    pub fn template_literal(mut self, literal: bool) -> Self {
        self.options.template_literal = Some(literal);
        self
    }

    pub fn register_local(mut self, local: bool) -> Self {
        self.options.register_local = Some(local);
        self
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.options.minify = Some(minify);
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options = self.options.with_data(key, value);
        self
    }

    /// Add a watcher; `js` is inserted verbatim.
    pub fn watch(mut self, key: impl Into<String>, js: impl Into<String>) -> Self {
        self.options = self.options.with_watch(key, js);
        self
    }

    /// Add a computed property; `js` is inserted verbatim.
    pub fn computed(mut self, key: impl Into<String>, js: impl Into<String>) -> Self {
        self.options = self.options.with_computed(key, js);
        self
    }

    /// Replace all watchers at once.
    pub fn watchers(mut self, watch: JsOptions) -> Self {
        self.options.watch = Some(watch);
        self
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.options.file_name = Some(name.into());
        self
    }

    pub fn locals(mut self, locals: Locals) -> Self {
        self.options.locals = Some(locals);
        self
    }

    pub fn local(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options = self.options.with_local(key, value);
        self
    }

    pub fn template_engine(mut self, tag: impl Into<String>) -> Self {
        self.options.template_engine = Some(tag.into());
        self
    }

    /// Render the app's script output.
    ///
    /// When the root's view has a `<template>`, it becomes the mount point
    /// content.
    pub fn render(self) -> HelperResult<String> {
        self.run(None::<fn(&mut VueHelpers) -> String>)
    }

    /// Render the mount point around the captured output of `block`,
    /// followed by the script output.
    ///
    /// Components declared inside the block are part of the bundle. The
    /// result is placed through the current output style.
    pub fn render_with<F>(self, block: F) -> HelperResult<String>
    where
        F: FnOnce(&mut VueHelpers) -> String,
    {
        self.run(Some(block))
    }

    fn run<F>(self, block: Option<F>) -> HelperResult<String>
    where
        F: FnOnce(&mut VueHelpers) -> String,
    {
        let AppCall {
            helpers,
            name,
            options,
        } = self;
        helpers.declare_app(&name, options)?;

        let has_block = block.is_some();
        let block_content = match block {
            Some(block) => Some(helpers.capture_html(block)),
            None => helpers
                .declared_root(&name)?
                .parsed_template()
                .map(str::to_string),
        };

        let root_script_output = helpers.root_script_output(&name)?;
        tracing::debug!(
            root = %name,
            block = has_block,
            style = %helpers.output_style(),
            "app rendered"
        );

        let Some(block_content) = block_content else {
            return Ok(root_script_output);
        };
        let root_id = kebabize(&name);
        let html = interpolate(
            &helpers.env.config().wrappers.root_app_html,
            &[
                ("root_name", root_id.as_str()),
                ("block_content", block_content.as_str()),
                ("root_script_output", root_script_output.as_str()),
            ],
        );
        if has_block {
            Ok(helpers.concat_content(html))
        } else {
            Ok(html)
        }
    }
}
