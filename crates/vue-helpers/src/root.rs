//! Vue root applications and their bundles.

use crate::component::VueComponent;
use crate::config::{ExternalResource, HelperConfig};
use crate::object::VueObject;
use crate::options::ObjectOptions;
use std::ops::{Deref, DerefMut};
use vue_codegen::{bundle, CodegenOptions, Minifier, RootObject, Wrappers};

/// Root options resolved against the helper configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSettings {
    pub external_resource: ExternalResource,
    pub template_literal: bool,
    pub register_local: bool,
    pub minify: bool,
}

impl RootSettings {
    /// Options win over configuration defaults.
    pub fn resolve(options: &ObjectOptions, config: &HelperConfig) -> Self {
        Self {
            external_resource: options
                .external_resource
                .clone()
                .unwrap_or_else(|| config.external_resource.clone()),
            template_literal: options.template_literal.unwrap_or(config.template_literal),
            register_local: options.register_local.unwrap_or(config.register_local),
            minify: options.minify.unwrap_or(config.minify),
        }
    }

    /// Code generation options for the root's components.
    pub fn codegen(&self) -> CodegenOptions {
        CodegenOptions {
            register_local: self.register_local,
            template_literal: self.template_literal,
        }
    }
}

/// A root application declared in the current request.
#[derive(Debug)]
pub struct VueRoot {
    object: VueObject,
}

impl VueRoot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            object: VueObject::new(name),
        }
    }

    /// Resolve this root's settings.
    pub fn settings(&self, config: &HelperConfig) -> RootSettings {
        RootSettings::resolve(self.options(), config)
    }

    /// Build the bundle: every component definition in order, then the
    /// root's own script or the default root instance.
    pub fn compile_app_js<'a>(
        &self,
        components: impl IntoIterator<Item = &'a VueComponent>,
        settings: &RootSettings,
        wrappers: &Wrappers,
        minifier: &dyn Minifier,
    ) -> String {
        let codegen = settings.codegen();
        let mut names = Vec::new();
        let mut definitions = Vec::new();
        for component in components {
            if let Some(js) = component.to_component_js(&codegen) {
                names.push(component.js_var_name());
                definitions.push(js);
            }
        }

        let root_script = match self.parsed_script().map(str::trim) {
            Some(script) if !script.is_empty() => script.to_string(),
            _ => {
                let data_json = self.data_json();
                RootObject {
                    name: self.name(),
                    components: names,
                    data_json: &data_json,
                    watch: self.watch(),
                    computed: self.computed(),
                }
                .to_js(wrappers)
            }
        };

        let js = bundle(definitions.iter().map(String::as_str), &root_script);
        tracing::debug!(
            root = %self.name(),
            components = definitions.len(),
            minify = settings.minify,
            "app compiled"
        );
        if settings.minify {
            minifier.minify(&js)
        } else {
            js
        }
    }

    /// x-template blocks for every component with a template.
    pub fn x_templates<'a>(
        components: impl IntoIterator<Item = &'a VueComponent>,
        wrappers: &Wrappers,
    ) -> String {
        components
            .into_iter()
            .filter_map(|component| component.x_template(wrappers))
            .collect()
    }
}

impl Deref for VueRoot {
    type Target = VueObject;

    fn deref(&self) -> &VueObject {
        &self.object
    }
}

impl DerefMut for VueRoot {
    fn deref_mut(&mut self) -> &mut VueObject {
        &mut self.object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;
    use vue_codegen::WhitespaceMinifier;
    use vue_loader::{RenderContext, TemplateLoader};

    struct Views {
        _dir: TempDir,
        loader: TemplateLoader,
    }

    impl Views {
        fn new(files: &[(&str, &str)]) -> Self {
            let dir = TempDir::new().unwrap();
            for (name, text) in files {
                fs::write(dir.path().join(name), text).unwrap();
            }
            let loader = TemplateLoader::new([dir.path()]).with_default_engine("html");
            Self { _dir: dir, loader }
        }

        fn component(&self, name: &str) -> VueComponent {
            let mut component = VueComponent::new(name);
            component.finalize(&self.loader, &mut RenderContext::new());
            component
        }

        fn root(&self, name: &str, options: ObjectOptions) -> VueRoot {
            let mut root = VueRoot::new(name);
            root.merge_options(options);
            root.finalize(&self.loader, &mut RenderContext::new());
            root
        }
    }

    #[test]
    fn test_default_root_without_components() {
        let views = Views::new(&[]);
        let root = views.root("vue-app", ObjectOptions::new());
        let settings = root.settings(&HelperConfig::default());
        let js = root.compile_app_js([], &settings, &Wrappers::default(), &WhitespaceMinifier);
        assert_eq!(
            js,
            r##"var VueApp = new Vue({el: ("#vue-app"), components: {}, data: {}})"##
        );
    }

    #[test]
    fn test_components_in_order_and_listed() {
        let views = Views::new(&[
            ("b-item.vue", "<template>B</template><script>export default {b:1}</script>"),
            ("a-item.vue", "<template>A</template><script>export default {a:1}</script>"),
            ("no-js.vue", "<template>C</template>"),
        ]);
        let components = [
            views.component("b-item"),
            views.component("a-item"),
            views.component("no-js"),
        ];
        let root = views.root("shop", ObjectOptions::new().with_data("open", true));
        let settings = root.settings(&HelperConfig::default());
        let js = root.compile_app_js(
            &components,
            &settings,
            &Wrappers::default(),
            &WhitespaceMinifier,
        );

        assert_eq!(
            js,
            [
                r#"var BItem = Vue.component("BItem", {template: `B`, b:1});"#,
                r#"var AItem = Vue.component("AItem", {template: `A`, a:1});"#,
                r##"var Shop = new Vue({el: ("#shop"), components: {BItem: BItem, AItem: AItem}, data: {"open":true}})"##,
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_root_script_replaces_default() {
        let views = Views::new(&[("admin.vue", "<script>\n  new Vue({el: '#admin'})\n</script>")]);
        let root = views.root("admin", ObjectOptions::new());
        let settings = root.settings(&HelperConfig::default());
        let js = root.compile_app_js([], &settings, &Wrappers::default(), &WhitespaceMinifier);
        assert_eq!(js, "new Vue({el: '#admin'})");
    }

    #[test]
    fn test_minify_and_x_templates() {
        let views = Views::new(&[(
            "card.vue",
            "<template><p>hi</p></template><script>\nexport default {\n    props: []\n}\n</script>",
        )]);
        let components = [views.component("card")];
        let root = views.root(
            "vue-app",
            ObjectOptions::new().with_minify(true).with_template_literal(false),
        );
        let settings = root.settings(&HelperConfig::default());
        let js = root.compile_app_js(
            &components,
            &settings,
            &Wrappers::default(),
            &WhitespaceMinifier,
        );
        assert_eq!(
            js,
            "var Card = Vue.component(\"Card\", {template: '#card-template',\nprops: []\n});\nvar VueApp = new Vue({el: (\"#vue-app\"), components: {Card: Card}, data: {}})"
        );

        let templates = VueRoot::x_templates(&components, &Wrappers::default());
        assert_eq!(
            templates,
            "<script type=\"text/x-template\" id=\"card-template\"><p>hi</p></script>\n"
        );
    }

    #[test]
    fn test_settings_resolution() {
        let config = HelperConfig::default().with_external_resource(true).with_minify(true);
        let settings = RootSettings::resolve(&ObjectOptions::new().with_minify(false), &config);
        assert_eq!(settings.external_resource, ExternalResource::Enabled(true));
        assert!(!settings.minify);
        assert!(settings.template_literal);
    }
}
