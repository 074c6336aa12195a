//! Component script rewriting.
//!
//! The script's `export default {` (or an existing `Vue.component(..., {`
//! call) is replaced with a registration that carries the template. The
//! object body after the opening brace is kept verbatim.

use crate::helpers::camelize;
use crate::template::template_spec;
use crate::CodegenOptions;
use once_cell::sync::Lazy;
use regex::Regex;

static EXPORT_DEFAULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)export\s+default\s*(\{|Vue.component\s*\([^\{]*\{)(.*$)")
        .expect("export pattern is valid")
});

/// Inputs for one component definition.
#[derive(Debug, Clone, Copy)]
pub struct ComponentSource<'a> {
    /// Declared component name.
    pub name: &'a str,
    /// Parsed template fragment.
    pub template: Option<&'a str>,
    /// Parsed script fragment.
    pub script: Option<&'a str>,
    /// Component data as a JSON object, injected as a data function.
    pub data_json: Option<&'a str>,
}

impl<'a> ComponentSource<'a> {
    /// Create a source with a name and no fragments.
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            template: None,
            script: None,
            data_json: None,
        }
    }

    /// Set the template fragment.
    pub fn template(mut self, template: Option<&'a str>) -> Self {
        self.template = template;
        self
    }

    /// Set the script fragment.
    pub fn script(mut self, script: Option<&'a str>) -> Self {
        self.script = script;
        self
    }

    /// Set the data object.
    pub fn data_json(mut self, data_json: Option<&'a str>) -> Self {
        self.data_json = data_json;
        self
    }
}

/// Compile a component to its JS definition.
///
/// Returns `None` when there is no script, or when the script has no default
/// export to rewrite; such a component only contributes markup.
pub fn compile_component(
    source: &ComponentSource<'_>,
    options: &CodegenOptions,
) -> Option<String> {
    let script = source.script?;
    let caps = EXPORT_DEFAULT.captures(script)?;
    let whole = caps.get(0)?;

    let var_name = camelize(source.name);
    let spec = template_spec(source.name, source.template, options.template_literal);
    let data = source
        .data_json
        .map(|json| format!("data: function(){{return {};}}, ", json))
        .unwrap_or_default();
    let rest = caps.get(2).map(|m| m.as_str()).unwrap_or_default().trim_end();

    let registration = if options.register_local {
        format!("var {var_name} = {{template: {spec}, {data}{rest};")
    } else {
        format!("var {var_name} = Vue.component(\"{var_name}\", {{template: {spec}, {data}{rest});")
    };

    let mut js = String::with_capacity(whole.start() + registration.len());
    js.push_str(&script[..whole.start()]);
    js.push_str(&registration);
    Some(js.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn global() -> CodegenOptions {
        CodegenOptions::default()
    }

    #[test]
    fn test_global_registration() {
        let source = ComponentSource::new("my-card")
            .template(Some("X"))
            .script(Some("export default {a:1}"));
        let js = compile_component(&source, &global()).unwrap();
        insta::assert_snapshot!(js, @r#"var MyCard = Vue.component("MyCard", {template: `X`, a:1});"#);
    }

    #[test]
    fn test_local_registration() {
        let options = CodegenOptions {
            register_local: true,
            ..Default::default()
        };
        let source = ComponentSource::new("my-card")
            .template(Some("X"))
            .script(Some("export default {a:1}"));
        let js = compile_component(&source, &options).unwrap();
        assert_eq!(js, "var MyCard = {template: `X`, a:1};");
    }

    #[test]
    fn test_x_template_reference() {
        let options = CodegenOptions {
            template_literal: false,
            ..Default::default()
        };
        let source = ComponentSource::new("MyCard")
            .template(Some("X"))
            .script(Some("export default {a:1}"));
        let js = compile_component(&source, &options).unwrap();
        assert!(js.contains("template: '#my-card-template'"));
        assert!(js.contains("a:1"));
    }

    #[test]
    fn test_backticks_escaped_in_literal() {
        let source = ComponentSource::new("c")
            .template(Some("<p>`quoted`</p>"))
            .script(Some("export default {}"));
        let js = compile_component(&source, &global()).unwrap();
        assert!(js.contains(r"template: `<p>\`quoted\`</p>`"));
    }

    #[test]
    fn test_existing_vue_component_call() {
        let source = ComponentSource::new("list-item")
            .template(Some("<li></li>"))
            .script(Some("export default Vue.component('old-name', {props: ['x']})"));
        let js = compile_component(&source, &global()).unwrap();
        assert_eq!(
            js,
            "var ListItem = Vue.component(\"ListItem\", {template: `<li></li>`, props: ['x']}));"
        );
    }

    #[test]
    fn test_preserves_text_before_export() {
        let script = "\nvar helper = function(){ return 1; };\nexport default {\n  methods: {helper: helper}\n}\n";
        let source = ComponentSource::new("widget").template(Some("")).script(Some(script));
        let js = compile_component(&source, &global()).unwrap();
        let hoisted = "var helper = function(){ return 1; };\nvar Widget = Vue.component(";
        assert!(js.starts_with(hoisted));
        assert!(js.ends_with("methods: {helper: helper}\n});"));
    }

    #[test]
    fn test_data_function_injected() {
        let source = ComponentSource::new("counter")
            .template(Some("{{ n }}"))
            .script(Some("export default {}"))
            .data_json(Some(r#"{"n":1}"#));
        let js = compile_component(&source, &global()).unwrap();
        assert!(js.contains(r#"{template: `{{ n }}`, data: function(){return {"n":1};}, }"#));
    }

    #[test]
    fn test_no_script_no_definition() {
        let source = ComponentSource::new("plain").template(Some("<p></p>"));
        assert!(compile_component(&source, &global()).is_none());
    }

    #[test]
    fn test_script_without_export() {
        let source = ComponentSource::new("plain").script(Some("console.log(1)"));
        assert!(compile_component(&source, &global()).is_none());
    }
}
