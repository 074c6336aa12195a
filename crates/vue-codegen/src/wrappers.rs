//! HTML and JS wrapper templates.
//!
//! Every wrapper is a format string with `#{name}` placeholders, filled by
//! [`crate::helpers::interpolate`].

use serde::{Deserialize, Serialize};

/// The configurable markup around generated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wrappers {
    /// Component call site. Placeholders: `el_name`, `attributes_string`,
    /// `block_content`, `name`, `tag_name`.
    pub component_call_html: String,
    /// Inline bundle. Placeholders: `compiled`.
    pub inline_script_html: String,
    /// Bundle served through the callback endpoint. Placeholders:
    /// `callback_prefix`, `key`.
    pub external_resource_html: String,
    /// Root mount point. Placeholders: `root_name`, `block_content`,
    /// `root_script_output`.
    pub root_app_html: String,
    /// Out-of-band component template. Placeholders: `name`, `template`.
    pub x_template_html: String,
    /// Default root instance. Placeholders: `app_name`, `root_name`,
    /// `components`, `vue_data_json`, `vue_options`.
    pub root_object_js: String,
}

impl Default for Wrappers {
    fn default() -> Self {
        Self {
            component_call_html: "<#{el_name}#{attributes_string}>#{block_content}</#{el_name}>"
                .to_string(),
            inline_script_html: "<script>\n#{compiled}\n</script>\n".to_string(),
            external_resource_html: "<script src=\"#{callback_prefix}/#{key}\"></script>\n"
                .to_string(),
            root_app_html: "<div id=\"#{root_name}\">#{block_content}</div>\n#{root_script_output}"
                .to_string(),
            x_template_html:
                "<script type=\"text/x-template\" id=\"#{name}-template\">#{template}</script>\n"
                    .to_string(),
            root_object_js: "var #{app_name} = new Vue({el: (\"##{root_name}\"), components: {#{components}}, data: #{vue_data_json}#{vue_options}})"
                .to_string(),
        }
    }
}

impl Wrappers {
    /// Replace the component call markup.
    pub fn with_component_call_html(mut self, html: impl Into<String>) -> Self {
        self.component_call_html = html.into();
        self
    }

    /// Replace the inline script markup.
    pub fn with_inline_script_html(mut self, html: impl Into<String>) -> Self {
        self.inline_script_html = html.into();
        self
    }

    /// Replace the external script markup.
    pub fn with_external_resource_html(mut self, html: impl Into<String>) -> Self {
        self.external_resource_html = html.into();
        self
    }

    /// Replace the root mount markup.
    pub fn with_root_app_html(mut self, html: impl Into<String>) -> Self {
        self.root_app_html = html.into();
        self
    }

    /// Replace the x-template markup.
    pub fn with_x_template_html(mut self, html: impl Into<String>) -> Self {
        self.x_template_html = html.into();
        self
    }

    /// Replace the default root object.
    pub fn with_root_object_js(mut self, js: impl Into<String>) -> Self {
        self.root_object_js = js.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let wrappers: Wrappers =
            serde_json::from_str(r##"{"inline_script_html": "<p>#{compiled}</p>"}"##).unwrap();
        assert_eq!(wrappers.inline_script_html, "<p>#{compiled}</p>");
        assert_eq!(
            wrappers.component_call_html,
            Wrappers::default().component_call_html
        );
    }

    #[test]
    fn test_builder() {
        let wrappers = Wrappers::default().with_root_app_html("<main>#{block_content}</main>");
        assert_eq!(wrappers.root_app_html, "<main>#{block_content}</main>");
    }
}
