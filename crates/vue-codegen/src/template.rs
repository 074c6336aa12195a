//! Component template placement: inline literal or x-template block.

use crate::helpers::{escape_backticks, html_attributes, interpolate, kebabize, Attributes};
use crate::wrappers::Wrappers;

/// The `template:` value of a component definition.
///
/// A literal embeds the escaped template in backticks; otherwise the value
/// is a CSS id selector for the component's x-template block.
pub fn template_spec(name: &str, template: Option<&str>, template_literal: bool) -> String {
    if template_literal {
        format!("`{}`", escape_backticks(template.unwrap_or_default()))
    } else {
        format!("'#{}-template'", kebabize(name))
    }
}

/// The out-of-band `<script type="text/x-template">` block for a component.
pub fn x_template(wrappers: &Wrappers, name: &str, template: &str) -> String {
    let id = kebabize(name);
    interpolate(
        &wrappers.x_template_html,
        &[("name", id.as_str()), ("template", template)],
    )
}

/// Markup for one component call site.
///
/// A `tag_name` renders that element instead and points it at the component
/// with a trailing `is` attribute.
pub fn component_call(
    wrappers: &Wrappers,
    name: &str,
    tag_name: Option<&str>,
    attributes: &Attributes,
    block_content: &str,
) -> String {
    let mut attributes = attributes.clone();
    if tag_name.is_some() {
        attributes.insert("is".to_string(), name.to_string());
    }
    let el_name = kebabize(tag_name.unwrap_or(name));
    let attributes_string = html_attributes(&attributes);

    interpolate(
        &wrappers.component_call_html,
        &[
            ("el_name", el_name.as_str()),
            ("attributes_string", attributes_string.as_str()),
            ("block_content", block_content),
            ("name", name),
            ("tag_name", tag_name.unwrap_or_default()),
        ],
    )
}
