//! Text helpers shared by the code generators.

use heck::{ToKebabCase, ToUpperCamelCase};
use indexmap::IndexMap;

/// HTML attributes of a component call, serialized in insertion order.
pub type Attributes = IndexMap<String, String>;

/// Substitute `#{name}` placeholders with the given values.
///
/// Placeholders without a value are left untouched, as is an unterminated
/// `#{`. Substituted values are not scanned again.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("#{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 3]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// JavaScript identifier for a component or root name (`my-list` -> `MyList`).
pub fn camelize(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Tag name and CSS id form of a name (`MyList` -> `my-list`).
pub fn kebabize(name: &str) -> String {
    name.to_kebab_case()
}

/// Escape backticks so the text can sit inside a JS template literal.
pub fn escape_backticks(text: &str) -> String {
    text.replace('`', "\\`")
}

/// Escape an HTML attribute value for a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Serialize attributes as ` key="value"` pairs, each with a leading space.
pub fn html_attributes(attributes: &Attributes) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!(" {}=\"{}\"", key, escape_attr(value)))
        .collect()
}

/// Render a map of raw JS expressions as an object literal.
pub fn js_object(entries: &IndexMap<String, String>) -> String {
    let body = entries
        .iter()
        .map(|(key, expr)| format!("{}: {}", key, expr))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", body)
}
