//! Single-pass extraction of the template and script regions.
//!
//! The pattern is greedy and unaware of nesting: a `</template>` or
//! `</script>` inside a captured region moves the boundary to the last
//! occurrence. Besides the template-then-script form, a second branch
//! accepts template-only text, so views without a script still yield their
//! template.

use crate::ast::{Sfc, SfcBlock};
use once_cell::sync::Lazy;
use regex::Regex;

/// Template then script, or template alone when no script region exists.
///
/// Groups 2 and 4 hold the template and script of the first branch, group 5
/// the template of the template-only branch.
static SFC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)\A(?:(.*<template>(.*)</template>)*.*(<script>(.*)</script>)|.*<template>(.*)</template>)",
    )
    .expect("SFC pattern is valid")
});

/// Parse rendered SFC text.
///
/// Never fails: text without recognizable regions yields an empty [`Sfc`].
pub fn parse_sfc(source: &str) -> Sfc {
    let mut sfc = Sfc::new(source.to_string());

    let Some(caps) = SFC_PATTERN.captures(source) else {
        return sfc;
    };

    if let Some(script) = caps.get(4) {
        sfc.script = Some(SfcBlock::from_range(source, script.range()));
        sfc.template = caps
            .get(2)
            .map(|m| SfcBlock::from_range(source, m.range()));
    } else if let Some(template) = caps.get(5) {
        sfc.template = Some(SfcBlock::from_range(source, template.range()));
    }

    sfc
}
