//! Types produced by the inline SFC parser.

use std::ops::Range;

/// A rendered single file component split into its template and script text.
///
/// Either fragment may be missing. A component without a script is
/// template-only and contributes no JavaScript definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sfc {
    /// The full rendered source.
    pub content: String,
    /// The inner text of the `<template>` region, if present.
    pub template: Option<SfcBlock>,
    /// The inner text of the `<script>` region, if present.
    pub script: Option<SfcBlock>,
}

impl Sfc {
    /// Create an SFC with no fragments.
    pub fn new(content: String) -> Self {
        Self {
            content,
            ..Default::default()
        }
    }

    /// The template fragment text.
    pub fn template_content(&self) -> Option<&str> {
        self.template.as_ref().map(|b| b.content.as_str())
    }

    /// The script fragment text.
    pub fn script_content(&self) -> Option<&str> {
        self.script.as_ref().map(|b| b.content.as_str())
    }

    /// Check if the source had a `<script>` region.
    pub fn has_script(&self) -> bool {
        self.script.is_some()
    }

    /// Check if the source only had a `<template>` region.
    pub fn is_template_only(&self) -> bool {
        self.template.is_some() && self.script.is_none()
    }

    /// Check if neither region was found.
    pub fn is_empty(&self) -> bool {
        self.template.is_none() && self.script.is_none()
    }
}

/// One extracted region of the rendered source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SfcBlock {
    /// The text between the opening and closing tags.
    pub content: String,
    /// Byte range of `content` within [`Sfc::content`].
    pub range: Range<usize>,
}

impl SfcBlock {
    /// Create a block from the source and the byte range of its inner text.
    pub fn from_range(source: &str, range: Range<usize>) -> Self {
        Self {
            content: source[range.clone()].to_string(),
            range,
        }
    }
}

impl std::ops::Deref for SfcBlock {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.content
    }
}
