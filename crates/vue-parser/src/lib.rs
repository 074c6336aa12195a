//! Inline Vue single file component parser.
//!
//! Rendered view text is split into a `<template>` fragment and a
//! `<script>` fragment with one regular expression. Neither fragment is
//! validated; both are opaque text for the code generator.

pub mod ast;
pub mod parser;

pub use ast::*;
pub use parser::parse_sfc;

/// Parse rendered SFC text.
pub fn parse(source: &str) -> Sfc {
    parse_sfc(source)
}
