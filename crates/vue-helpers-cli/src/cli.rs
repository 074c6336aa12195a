//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Render inline Vue components and their root app from a views directory
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "vue-helpers")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// View directory to search (repeatable, searched in order)
    #[arg(long = "views", value_name = "DIR")]
    pub views: Vec<PathBuf>,

    /// Path to vue-helpers.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Default template engine tag
    #[arg(short, long, value_name = "TAG")]
    pub engine: Option<String>,

    /// Root application name
    #[arg(short, long, value_name = "NAME")]
    pub root: Option<String>,

    /// Component to declare (repeatable, declared in order)
    #[arg(long = "component", value_name = "NAME")]
    pub components: Vec<String>,

    /// Inner HTML of the root mount point
    #[arg(long, value_name = "HTML")]
    pub block: Option<String>,

    /// Serve the bundle through the callback endpoint
    #[arg(long)]
    pub external: bool,

    /// Emit x-template blocks instead of template literals
    #[arg(long)]
    pub x_templates: bool,

    /// Register components locally on the root
    #[arg(long)]
    pub register_local: bool,

    /// Minify the bundle
    #[arg(long)]
    pub minify: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeatable_flags() {
        let args = Args::parse_from([
            "vue-helpers",
            "--views",
            "app/views",
            "--views",
            "shared",
            "--component",
            "cart",
            "--component",
            "price",
            "--x-templates",
            "-v",
        ]);
        assert_eq!(args.views.len(), 2);
        assert_eq!(args.components, vec!["cart", "price"]);
        assert!(args.x_templates);
        assert_eq!(args.log_level(), "debug");
    }
}
