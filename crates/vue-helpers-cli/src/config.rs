//! Configuration loading and CLI overrides.

use crate::cli::Args;
use miette::{IntoDiagnostic, Result};
use std::path::Path;
use vue_helpers::HelperConfig;

/// Load the config file, then apply command-line overrides.
///
/// An explicit `--config` must exist; otherwise `vue-helpers.json` is looked
/// up from `cwd` upwards and defaults are used when there is none.
pub fn load(cwd: &Path, args: &Args) -> Result<HelperConfig> {
    let path = args.config.clone().or_else(|| HelperConfig::find(cwd));
    let config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            HelperConfig::load(&path).into_diagnostic()?
        }
        None => HelperConfig::default(),
    };
    Ok(apply_overrides(config, args))
}

/// Command-line flags win over the config file.
pub fn apply_overrides(mut config: HelperConfig, args: &Args) -> HelperConfig {
    if !args.views.is_empty() {
        config.views_path = args.views.clone();
    }
    if let Some(engine) = &args.engine {
        config.template_engine = engine.clone();
    }
    if let Some(root) = &args.root {
        config.root_name = root.clone();
    }
    if args.external {
        config.external_resource = true.into();
    }
    if args.x_templates {
        config.template_literal = false;
    }
    if args.register_local {
        config.register_local = true;
    }
    if args.minify {
        config.minify = true;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_cli_over_file_over_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("vue-helpers.json"),
            r#"{"root_name": "shop", "template_engine": "jinja", "minify": true}"#,
        )
        .unwrap();
        let args = Args {
            engine: Some("html".into()),
            views: vec![PathBuf::from("views")],
            ..Default::default()
        };

        let config = load(dir.path(), &args).unwrap();
        assert_eq!(config.root_name, "shop");
        assert_eq!(config.template_engine, "html");
        assert!(config.minify);
        assert_eq!(config.views_path, vec![PathBuf::from("views")]);
        assert_eq!(config.callback_prefix, "/vuecallback");
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = TempDir::new().unwrap();
        let args = Args {
            config: Some(dir.path().join("nope.json")),
            ..Default::default()
        };
        assert!(load(dir.path(), &args).is_err());
    }
}
