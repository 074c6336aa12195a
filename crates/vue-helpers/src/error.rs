//! Error types for the helper entry points.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for helper operations.
pub type HelperResult<T> = Result<T, HelperError>;

/// Errors surfaced to helper callers.
///
/// Missing views and template failures are not errors: they are logged and
/// the object simply has no SFC content.
#[derive(Debug, Error)]
pub enum HelperError {
    /// A root and a component were declared under the same name.
    #[error("`{name}` is already declared as a {existing}, not a {requested}")]
    NameConflict {
        name: String,
        existing: &'static str,
        requested: &'static str,
    },

    /// No root or component of that kind was declared under the name.
    #[error("no {kind} named `{name}` has been declared")]
    NotDeclared { name: String, kind: &'static str },

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl HelperError {
    /// Get the error kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameConflict { .. } => "name-conflict",
            Self::NotDeclared { .. } => "not-declared",
            Self::Config(_) => "config",
        }
    }
}

/// Errors reading a `vue-helpers.json` file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
