//! Error types for template loading and rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Why a template could not be loaded or rendered.
///
/// These never reach helper callers: the loader logs them and reports the
/// template as absent.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No file matched the name under any views root.
    #[error("template `{0}` not found in views path")]
    NotFound(String),

    /// The engine tag has no registered engine.
    #[error("no template engine registered for `{0}`")]
    UnknownEngine(String),

    /// An inline source with neither an explicit nor a current engine.
    #[error("template engine could not be determined")]
    UndeterminedEngine,

    /// Reading the template file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine rejected the template or its locals.
    #[error("{engine} render failed: {message}")]
    Render { engine: String, message: String },
}

impl LoadError {
    /// Create a render error for an engine.
    pub fn render(engine: impl Into<String>, message: impl ToString) -> Self {
        Self::Render {
            engine: engine.into(),
            message: message.to_string(),
        }
    }

    /// Get the error kind as a string, for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not-found",
            Self::UnknownEngine(_) => "unknown-engine",
            Self::UndeterminedEngine => "undetermined-engine",
            Self::Io { .. } => "io",
            Self::Render { .. } => "render",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LoadError::NotFound("card".into());
        assert_eq!(err.to_string(), "template `card` not found in views path");
        assert_eq!(err.kind(), "not-found");

        let err = LoadError::render("hbs", "unclosed tag");
        assert_eq!(err.to_string(), "hbs render failed: unclosed tag");
    }
}
