//! View lookup and rendering for inline Vue components.
//!
//! Finds `.vue` view files breadth-first under the configured view roots,
//! renders them with a registered template engine and provides the output
//! buffer that helper blocks are captured from.

pub mod calls;
pub mod context;
pub mod engine;
pub mod error;
pub mod loader;
pub mod output;
pub mod registry;
pub mod search;

pub use calls::{ComponentCalls, ComponentDeclaration, HELPER_NAME};
pub use context::{EngineGuard, RenderContext};
pub use engine::{HandlebarsEngine, JinjaEngine, PlainEngine, TemplateEngine};
pub use error::{LoadError, LoadResult};
pub use loader::{LoadedTemplate, TemplateLoader, TemplateSource, DEFAULT_ENGINE};
pub use output::{OutputBuffer, OutputSink, OutputStyle};
pub use registry::EngineRegistry;
pub use search::find_template;

/// Local variables handed to a template engine.
pub type Locals = indexmap::IndexMap<String, serde_json::Value>;
