//! Per-request render state.

use crate::calls::ComponentDeclaration;
use crate::output::{OutputBuffer, OutputSink};
use std::ops::{Deref, DerefMut};

/// The engine stack and output buffer of one request.
///
/// The top of the engine stack is the engine currently rendering; it drives
/// engine inference for nested lookups and picks the capture style.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    engines: Vec<String>,
    out: OutputBuffer,
    declared: Vec<ComponentDeclaration>,
}

impl RenderContext {
    /// Create an idle context.
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine currently rendering, if any.
    pub fn current_engine(&self) -> Option<&str> {
        self.engines.last().map(String::as_str)
    }

    /// Number of nested renders in progress.
    pub fn depth(&self) -> usize {
        self.engines.len()
    }

    /// Mark `tag` as the current engine until the guard drops.
    pub fn enter(&mut self, tag: impl Into<String>) -> EngineGuard<'_> {
        self.push_engine(tag);
        EngineGuard { ctx: self }
    }

    /// Push an engine without a guard; pair with [`pop_engine`](Self::pop_engine).
    pub fn push_engine(&mut self, tag: impl Into<String>) {
        self.engines.push(tag.into());
    }

    /// Pop the current engine.
    pub fn pop_engine(&mut self) -> Option<String> {
        self.engines.pop()
    }

    /// Run `f` with `tag` as the current engine.
    pub fn with_engine<T>(&mut self, tag: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let mut guard = self.enter(tag);
        f(&mut *guard)
    }

    /// Keep components declared by a finished render.
    pub fn record_declarations(&mut self, declarations: Vec<ComponentDeclaration>) {
        self.declared.extend(declarations);
    }

    /// Drain recorded declarations, in call order.
    pub fn take_declarations(&mut self) -> Vec<ComponentDeclaration> {
        std::mem::take(&mut self.declared)
    }

    /// The request's output buffer.
    pub fn buffer(&self) -> &OutputBuffer {
        &self.out
    }
}

impl OutputSink for RenderContext {
    fn output(&mut self) -> &mut OutputBuffer {
        &mut self.out
    }
}

/// Restores the engine stack on drop.
#[derive(Debug)]
pub struct EngineGuard<'a> {
    ctx: &'a mut RenderContext,
}

impl Deref for EngineGuard<'_> {
    type Target = RenderContext;

    fn deref(&self) -> &RenderContext {
        self.ctx
    }
}

impl DerefMut for EngineGuard<'_> {
    fn deref_mut(&mut self) -> &mut RenderContext {
        self.ctx
    }
}

impl Drop for EngineGuard<'_> {
    fn drop(&mut self) {
        self.ctx.engines.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_engines_restore() {
        let mut ctx = RenderContext::new();
        assert_eq!(ctx.current_engine(), None);

        ctx.with_engine("hbs", |ctx| {
            assert_eq!(ctx.current_engine(), Some("hbs"));
            ctx.with_engine("jinja", |ctx| {
                assert_eq!(ctx.current_engine(), Some("jinja"));
                assert_eq!(ctx.depth(), 2);
            });
            assert_eq!(ctx.current_engine(), Some("hbs"));
        });
        assert_eq!(ctx.current_engine(), None);
    }

    #[test]
    fn test_restores_after_failure() {
        let mut ctx = RenderContext::new();
        let result: Result<(), &str> = ctx.with_engine("hbs", |_| Err("boom"));
        assert!(result.is_err());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_restores_after_panic() {
        let mut ctx = RenderContext::new();
        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            ctx.with_engine("hbs", |_| panic!("engine blew up"))
        }));
        assert!(caught.is_err());
        assert_eq!(ctx.current_engine(), None);
    }

    #[test]
    fn test_buffer_shared_across_engines() {
        let mut ctx = RenderContext::new();
        ctx.with_engine("hbs", |ctx| ctx.output().write("a"));
        ctx.output().write("b");
        assert_eq!(ctx.buffer().as_str(), "ab");
    }
}
