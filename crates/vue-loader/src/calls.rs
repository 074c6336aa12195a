//! Component declarations made from inside a rendered view.
//!
//! Engines expose a `vue_component` helper. Each call emits the component's
//! mount tag in place and is recorded here, so the caller can declare the
//! nested component once the render is done.

use parking_lot::Mutex;
use std::sync::Arc;
use vue_codegen::{component_call, Attributes, Wrappers};

/// Name of the helper engines register.
pub const HELPER_NAME: &str = "vue_component";

/// One `vue_component` call seen while rendering a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentDeclaration {
    pub name: String,
    pub root_name: Option<String>,
    pub tag_name: Option<String>,
    pub file_name: Option<String>,
    pub template_engine: Option<String>,
    pub attributes: Attributes,
}

impl ComponentDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Route a named helper argument to an option or an attribute.
    pub fn set(&mut self, key: &str, value: String) {
        match key {
            "root_name" => self.root_name = Some(value),
            "tag_name" => self.tag_name = Some(value),
            "file_name" => self.file_name = Some(value),
            "template_engine" => self.template_engine = Some(value),
            _ => {
                self.attributes.insert(key.to_string(), value);
            }
        }
    }
}

/// Collects the declarations of one render.
///
/// Clones share the same list, so an engine can move a handle into its
/// helper while the loader keeps another.
#[derive(Debug, Clone)]
pub struct ComponentCalls {
    wrappers: Arc<Wrappers>,
    declared: Arc<Mutex<Vec<ComponentDeclaration>>>,
}

impl Default for ComponentCalls {
    fn default() -> Self {
        Self::new(Arc::new(Wrappers::default()))
    }
}

impl ComponentCalls {
    pub fn new(wrappers: Arc<Wrappers>) -> Self {
        Self {
            wrappers,
            declared: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Record a declaration and return its call site markup.
    pub fn declare(&self, declaration: ComponentDeclaration, block_content: &str) -> String {
        let html = component_call(
            &self.wrappers,
            &declaration.name,
            declaration.tag_name.as_deref(),
            &declaration.attributes,
            block_content,
        );
        tracing::trace!(name = %declaration.name, "nested component declared");
        self.declared.lock().push(declaration);
        html
    }

    /// Drain the recorded declarations, in call order.
    pub fn take(&self) -> Vec<ComponentDeclaration> {
        std::mem::take(&mut *self.declared.lock())
    }

    pub fn len(&self) -> usize {
        self.declared.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declare_records_and_renders() {
        let calls = ComponentCalls::default();
        let mut declaration = ComponentDeclaration::new("price-tag");
        declaration.set("amount", "3".into());
        declaration.set("root_name", "shop".into());

        let html = calls.clone().declare(declaration, "");
        assert_eq!(html, r#"<price-tag amount="3"></price-tag>"#);
        assert_eq!(calls.len(), 1);

        let declared = calls.take();
        assert_eq!(declared[0].root_name.as_deref(), Some("shop"));
        assert!(calls.is_empty());
    }
}
