//! Vue components: a mount tag per call site, one definition per bundle.

use crate::object::VueObject;
use std::ops::{Deref, DerefMut};
use vue_codegen::{
    camelize, compile_component, component_call, x_template, Attributes, CodegenOptions,
    ComponentSource, Wrappers,
};

/// A component declared in the current request.
#[derive(Debug)]
pub struct VueComponent {
    object: VueObject,
}

impl VueComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            object: VueObject::new(name),
        }
    }

    /// JS identifier of the component.
    pub fn js_var_name(&self) -> String {
        camelize(self.name())
    }

    /// Markup for one call site.
    ///
    /// A `tag_name` renders that element instead and points it at the
    /// component with an `is` attribute.
    pub fn render_call(
        &self,
        wrappers: &Wrappers,
        tag_name: Option<&str>,
        attributes: &Attributes,
        block_content: &str,
    ) -> String {
        component_call(wrappers, self.name(), tag_name, attributes, block_content)
    }

    /// JS definition, or `None` when the view has no usable script.
    pub fn to_component_js(&self, options: &CodegenOptions) -> Option<String> {
        let data_json = self
            .data()
            .filter(|data| !data.is_empty())
            .map(|_| self.data_json());
        let source = ComponentSource::new(self.name())
            .template(self.parsed_template())
            .script(self.parsed_script())
            .data_json(data_json.as_deref());
        compile_component(&source, options)
    }

    /// x-template block for the component's template, if it has one.
    pub fn x_template(&self, wrappers: &Wrappers) -> Option<String> {
        self.parsed_template()
            .map(|template| x_template(wrappers, self.name(), template))
    }
}

impl Deref for VueComponent {
    type Target = VueObject;

    fn deref(&self) -> &VueObject {
        &self.object
    }
}

impl DerefMut for VueComponent {
    fn deref_mut(&mut self) -> &mut VueObject {
        &mut self.object
    }
}
