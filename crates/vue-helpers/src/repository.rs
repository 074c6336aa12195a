//! Request-scoped store of declared roots and components.

use crate::component::VueComponent;
use crate::error::{HelperError, HelperResult};
use crate::object::VueObject;
use crate::root::VueRoot;
use indexmap::IndexMap;

/// A repository entry.
#[derive(Debug)]
pub enum VueEntry {
    Root(VueRoot),
    Component(VueComponent),
}

impl VueEntry {
    /// Get the entry kind as a string.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Root(_) => "root",
            Self::Component(_) => "component",
        }
    }

    /// Shared object state.
    pub fn object(&self) -> &VueObject {
        match self {
            Self::Root(root) => root,
            Self::Component(component) => component,
        }
    }
}

/// Insertion-ordered map from name to declared object.
///
/// Roots and components share one namespace.
#[derive(Debug, Default)]
pub struct VueRepository {
    entries: IndexMap<String, VueEntry>,
}

impl VueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the root `name`.
    pub fn root(&mut self, name: &str) -> HelperResult<&mut VueRoot> {
        let entry = self.entries.entry(name.to_string()).or_insert_with(|| {
            tracing::trace!(name, "root created");
            VueEntry::Root(VueRoot::new(name))
        });
        match entry {
            VueEntry::Root(root) => Ok(root),
            other => Err(conflict(name, other, "root")),
        }
    }

    /// Get or create the component `name`.
    pub fn component(&mut self, name: &str) -> HelperResult<&mut VueComponent> {
        let entry = self.entries.entry(name.to_string()).or_insert_with(|| {
            tracing::trace!(name, "component created");
            VueEntry::Component(VueComponent::new(name))
        });
        match entry {
            VueEntry::Component(component) => Ok(component),
            other => Err(conflict(name, other, "component")),
        }
    }

    pub fn get(&self, name: &str) -> Option<&VueEntry> {
        self.entries.get(name)
    }

    pub fn get_root(&self, name: &str) -> Option<&VueRoot> {
        match self.entries.get(name)? {
            VueEntry::Root(root) => Some(root),
            VueEntry::Component(_) => None,
        }
    }

    pub fn get_component(&self, name: &str) -> Option<&VueComponent> {
        match self.entries.get(name)? {
            VueEntry::Component(component) => Some(component),
            VueEntry::Root(_) => None,
        }
    }

    /// Components attached to `root_name`, in declaration order.
    pub fn components_of<'a>(
        &'a self,
        root_name: &'a str,
    ) -> impl Iterator<Item = &'a VueComponent> + 'a {
        self.entries.values().filter_map(move |entry| match entry {
            VueEntry::Component(component) if component.root_name() == Some(root_name) => {
                Some(component)
            }
            _ => None,
        })
    }

    /// Declared names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn conflict(name: &str, existing: &VueEntry, requested: &'static str) -> HelperError {
    tracing::warn!(name, existing = existing.kind(), requested, "name already declared");
    HelperError::NameConflict {
        name: name.to_string(),
        existing: existing.kind(),
        requested,
    }
}
