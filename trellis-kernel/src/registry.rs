//! Component registry for resolving layout node names.

use std::collections::HashMap;

use trellis_api::ComponentType;

use crate::builder::LayoutName;

/// Registry of named component types.
///
/// Names are case-sensitive. Registering a name twice replaces the earlier
/// type, which is how callers override built-in components.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, ComponentType>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component type.
    ///
    /// Without a (non-empty) name, the type is stored under its display name.
    pub fn register(&mut self, name: Option<&str>, component: ComponentType) {
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => component.display_name().to_string(),
        };
        tracing::trace!("registering component `{}`", name);
        self.components.insert(name, component);
    }

    /// Resolve a layout node name to the type to construct.
    ///
    /// Unknown symbolic names are used verbatim as intrinsic tags, so host tags
    /// like `div` work without registration.
    pub fn resolve(&self, name: &LayoutName<'_>) -> ComponentType {
        match name {
            LayoutName::Symbolic(name) => self
                .components
                .get(*name)
                .cloned()
                .unwrap_or_else(|| ComponentType::intrinsic(*name)),
            LayoutName::Direct(component) => (*component).clone(),
            LayoutName::Absent => ComponentType::Fragment,
        }
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<&ComponentType> {
        self.components.get(name)
    }

    /// Check if a component is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// List all registered component names.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.components.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Remove every registration.
    pub fn clear(&mut self) {
        self.components.clear();
    }
}
