//! Tree builder - turns layout nodes into elements.
//!
//! Walks the layout recursively. For each node it resolves the component
//! type, runs the `modify` pass over its properties, assigns a key and builds
//! its children in a fresh key scope under that key.

mod node;
mod props;

pub use node::{LayoutName, LayoutNode};
pub use props::{DIRECTIVE_PREFIX, ModifyContext};

use trellis_api::{Content, Element, Node, Payload, Value};

use crate::error::RenderError;
use crate::hooks::HookRegistry;
use crate::keygen::KeyGenerator;
use crate::registry::ComponentRegistry;

/// Property that carries an author-assigned key.
pub const KEY_PROP: &str = "key";

/// Builds elements for one render, borrowing the engine's registries.
pub(crate) struct TreeBuilder<'a> {
    components: &'a ComponentRegistry,
    hooks: &'a HookRegistry,
    payload: &'a Payload,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(components: &'a ComponentRegistry, hooks: &'a HookRegistry, payload: &'a Payload) -> Self {
        Self {
            components,
            hooks,
            payload,
        }
    }

    /// Build the element for one layout node (the items of a layout list).
    pub fn build(&self, items: &[Value], keys: &mut KeyGenerator) -> Result<Element, RenderError> {
        let node = LayoutNode::parse(items);
        let component = self.components.resolve(&node.name);

        let raw = node.props.cloned().unwrap_or_default();
        let mut props = props::resolve_props(self.hooks, self.payload, &component, node.children, raw)?;

        let key = match props.shift_remove(KEY_PROP) {
            Some(Value::String(key)) => key,
            Some(explicit) if !explicit.is_null() => explicit.to_text(),
            _ => keys.generate(node.name.label()),
        };
        tracing::trace!("built {} as `{}`", component, key);

        let content = match node.children {
            Some(Value::String(text)) => Content::Text(text.clone()),
            Some(Value::List(entries)) => {
                let mut scope = KeyGenerator::child(&key);
                let children = entries
                    .iter()
                    .map(|entry| self.build_child(entry, &mut scope))
                    .collect::<Result<Vec<_>, _>>()?;
                Content::Children(children)
            }
            _ => Content::Empty,
        };

        Ok(Element {
            component,
            key,
            props,
            content,
        })
    }

    /// Build one entry of a child list.
    ///
    /// Lists are layout nodes. Anything else, falsy placeholders included, is
    /// passed through as authored.
    fn build_child(&self, entry: &Value, keys: &mut KeyGenerator) -> Result<Node, RenderError> {
        match entry {
            Value::List(items) => self.build(items, keys).map(Node::Element),
            other => Ok(Node::Value(other.clone())),
        }
    }
}
