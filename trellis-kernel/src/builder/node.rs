//! Layout node shape: `[name, props?, children?]`.

use trellis_api::{ComponentType, FRAGMENT, Props, Value};

/// What a layout node names as its type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutName<'a> {
    /// A registry name, or a host tag if nothing is registered under it.
    Symbolic(&'a str),
    /// A component reference carried directly in a structured payload.
    Direct(&'a ComponentType),
    /// No usable name; the node groups its children.
    Absent,
}

impl<'a> LayoutName<'a> {
    pub fn from_value(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::String(name)) if !name.is_empty() => LayoutName::Symbolic(name),
            Some(Value::Component(component)) => LayoutName::Direct(component),
            _ => LayoutName::Absent,
        }
    }

    /// Label used for generated keys.
    pub fn label(&self) -> &'a str {
        match *self {
            LayoutName::Symbolic(name) => name,
            LayoutName::Direct(component) => component.display_name(),
            LayoutName::Absent => FRAGMENT,
        }
    }
}

/// A destructured layout node, borrowing from the payload.
#[derive(Debug)]
pub struct LayoutNode<'a> {
    pub name: LayoutName<'a>,
    pub props: Option<&'a Props>,
    pub children: Option<&'a Value>,
}

impl<'a> LayoutNode<'a> {
    /// Split a node into its parts.
    ///
    /// A list or string in the props slot means the node skipped its props and
    /// went straight to children.
    pub fn parse(items: &'a [Value]) -> Self {
        let name = LayoutName::from_value(items.first());
        match items.get(1) {
            Some(slot) if matches!(slot, Value::List(_) | Value::String(_)) => Self {
                name,
                props: None,
                children: Some(slot),
            },
            Some(Value::Record(props)) => Self {
                name,
                props: Some(props),
                children: items.get(2),
            },
            _ => Self {
                name,
                props: None,
                children: items.get(2),
            },
        }
    }
}
