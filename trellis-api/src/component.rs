//! Component types - what an element is an instance of.
//!
//! The renderer owns the meaning of a type; Trellis only needs to tell types
//! apart, name them, and fall back to a grouping type when none is given.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Display name used for the grouping type.
pub const FRAGMENT: &str = "Fragment";

/// A user-defined renderable type.
///
/// Implementors only need `Debug`; the display name defaults to the Rust type
/// name without its module path or generic arguments.
pub trait Component: fmt::Debug + Send + Sync + 'static {
    /// Human-readable name, used when the component is registered without one.
    fn display_name(&self) -> &str {
        infer_display_name(std::any::type_name::<Self>())
    }
}

/// Best-effort display name from a full Rust type path.
///
/// `my_app::widgets::Button<u8>` becomes `Button`.
pub fn infer_display_name(type_name: &str) -> &str {
    let without_generics = type_name.split('<').next().unwrap_or(type_name);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

/// The type of a constructed element.
#[derive(Clone)]
pub enum ComponentType {
    /// Groups children without adding a wrapper of its own.
    Fragment,
    /// A host-native tag (`div`, `p`) or a name nothing was registered under.
    Intrinsic(String),
    /// A registered user component. Compared by identity.
    Custom(Arc<dyn Component>),
}

impl ComponentType {
    /// Wrap a user component.
    pub fn custom(component: impl Component) -> Self {
        ComponentType::Custom(Arc::new(component))
    }

    pub fn intrinsic(tag: impl Into<String>) -> Self {
        ComponentType::Intrinsic(tag.into())
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self, ComponentType::Fragment)
    }

    /// The name this type goes by.
    pub fn display_name(&self) -> &str {
        match self {
            ComponentType::Fragment => FRAGMENT,
            ComponentType::Intrinsic(tag) => tag,
            ComponentType::Custom(component) => component.display_name(),
        }
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ComponentType::Fragment, ComponentType::Fragment) => true,
            (ComponentType::Intrinsic(a), ComponentType::Intrinsic(b)) => a == b,
            (ComponentType::Custom(a), ComponentType::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentType::Fragment => f.write_str("Fragment"),
            ComponentType::Intrinsic(tag) => f.debug_tuple("Intrinsic").field(tag).finish(),
            ComponentType::Custom(component) => f.debug_tuple("Custom").field(component).finish(),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for ComponentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl From<&str> for ComponentType {
    fn from(tag: &str) -> Self {
        ComponentType::Intrinsic(tag.to_string())
    }
}

impl From<String> for ComponentType {
    fn from(tag: String) -> Self {
        ComponentType::Intrinsic(tag)
    }
}

impl From<Arc<dyn Component>> for ComponentType {
    fn from(component: Arc<dyn Component>) -> Self {
        ComponentType::Custom(component)
    }
}
