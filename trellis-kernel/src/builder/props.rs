//! Property resolution through `modify` hooks.
//!
//! Properties whose key starts with `@` are directives. A directive's hooks
//! receive the payload field named after the key (`@stylesheet` sees the
//! `stylesheet` field) and typically write other properties through the
//! context; the directive itself never reaches the element.

use std::cell::{Ref, RefCell, RefMut};

use anyhow::Context;

use trellis_api::{ComponentType, Payload, Props, Value};

use crate::error::RenderError;
use crate::hooks::{HookRegistry, Stage, trigger};

/// Prefix marking a property key as a directive.
pub const DIRECTIVE_PREFIX: char = '@';

/// What a `modify` hook can see about the element being built.
///
/// `props` is the element's live property map, shared with the resolution
/// pass. Writes made here are visible to later hooks and end up on the
/// element. Writing while a `props()` guard is still alive fails with an
/// error instead of panicking.
pub struct ModifyContext<'a> {
    component: &'a ComponentType,
    children: Option<&'a Value>,
    props: &'a RefCell<Props>,
    field: Option<&'a Value>,
}

impl<'a> ModifyContext<'a> {
    /// The resolved type of the element.
    pub fn component(&self) -> &'a ComponentType {
        self.component
    }

    /// The element's children as authored in the layout.
    pub fn children(&self) -> Option<&'a Value> {
        self.children
    }

    /// The payload field a directive is bound to. Always `None` for plain keys.
    pub fn field(&self) -> Option<&'a Value> {
        self.field
    }

    pub fn props(&self) -> anyhow::Result<Ref<'_, Props>> {
        self.props
            .try_borrow()
            .context("element properties are being written by this hook")
    }

    pub fn props_mut(&self) -> anyhow::Result<RefMut<'_, Props>> {
        self.props
            .try_borrow_mut()
            .context("element properties are still borrowed by this hook")
    }

    /// Set another property on the element being built.
    pub fn set_prop(&self, key: impl Into<String>, value: impl Into<Value>) -> anyhow::Result<()> {
        self.props_mut()?.insert(key.into(), value.into());
        Ok(())
    }
}

/// Run the `modify` pass over an element's raw properties.
///
/// The key set is fixed before the pass starts; keys added by hooks are not
/// visited and keys removed by an earlier hook are skipped.
pub(crate) fn resolve_props(
    hooks: &HookRegistry,
    payload: &Payload,
    component: &ComponentType,
    children: Option<&Value>,
    raw: Props,
) -> Result<Props, RenderError> {
    let keys: Vec<String> = raw.keys().cloned().collect();
    let props = RefCell::new(raw);

    for key in keys {
        let is_directive = key.starts_with(DIRECTIVE_PREFIX);

        let Some(chain) = hooks.modify_chain(&key) else {
            if is_directive {
                tracing::debug!("dropping unhandled directive `{}`", key);
                props.borrow_mut().shift_remove(&key);
            }
            continue;
        };

        let current = match props.borrow().get(&key) {
            Some(value) => value.clone(),
            None => continue,
        };
        let field = key
            .strip_prefix(DIRECTIVE_PREFIX)
            .and_then(|name| payload.get(name));
        let ctx = ModifyContext {
            component,
            children,
            props: &props,
            field,
        };
        let resolved = trigger(Some(chain), current, &ctx)
            .map_err(|source| RenderError::hook(Stage::Modify, &key, source))?;

        if is_directive {
            props.borrow_mut().shift_remove(&key);
        } else {
            props.borrow_mut().insert(key, resolved);
        }
    }

    // Hooks may have written new directives that the snapshot never saw.
    let mut props = props.into_inner();
    props.retain(|key, _| !key.starts_with(DIRECTIVE_PREFIX));
    Ok(props)
}
