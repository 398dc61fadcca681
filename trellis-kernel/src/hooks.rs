//! Hook registry - named callback chains run around tree construction.
//!
//! Three independent namespaces:
//! - `before`: rewrite a payload field before the tree is built
//! - `modify`: resolve an element property while the tree is built
//! - `after`: rewrite the built tree, with a payload field as context
//!
//! Hooks registered under the same name form a chain. A chain runs in
//! registration order, each hook receiving the value produced by the previous
//! one. Returning `Ok(None)` keeps the current value.

use std::collections::HashMap;
use std::fmt;

use trellis_api::{Element, Value};

use crate::builder::ModifyContext;

/// Rewrites a payload field. Receives the field value and the raw root layout.
pub type BeforeHook = dyn Fn(&Value, &Value) -> anyhow::Result<Option<Value>> + Send + Sync;

/// Resolves a property value while its element is being built.
pub type ModifyHook = dyn Fn(&Value, &ModifyContext<'_>) -> anyhow::Result<Option<Value>> + Send + Sync;

/// Rewrites the built tree. Receives the tree and the field value.
pub type AfterHook = dyn Fn(&Element, &Value) -> anyhow::Result<Option<Element>> + Send + Sync;

/// Which namespace a hook lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Before,
    Modify,
    After,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Before => "before",
            Stage::Modify => "modify",
            Stage::After => "after",
        })
    }
}

type Chains<H> = HashMap<String, Vec<Box<H>>>;

/// Ordered hook chains, keyed by name, one table per stage.
#[derive(Default)]
pub struct HookRegistry {
    before: Chains<BeforeHook>,
    modify: Chains<ModifyHook>,
    after: Chains<AfterHook>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before(&mut self, name: &str, hook: Box<BeforeHook>) {
        append(&mut self.before, name, hook);
    }

    pub fn modify(&mut self, name: &str, hook: Box<ModifyHook>) {
        append(&mut self.modify, name, hook);
    }

    pub fn after(&mut self, name: &str, hook: Box<AfterHook>) {
        append(&mut self.after, name, hook);
    }

    pub fn before_chain(&self, name: &str) -> Option<&[Box<BeforeHook>]> {
        self.before.get(name).map(Vec::as_slice)
    }

    pub fn modify_chain(&self, name: &str) -> Option<&[Box<ModifyHook>]> {
        self.modify.get(name).map(Vec::as_slice)
    }

    pub fn after_chain(&self, name: &str) -> Option<&[Box<AfterHook>]> {
        self.after.get(name).map(Vec::as_slice)
    }

    /// Number of hooks registered under `name` in `stage`.
    pub fn count(&self, stage: Stage, name: &str) -> usize {
        match stage {
            Stage::Before => self.before.get(name).map_or(0, Vec::len),
            Stage::Modify => self.modify.get(name).map_or(0, Vec::len),
            Stage::After => self.after.get(name).map_or(0, Vec::len),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.modify.is_empty() && self.after.is_empty()
    }

    /// Drop every hook in every stage.
    pub fn clear(&mut self) {
        self.before.clear();
        self.modify.clear();
        self.after.clear();
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn names<H: ?Sized>(chains: &Chains<H>) -> Vec<&str> {
            let mut names: Vec<&str> = chains.keys().map(String::as_str).collect();
            names.sort_unstable();
            names
        }

        f.debug_struct("HookRegistry")
            .field("before", &names(&self.before))
            .field("modify", &names(&self.modify))
            .field("after", &names(&self.after))
            .finish()
    }
}

fn append<H: ?Sized>(chains: &mut Chains<H>, name: &str, hook: Box<H>) {
    chains.entry(name.to_string()).or_default().push(hook);
}

/// Run a hook chain, threading `initial` through each hook in order.
///
/// A hook returning `Ok(None)` leaves the value as it was. A missing or empty
/// chain returns `initial` untouched. The first error stops the chain.
pub fn trigger<T, O, H>(chain: Option<&[Box<H>]>, initial: T, options: &O) -> anyhow::Result<T>
where
    O: ?Sized,
    H: Fn(&T, &O) -> anyhow::Result<Option<T>> + ?Sized,
{
    let Some(chain) = chain else {
        return Ok(initial);
    };

    let mut current = initial;
    for hook in chain.iter().map(Box::as_ref) {
        if let Some(next) = hook(&current, options)? {
            current = next;
        }
    }
    Ok(current)
}
