//! Render pipeline - payload in, element tree out.
//!
//! One render runs four stages in order:
//! 1. parse the input into a [`Payload`]
//! 2. `before` hooks, one chain per payload field
//! 3. build the tree from the layout field
//! 4. `after` hooks, one chain per payload field, wrapping the tree

use trellis_api::{Element, Payload, Value};

use crate::builder::TreeBuilder;
use crate::config::EngineConfig;
use crate::error::RenderError;
use crate::hooks::{HookRegistry, Stage, trigger};
use crate::keygen::{ROOT_PREFIX, keygen};
use crate::registry::ComponentRegistry;

/// Render input: serialized text or already structured data.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Serialized(String),
    Structured(Value),
}

impl Input {
    fn into_payload(self) -> Result<Payload, RenderError> {
        let payload = match self {
            Input::Serialized(text) => Payload::from_json(&text)?,
            Input::Structured(value) => Payload::from_value(value)?,
        };
        Ok(payload)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Serialized(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Serialized(text)
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Input::Structured(value)
    }
}

impl From<Payload> for Input {
    fn from(payload: Payload) -> Self {
        Input::Structured(payload.into_value())
    }
}

impl From<serde_json::Value> for Input {
    fn from(json: serde_json::Value) -> Self {
        Input::Structured(Value::from(json))
    }
}

/// Borrowed view of an engine for the duration of one render.
pub(crate) struct Pipeline<'a> {
    pub config: &'a EngineConfig,
    pub components: &'a ComponentRegistry,
    pub hooks: &'a HookRegistry,
}

impl Pipeline<'_> {
    pub fn run(&self, input: Input) -> Result<Option<Element>, RenderError> {
        let mut payload = input.into_payload()?;
        let fields: Vec<String> = payload.field_names().map(str::to_string).collect();
        tracing::debug!("render: payload has {} fields", fields.len());

        self.run_before(&mut payload, &fields)?;

        let Some(tree) = self.build(&payload)? else {
            tracing::debug!("render: no layout in `{}`", self.config.layout_field);
            return Ok(None);
        };

        self.run_after(&payload, &fields, tree).map(Some)
    }

    /// Rewrite each field through its `before` chain.
    ///
    /// Every hook sees the root layout as it arrived, even when an earlier
    /// chain has already replaced the layout field.
    fn run_before(&self, payload: &mut Payload, fields: &[String]) -> Result<(), RenderError> {
        let raw_layout = payload
            .get(&self.config.layout_field)
            .cloned()
            .unwrap_or_default();

        let mut ran = 0;
        for field in fields {
            let Some(chain) = self.hooks.before_chain(field) else {
                continue;
            };
            let current = payload.get(field).cloned().unwrap_or_default();
            let rewritten = trigger(Some(chain), current, &raw_layout)
                .map_err(|source| RenderError::hook(Stage::Before, field, source))?;
            payload.insert(field.as_str(), rewritten);
            ran += 1;
        }
        tracing::debug!("render: ran {} before chains", ran);
        Ok(())
    }

    fn build(&self, payload: &Payload) -> Result<Option<Element>, RenderError> {
        let layout = match payload.get(&self.config.layout_field) {
            Some(layout) if layout.is_truthy() => layout,
            _ => return Ok(None),
        };
        let Value::List(items) = layout else {
            return Err(RenderError::InvalidLayout {
                found: layout.type_name(),
            });
        };

        let builder = TreeBuilder::new(self.components, self.hooks, payload);
        let tree = builder.build(items, &mut keygen(ROOT_PREFIX))?;
        tracing::debug!("render: built tree rooted at `{}`", tree.key);
        Ok(Some(tree))
    }

    /// Thread the tree through each field's `after` chain, in field order.
    fn run_after(&self, payload: &Payload, fields: &[String], tree: Element) -> Result<Element, RenderError> {
        let mut tree = tree;
        let mut ran = 0;
        for field in fields {
            let Some(chain) = self.hooks.after_chain(field) else {
                continue;
            };
            let value = payload.get(field).cloned().unwrap_or_default();
            tree = trigger(Some(chain), tree, &value)
                .map_err(|source| RenderError::hook(Stage::After, field, source))?;
            ran += 1;
        }
        tracing::debug!("render: ran {} after chains", ran);
        Ok(tree)
    }
}
