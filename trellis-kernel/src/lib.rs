//! Trellis Kernel - The layout engine core.
//!
//! This crate turns declarative layouts into element trees, including:
//! - Component registry (name to type resolution)
//! - Hook registry (`before` / `modify` / `after` chains)
//! - Key generation (deterministic hierarchical keys)
//! - Tree builder (recursive layout walk)
//! - Render pipeline (parse, hooks, build)

pub mod builder;
pub mod hooks;
pub mod keygen;
pub mod pipeline;
pub mod registry;

mod config;
mod error;

pub use builder::{DIRECTIVE_PREFIX, KEY_PROP, LayoutName, ModifyContext};
pub use config::{DEFAULT_LAYOUT_FIELD, EngineConfig};
pub use error::RenderError;
pub use hooks::{HookRegistry, Stage};
pub use keygen::{KeyGenerator, ROOT_PREFIX, keygen};
pub use pipeline::Input;
pub use registry::ComponentRegistry;

use trellis_api::{ComponentType, Element, Value};

use crate::pipeline::Pipeline;

/// The layout engine - owns the registries and renders payloads.
///
/// Registration methods return `&mut Self` so setup reads as a chain.
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    components: ComponentRegistry,
    hooks: HookRegistry,
}

impl Engine {
    /// Create an engine with the default configuration and empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get a reference to the component registry.
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Get a reference to the hook registry.
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Register a component type under `name`, replacing any earlier one.
    pub fn register(&mut self, name: &str, component: impl Into<ComponentType>) -> &mut Self {
        self.components.register(Some(name), component.into());
        self
    }

    /// Register a component type under its display name.
    pub fn register_component(&mut self, component: impl Into<ComponentType>) -> &mut Self {
        self.components.register(None, component.into());
        self
    }

    /// Add a hook to the `before` chain of payload field `name`.
    pub fn before<F>(&mut self, name: &str, hook: F) -> &mut Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.hooks.before(name, Box::new(hook));
        self
    }

    /// Add a hook to the `modify` chain of property `name`.
    ///
    /// Names starting with `@` are directives bound to the payload field of the
    /// same name without the `@`.
    pub fn modify<F>(&mut self, name: &str, hook: F) -> &mut Self
    where
        F: Fn(&Value, &ModifyContext<'_>) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.hooks.modify(name, Box::new(hook));
        self
    }

    /// Add a hook to the `after` chain of payload field `name`.
    pub fn after<F>(&mut self, name: &str, hook: F) -> &mut Self
    where
        F: Fn(&Element, &Value) -> anyhow::Result<Option<Element>> + Send + Sync + 'static,
    {
        self.hooks.after(name, Box::new(hook));
        self
    }

    /// Drop every registered component and hook.
    pub fn clear(&mut self) -> &mut Self {
        tracing::debug!(
            "clearing {} components and all hooks",
            self.components.len()
        );
        self.components.clear();
        self.hooks.clear();
        self
    }

    /// Apply an extension to this engine.
    pub fn use_extension(&mut self, extension: impl Extension) {
        extension.install(self);
    }

    /// Render a payload into an element tree.
    ///
    /// Returns `Ok(None)` when the payload has no layout, or a falsy one.
    pub fn render(&self, input: impl Into<Input>) -> Result<Option<Element>, RenderError> {
        let pipeline = Pipeline {
            config: &self.config,
            components: &self.components,
            hooks: &self.hooks,
        };
        pipeline.run(input.into())
    }
}

/// A bundle of registrations applied to an engine in one call.
pub trait Extension {
    fn install(self, engine: &mut Engine);
}

impl<F> Extension for F
where
    F: FnOnce(&mut Engine),
{
    fn install(self, engine: &mut Engine) {
        self(engine)
    }
}
