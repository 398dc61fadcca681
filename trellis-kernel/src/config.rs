//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Payload field that holds the root layout node unless configured otherwise.
pub const DEFAULT_LAYOUT_FIELD: &str = "layout";

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name of the payload field holding the root layout node.
    pub layout_field: String,
}

impl EngineConfig {
    pub fn with_layout_field(mut self, field: impl Into<String>) -> Self {
        self.layout_field = field.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout_field: String::from(DEFAULT_LAYOUT_FIELD),
        }
    }
}
