//! Hierarchical element keys.
//!
//! Every element gets a key of the form `{parent}/{name}[{n}]`, where `n`
//! counts how many siblings with the same name came before it under the same
//! parent. Keys are deterministic for a given layout and read as a path.

use std::collections::HashMap;

use trellis_api::FRAGMENT;

/// Prefix of the root scope.
pub const ROOT_PREFIX: &str = "";

/// Create a key generator scoped to `prefix`.
pub fn keygen(prefix: impl Into<String>) -> KeyGenerator {
    KeyGenerator::new(prefix)
}

/// One key scope: a prefix plus per-name occurrence counters.
///
/// Each subtree gets its own generator, so counters are never shared between
/// parents.
#[derive(Debug, Clone, Default)]
pub struct KeyGenerator {
    prefix: String,
    counts: HashMap<String, usize>,
}

impl KeyGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counts: HashMap::new(),
        }
    }

    /// Scope for the children of the element keyed `parent_key`.
    pub fn child(parent_key: &str) -> Self {
        Self::new(parent_key)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Produce the next key for `name`. An empty name counts as a fragment.
    pub fn generate(&mut self, name: &str) -> String {
        let label = if name.is_empty() { FRAGMENT } else { name };
        let count = self.counts.entry(label.to_string()).or_insert(0);
        *count += 1;
        format!("{}/{}[{}]", self.prefix, label, count)
    }
}
