//! Media context pool
//!
//! Hosts group content into named contexts ("default", "news", ...), each
//! served by one or more named providers. Block services consult the pool to
//! offer context choices on their edit forms.

use std::collections::BTreeMap;

/// Registry of media contexts and the providers serving them
#[derive(Debug, Clone, Default)]
pub struct Pool {
    contexts: BTreeMap<String, Vec<String>>,
}

impl Pool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a context and the provider names serving it
    pub fn add_context(&mut self, name: impl Into<String>, providers: Vec<&str>) {
        self.contexts
            .insert(name.into(), providers.into_iter().map(String::from).collect());
    }

    /// Context names, in stable sorted order
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }

    /// Whether a context is registered
    pub fn has_context(&self, name: &str) -> bool {
        self.contexts.contains_key(name)
    }

    /// Provider names serving a context
    pub fn providers_for(&self, context: &str) -> Option<&[String]> {
        self.contexts.get(context).map(Vec::as_slice)
    }
}
