//! View registry.
//!
//! Views register under a stable key at startup; commands and the board
//! look them up by key. Adding a screen is one registration call, not a
//! new dispatch branch.

use crate::screen::ViewModule;
use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Default)]
pub struct ViewRegistry {
    views: BTreeMap<&'static str, Box<dyn ViewModule>>,
}

impl ViewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view under its own key. Keys must be unique.
    pub fn register(&mut self, view: Box<dyn ViewModule>) {
        let key = view.key();
        debug!(key, "registering view");
        let previous = self.views.insert(key, view);
        assert!(previous.is_none(), "duplicate view key '{key}'");
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        self.views.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ViewModule> {
        self.views.values().map(|view| view.as_ref())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn ViewModule> {
        self.views.get(key).map(|view| view.as_ref())
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Box<dyn ViewModule>> {
        self.views.get_mut(key)
    }

    /// Look up a view or fail with the list of registered keys.
    pub fn resolve(&self, key: &str) -> Result<&dyn ViewModule> {
        self.get(key)
            .ok_or_else(|| unknown_view(key, &self.keys()))
    }

    pub fn resolve_mut(&mut self, key: &str) -> Result<&mut Box<dyn ViewModule>> {
        let keys = self.keys();
        self.get_mut(key)
            .ok_or_else(|| unknown_view(key, &keys))
    }
}

fn unknown_view(key: &str, keys: &[&'static str]) -> anyhow::Error {
    anyhow!("unknown view '{key}'; registered views: {}", keys.join(", "))
}

#[cfg(test)]
mod tests {
    use crate::views::standard_registry;

    #[test]
    fn standard_registry_holds_every_view_in_key_order() {
        let registry = standard_registry();
        assert_eq!(
            registry.keys(),
            ["athletes", "compliance", "finance", "sentiment", "stakeholders"]
        );
    }

    #[test]
    fn resolve_unknown_key_lists_registered_views() {
        let registry = standard_registry();
        let err = registry.resolve("payroll").expect_err("unknown view");
        assert!(err.to_string().contains("athletes"));
    }

    #[test]
    fn every_view_starts_seeded() {
        let registry = standard_registry();
        for view in registry.iter() {
            assert!(!view.is_empty(), "view '{}' has no seed rows", view.key());
        }
    }
}
