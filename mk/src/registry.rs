//! ProviderRegistry - name to provider lookup
//!
//! One registry per provider family (plan templates, audit frameworks).
//! Registration happens once at startup; lookups are read-only afterwards,
//! so sharing an `Arc<ProviderRegistry>` across sessions is safe.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::template::Provider;

/// Ordered provider registry
///
/// Insertion order is observable: the suggestion engine breaks score ties
/// by registration order, so `list` and `iter` return providers in the
/// order they were registered.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn Provider>>,
    order: Vec<String>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a compiled-in provider list
    pub fn with_providers(providers: Vec<Arc<dyn Provider>>) -> Self {
        let mut registry = Self::new();
        for provider in providers {
            registry.register(provider);
        }
        registry
    }

    /// Insert or overwrite a provider under its own name
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        let name = provider.name().to_string();
        debug!(%name, "ProviderRegistry::register: called");
        if self.providers.insert(name.clone(), provider).is_none() {
            self.order.push(name);
        }
    }

    /// Look up a provider by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// Provider names in registration order
    pub fn list(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Providers in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Provider>> {
        self.order.iter().filter_map(|name| self.providers.get(name))
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Template;

    fn named(name: &'static str) -> Arc<dyn Provider> {
        Arc::new(Template::new(name, "test provider", &[], vec![]))
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ProviderRegistry::new();
        registry.register(named("first_principles"));

        assert!(registry.get("first_principles").is_some());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut registry = ProviderRegistry::new();
        registry.register(named("zeta"));
        registry.register(named("alpha"));
        registry.register(named("mid"));

        assert_eq!(registry.list(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_overwrite_keeps_original_position() {
        let mut registry = ProviderRegistry::new();
        registry.register(named("a"));
        registry.register(named("b"));
        registry.register(named("a"));

        assert_eq!(registry.list(), vec!["a", "b"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_iter_follows_order() {
        let mut registry = ProviderRegistry::new();
        registry.register(named("one"));
        registry.register(named("two"));

        let names: Vec<&str> = registry.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["one", "two"]);
    }
}
