// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Directory of operator types.
//!
//! Two independent namespaces map a type name to a [`BuilderFactory`]:
//! `builtin` (operators shipped with the engine) and `plugin` (third-party
//! types registered by the embedding program). [`Registry::lookup`] prefers the
//! builtin entry when both exist.
//!
//! Registration needs `&mut Registry` and lookup needs `&Registry`, so once the
//! registry is shared (for example behind an `Arc`) it can no longer change:
//! every registration happens-before every concurrent lookup.
//!
//! Registering an existing name silently replaces it. That is documented
//! behavior, not an error.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::observability::messages::{registry::BuilderOverwritten, StructuredLog};
use crate::traits::Builder;

/// Turns a raw operator configuration into its builder.
pub type BuilderFactory =
    Arc<dyn Fn(Value) -> Result<Box<dyn Builder>, serde_json::Error> + Send + Sync>;

/// Factory deserializing the raw configuration into `B`.
pub fn factory<B>() -> BuilderFactory
where
    B: Builder + DeserializeOwned + 'static,
{
    Arc::new(|raw: Value| -> Result<Box<dyn Builder>, serde_json::Error> {
        let builder: B = serde_json::from_value(raw)?;
        Ok(Box::new(builder) as Box<dyn Builder>)
    })
}

#[derive(Clone, Default)]
pub struct Registry {
    builtin: HashMap<String, BuilderFactory>,
    plugin: HashMap<String, BuilderFactory>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every builtin operator type.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::operator::builtin::register_all(&mut registry);
        registry
    }

    /// Inserts or replaces a builtin type.
    pub fn register(&mut self, type_name: impl Into<String>, factory: BuilderFactory) {
        let type_name = type_name.into();
        if self.builtin.contains_key(&type_name) {
            BuilderOverwritten {
                type_name: &type_name,
                namespace: "builtin",
            }
            .log();
        }
        self.builtin.insert(type_name, factory);
    }

    /// Inserts or replaces a plugin type.
    pub fn register_plugin(&mut self, type_name: impl Into<String>, factory: BuilderFactory) {
        let type_name = type_name.into();
        if self.plugin.contains_key(&type_name) {
            BuilderOverwritten {
                type_name: &type_name,
                namespace: "plugin",
            }
            .log();
        }
        self.plugin.insert(type_name, factory);
    }

    /// Finds the factory for `type_name`, preferring builtin over plugin.
    pub fn lookup(&self, type_name: &str) -> Option<BuilderFactory> {
        self.builtin
            .get(type_name)
            .or_else(|| self.plugin.get(type_name))
            .cloned()
    }

    /// Sorted names across both namespaces.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .builtin
            .keys()
            .chain(self.plugin.keys().filter(|name| !self.builtin.contains_key(*name)))
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("builtin", &self.builtin.keys().collect::<Vec<_>>())
            .field("plugin", &self.plugin.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::builtin::output::drop::DropOutputConfig;
    use crate::operator::builtin::transformer::noop::NoopConfig;
    use serde_json::json;

    fn noop_factory() -> BuilderFactory {
        factory::<NoopConfig>()
    }

    fn drop_factory() -> BuilderFactory {
        factory::<DropOutputConfig>()
    }

    #[test]
    fn test_lookup_prefers_builtin() {
        let mut registry = Registry::new();
        let builtin = noop_factory();
        let plugin = drop_factory();
        registry.register("x", builtin.clone());
        registry.register_plugin("x", plugin.clone());

        let found = registry.lookup("x").unwrap();
        assert!(Arc::ptr_eq(&found, &builtin));
        assert!(!Arc::ptr_eq(&found, &plugin));
    }

    #[test]
    fn test_lookup_falls_back_to_plugin() {
        let mut registry = Registry::new();
        let plugin = drop_factory();
        registry.register_plugin("custom", plugin.clone());
        assert!(Arc::ptr_eq(&registry.lookup("custom").unwrap(), &plugin));
    }

    #[test]
    fn test_lookup_missing() {
        let registry = Registry::with_builtins();
        assert!(registry.lookup("nonexistent").is_none());
    }

    #[test]
    fn test_register_is_last_writer_wins() {
        let mut registry = Registry::new();
        let first = noop_factory();
        let second = noop_factory();
        registry.register("noop", first.clone());
        registry.register("noop", second.clone());
        assert!(Arc::ptr_eq(&registry.lookup("noop").unwrap(), &second));

        registry.register_plugin("p", first.clone());
        registry.register_plugin("p", second.clone());
        assert!(Arc::ptr_eq(&registry.lookup("p").unwrap(), &second));
    }

    #[test]
    fn test_builtins_registered() {
        let registry = Registry::with_builtins();
        for name in ["noop", "csv_parser", "json_parser", "generate_input", "drop_output", "stdout"] {
            assert!(registry.lookup(name).is_some(), "missing builtin '{}'", name);
        }
    }

    #[test]
    fn test_factory_deserializes_builder() {
        let registry = Registry::with_builtins();
        let factory = registry.lookup("noop").unwrap();
        let builder = factory(json!({"id": "n1", "type": "noop", "output": "next"})).unwrap();
        assert_eq!(builder.id(), "n1");
        assert_eq!(builder.type_name(), "noop");
    }

    #[test]
    fn test_type_names_deduplicates() {
        let mut registry = Registry::new();
        registry.register("a", noop_factory());
        registry.register_plugin("a", noop_factory());
        registry.register_plugin("b", noop_factory());
        assert_eq!(registry.type_names(), vec!["a", "b"]);
    }
}
