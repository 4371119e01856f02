// Copyright 2025 Cowboy AI, LLC.

//! Registry of logical type names and aliases

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::identifier::LogicalType;
use crate::spec::ObjectSpecification;

/// Maps logical type names and aliases to logical types
///
/// The first registration of a name wins. A later registration of the same
/// name for a different type is logged and ignored; uniqueness is reported
/// by validation instead.
#[derive(Debug, Default)]
pub struct LogicalTypeResolver {
    by_name: DashMap<String, LogicalType>,
}

impl LogicalTypeResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a specification under its logical type name
    ///
    /// Only concrete, non-anonymous types are registered.
    pub fn register(&self, spec: &ObjectSpecification) -> bool {
        if !spec.is_registrable() {
            return false;
        }
        let logical_type = spec.logical_type();
        self.register_name(logical_type.name(), logical_type)
    }

    /// Register a specification under each of its aliases
    pub fn register_aliases(&self, spec: &ObjectSpecification) -> usize {
        if !spec.is_registrable() {
            return 0;
        }
        spec.aliases()
            .iter()
            .filter(|alias| self.register_name(alias, spec.logical_type()))
            .count()
    }

    /// Insert `name` if absent; returns whether it was inserted
    pub fn register_name(&self, name: &str, logical_type: &LogicalType) -> bool {
        match self.by_name.entry(name.to_string()) {
            Entry::Occupied(existing) => {
                if existing.get() != logical_type {
                    warn!(
                        name,
                        registered = %existing.get().class(),
                        rejected = %logical_type.class(),
                        "logical type name already in use"
                    );
                }
                false
            }
            Entry::Vacant(slot) => {
                debug!(name, class = %logical_type.class(), "logical type registered");
                slot.insert(logical_type.clone());
                true
            }
        }
    }

    /// The logical type registered under `name`
    pub fn lookup(&self, name: &str) -> Option<LogicalType> {
        self.by_name.get(name).map(|entry| entry.value().clone())
    }

    /// Drop every registration
    pub fn clear(&self) {
        self.by_name.clear();
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Snapshot of all registrations, sorted by name
    pub fn snapshot(&self) -> Vec<(String, LogicalType)> {
        let mut all: Vec<_> = self
            .by_name
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::TypeKey;

    #[test]
    fn test_first_registration_wins() {
        let resolver = LogicalTypeResolver::new();
        let first = LogicalType::new("crm.Customer", TypeKey::new("com.acme.Customer"));
        let second = LogicalType::new("crm.Customer", TypeKey::new("com.other.Customer"));

        assert!(resolver.register_name("crm.Customer", &first));
        assert!(!resolver.register_name("crm.Customer", &second));
        assert!(!resolver.register_name("crm.Customer", &first));
        assert_eq!(resolver.lookup("crm.Customer"), Some(first));
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_clear() {
        let resolver = LogicalTypeResolver::new();
        resolver.register_name("a", &LogicalType::infer(TypeKey::new("a")));
        resolver.register_name("b", &LogicalType::infer(TypeKey::new("b")));
        assert_eq!(resolver.snapshot().len(), 2);
        resolver.clear();
        assert!(resolver.is_empty());
        assert!(resolver.lookup("a").is_none());
    }
}
