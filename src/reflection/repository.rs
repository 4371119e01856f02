// Copyright 2025 Cowboy AI, LLC.

//! Registry of known class descriptors

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::class::ClassDescriptor;
use super::TypeKey;
use crate::errors::{MetaModelError, MetaModelResult};

/// Lookup of class descriptors by key
///
/// Classes may be added after the metamodel has been built, which is how a
/// running application picks up new or changed types before a reload.
#[derive(Debug, Default)]
pub struct ClassRepository {
    classes: RwLock<HashMap<TypeKey, Arc<ClassDescriptor>>>,
}

impl ClassRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given classes
    pub fn with_classes(classes: impl IntoIterator<Item = ClassDescriptor>) -> Self {
        let repository = Self::new();
        for class in classes {
            repository.register(class);
        }
        repository
    }

    /// Add or replace a class; returns the stored descriptor
    pub fn register(&self, class: ClassDescriptor) -> Arc<ClassDescriptor> {
        let class = Arc::new(class);
        self.classes
            .write()
            .insert(class.name.clone(), Arc::clone(&class));
        class
    }

    /// Look up a class
    pub fn get(&self, key: &TypeKey) -> Option<Arc<ClassDescriptor>> {
        self.classes.read().get(key).cloned()
    }

    /// Look up a class, failing if unknown
    pub fn require(&self, key: &TypeKey) -> MetaModelResult<Arc<ClassDescriptor>> {
        self.get(key)
            .ok_or_else(|| MetaModelError::ClassNotFound(key.clone()))
    }

    /// Whether a class is known
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.classes.read().contains_key(key)
    }

    /// Number of known classes
    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    /// Whether no classes are known
    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }

    /// Snapshot of all known classes
    pub fn all(&self) -> Vec<Arc<ClassDescriptor>> {
        self.classes.read().values().cloned().collect()
    }

    /// Whether `candidate` is `target` or inherits from it through its
    /// superclass chain or implemented interfaces.
    pub fn is_assignable(&self, target: &TypeKey, candidate: &TypeKey) -> bool {
        let mut visited = HashSet::new();
        let mut pending = vec![candidate.clone()];
        while let Some(next) = pending.pop() {
            if &next == target {
                return true;
            }
            if !visited.insert(next.clone()) {
                continue;
            }
            if let Some(class) = self.get(&next) {
                pending.extend(class.superclass.iter().cloned());
                pending.extend(class.interfaces.iter().cloned());
            }
        }
        false
    }

    /// Superclass chain of a class, nearest first
    pub fn superclass_chain(&self, key: &TypeKey) -> Vec<Arc<ClassDescriptor>> {
        let mut chain = Vec::new();
        let mut current = self.get(key).and_then(|c| c.superclass.clone());
        while let Some(next) = current {
            match self.get(&next) {
                Some(class) => {
                    current = class.superclass.clone();
                    chain.push(class);
                }
                None => break,
            }
            if chain.len() > 256 {
                break;
            }
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::ClassKind;

    fn repository() -> ClassRepository {
        ClassRepository::with_classes([
            ClassDescriptor::builder("Named").kind(ClassKind::Interface).build(),
            ClassDescriptor::builder("Base").implements("Named").build(),
            ClassDescriptor::builder("Customer").extends("Base").build(),
            ClassDescriptor::builder("Order").build(),
        ])
    }

    #[test]
    fn test_assignability_follows_hierarchy() {
        let repo = repository();
        let customer = TypeKey::new("Customer");
        assert!(repo.is_assignable(&TypeKey::new("Base"), &customer));
        assert!(repo.is_assignable(&TypeKey::new("Named"), &customer));
        assert!(repo.is_assignable(&customer, &customer));
        assert!(!repo.is_assignable(&TypeKey::new("Order"), &customer));
        assert!(!repo.is_assignable(&customer, &TypeKey::new("Base")));
    }

    #[test]
    fn test_superclass_chain() {
        let repo = repository();
        let chain: Vec<_> = repo
            .superclass_chain(&TypeKey::new("Customer"))
            .iter()
            .map(|c| c.name.to_string())
            .collect();
        assert_eq!(chain, vec!["Base".to_string()]);
    }

    #[test]
    fn test_require_unknown_class() {
        let repo = repository();
        let err = repo.require(&TypeKey::new("Nope")).unwrap_err();
        assert!(err.is_not_found());
    }
}
