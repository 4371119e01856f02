// Copyright 2025 Cowboy AI, LLC.

//! Registry of scanned domain types, partitioned by bean sort

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::bean_sort::{BeanMetaData, BeanSort};
use crate::reflection::TypeKey;

/// Holds the scan results the metamodel is bootstrapped from
#[derive(Debug, Default)]
pub struct BeanTypeRegistry {
    beans: RwLock<IndexMap<TypeKey, BeanMetaData>>,
}

impl BeanTypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from scan results
    pub fn with_beans(beans: impl IntoIterator<Item = BeanMetaData>) -> Self {
        let registry = Self::new();
        for bean in beans {
            registry.register(bean);
        }
        registry
    }

    /// Add or replace the metadata of a type
    pub fn register(&self, bean: BeanMetaData) {
        self.beans
            .write()
            .insert(bean.corresponding_class.clone(), bean);
    }

    /// Metadata of a scanned type
    pub fn lookup(&self, key: &TypeKey) -> Option<BeanMetaData> {
        self.beans.read().get(key).cloned()
    }

    /// All scanned types, in discovery order
    pub fn discovered(&self) -> Vec<BeanMetaData> {
        self.beans.read().values().cloned().collect()
    }

    /// Scanned types of one sort, in discovery order
    pub fn of_sort(&self, sort: BeanSort) -> Vec<TypeKey> {
        self.beans
            .read()
            .values()
            .filter(|bean| bean.bean_sort == sort)
            .map(|bean| bean.corresponding_class.clone())
            .collect()
    }

    /// Scanned mixin types
    pub fn mixin_types(&self) -> Vec<TypeKey> {
        self.of_sort(BeanSort::Mixin)
    }

    /// Scanned entity types
    pub fn entity_types(&self) -> Vec<TypeKey> {
        self.of_sort(BeanSort::Entity)
    }

    /// Scanned view model types
    pub fn view_model_types(&self) -> Vec<TypeKey> {
        self.of_sort(BeanSort::ViewModel)
    }

    /// Scanned managed bean types
    pub fn managed_bean_types(&self) -> Vec<TypeKey> {
        self.of_sort(BeanSort::ManagedBean)
    }

    /// Number of scanned types
    pub fn len(&self) -> usize {
        self.beans.read().len()
    }

    /// Whether nothing was scanned
    pub fn is_empty(&self) -> bool {
        self.beans.read().is_empty()
    }
}
