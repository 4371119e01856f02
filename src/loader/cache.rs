// Copyright 2025 Cowboy AI, LLC.

//! Arena of specifications: a class index plus a table keyed by handle

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::reflection::TypeKey;
use crate::spec::ObjectSpecification;

/// Handle of a specification in the cache arena
///
/// Handles are never reused, so a handle held across a reload keeps
/// pointing at nothing rather than at the replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpecId(u64);

impl SpecId {
    /// Raw handle value
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spec#{}", self.0)
    }
}

#[derive(Default)]
pub(crate) struct SpecificationCache {
    index: DashMap<TypeKey, SpecId>,
    table: DashMap<SpecId, Arc<ObjectSpecification>>,
    next_id: AtomicU64,
}

impl SpecificationCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, key: &TypeKey) -> Option<Arc<ObjectSpecification>> {
        let id = *self.index.get(key)?;
        self.get_by_id(id)
    }

    pub(crate) fn get_by_id(&self, id: SpecId) -> Option<Arc<ObjectSpecification>> {
        self.table.get(&id).map(|spec| Arc::clone(&spec))
    }

    /// The cached spec for `key`, or one made by `create` and stored
    /// atomically; the flag tells whether `create` ran
    pub(crate) fn get_or_create(
        &self,
        key: &TypeKey,
        create: impl FnOnce(SpecId) -> Arc<ObjectSpecification>,
    ) -> (Arc<ObjectSpecification>, bool) {
        match self.index.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                if let Some(spec) = self.get_by_id(*entry.get()) {
                    return (spec, false);
                }
                let spec = self.insert_new(create);
                entry.insert(spec.id());
                (spec, true)
            }
            Entry::Vacant(entry) => {
                let spec = self.insert_new(create);
                entry.insert(spec.id());
                (spec, true)
            }
        }
    }

    fn insert_new(
        &self,
        create: impl FnOnce(SpecId) -> Arc<ObjectSpecification>,
    ) -> Arc<ObjectSpecification> {
        let id = SpecId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let spec = create(id);
        self.table.insert(id, Arc::clone(&spec));
        spec
    }

    pub(crate) fn remove(&self, key: &TypeKey) -> Option<Arc<ObjectSpecification>> {
        let (_, id) = self.index.remove(key)?;
        self.table.remove(&id).map(|(_, spec)| spec)
    }

    /// Every cached spec in creation order
    pub(crate) fn values(&self) -> Vec<Arc<ObjectSpecification>> {
        let mut specs: Vec<Arc<ObjectSpecification>> =
            self.table.iter().map(|entry| Arc::clone(entry.value())).collect();
        specs.sort_by_key(|spec| spec.id());
        specs
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn clear(&self) {
        self.index.clear();
        self.table.clear();
    }
}
