// Copyright 2025 Cowboy AI, LLC.

//! Memoizing cells and one-shot triggers

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A value computed on first access and cached until cleared.
///
/// The supplier runs outside the internal lock, so a supplier may itself
/// read other memos (or even this one, which then computes twice) without
/// deadlocking. When two threads race, the first stored value wins. A value
/// computed across a [`clear`](Self::clear) is returned to its caller but
/// never stored.
pub struct Memo<T> {
    slot: Mutex<Slot<T>>,
}

struct Slot<T> {
    value: Option<Arc<T>>,
    generation: u64,
}

impl<T> Memo<T> {
    /// Create an empty memo
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: None,
                generation: 0,
            }),
        }
    }

    /// The cached value, or the generation a computation must store under
    fn lookup(&self) -> Result<Arc<T>, u64> {
        let slot = self.slot.lock();
        match slot.value.as_ref() {
            Some(value) => Ok(Arc::clone(value)),
            None => Err(slot.generation),
        }
    }

    fn store(&self, generation: u64, computed: Arc<T>) -> Arc<T> {
        let mut slot = self.slot.lock();
        if slot.generation != generation {
            return computed;
        }
        Arc::clone(slot.value.get_or_insert(computed))
    }

    /// Return the cached value, computing it with `supplier` if absent
    pub fn get_or_compute(&self, supplier: impl FnOnce() -> T) -> Arc<T> {
        match self.lookup() {
            Ok(value) => value,
            Err(generation) => self.store(generation, Arc::new(supplier())),
        }
    }

    /// Fallible variant of [`get_or_compute`](Self::get_or_compute)
    pub fn try_get_or_compute<E>(
        &self,
        supplier: impl FnOnce() -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        match self.lookup() {
            Ok(value) => Ok(value),
            Err(generation) => Ok(self.store(generation, Arc::new(supplier()?))),
        }
    }

    /// Return the cached value without computing
    pub fn peek(&self) -> Option<Arc<T>> {
        self.slot.lock().value.clone()
    }

    /// Whether a value is currently cached
    pub fn is_memoized(&self) -> bool {
        self.slot.lock().value.is_some()
    }

    /// Drop the cached value; computations already running will not store
    pub fn clear(&self) {
        let mut slot = self.slot.lock();
        slot.value = None;
        slot.generation = slot.generation.wrapping_add(1);
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memo").field("value", &self.peek()).finish()
    }
}

/// A trigger that fires at most once.
#[derive(Debug, Default)]
pub struct OneShot {
    fired: AtomicBool,
}

impl OneShot {
    /// Create an unfired trigger
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Fire the trigger; returns `true` only for the caller that fired it
    pub fn fire(&self) -> bool {
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether the trigger has already fired
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Let the trigger fire again, after the work it guarded failed
    pub fn rearm(&self) {
        self.fired.store(false, Ordering::Release);
    }
}
