// Copyright 2025 Cowboy AI, LLC.

//! Ranked storage of competing facets

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use super::facet::{Facet, Precedence};
use crate::reflection::MethodDescriptor;

/// Competing facets of one type, in insertion order
#[derive(Clone, Default)]
struct FacetRanking {
    entries: Vec<Arc<dyn Facet>>,
}

impl FacetRanking {
    /// Highest precedence wins; among equals the latest added wins
    fn winner(&self) -> Option<&Arc<dyn Facet>> {
        self.entries
            .iter()
            .fold(None, |best: Option<&Arc<dyn Facet>>, candidate| match best {
                Some(current) if current.precedence() > candidate.precedence() => Some(current),
                _ => Some(candidate),
            })
    }
}

/// Stores the facets of one metamodel element
///
/// Facets are added from `&self` so holders can live inside shared
/// specifications while introspection is still running.
#[derive(Default)]
pub struct FacetHolder {
    rankings: RwLock<IndexMap<TypeId, FacetRanking>>,
}

impl FacetHolder {
    /// Create an empty holder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a facet, competing with any existing facet of the same type
    pub fn add_facet<F: Facet>(&self, facet: F) {
        self.add_facet_arc(Arc::new(facet));
    }

    /// Add an already shared facet
    pub fn add_facet_arc(&self, facet: Arc<dyn Facet>) {
        // deref first: `Arc<dyn Facet>` is itself `Any`
        let key = (*facet).as_any().type_id();
        self.rankings
            .write()
            .entry(key)
            .or_default()
            .entries
            .push(facet);
    }

    /// The winning facet of type `F`, if any
    pub fn get<F: Facet>(&self) -> Option<Arc<F>> {
        let winner = self
            .rankings
            .read()
            .get(&TypeId::of::<F>())
            .and_then(|ranking| ranking.winner().cloned())?;
        winner.into_any_arc().downcast::<F>().ok()
    }

    /// Precedence of the winning facet of type `F`
    pub fn precedence_of<F: Facet>(&self) -> Option<Precedence> {
        self.rankings
            .read()
            .get(&TypeId::of::<F>())
            .and_then(|ranking| ranking.winner().map(|f| f.precedence()))
    }

    /// Whether any facet of type `F` is present
    pub fn contains<F: Facet>(&self) -> bool {
        self.rankings.read().contains_key(&TypeId::of::<F>())
    }

    /// Whether a facet of type `F` better than fallback is present
    pub fn contains_non_fallback<F: Facet>(&self) -> bool {
        self.precedence_of::<F>()
            .is_some_and(|precedence| !precedence.is_fallback())
    }

    /// All competitors of type `F`, in insertion order
    pub fn ranking<F: Facet>(&self) -> Vec<Arc<dyn Facet>> {
        self.rankings
            .read()
            .get(&TypeId::of::<F>())
            .map(|ranking| ranking.entries.clone())
            .unwrap_or_default()
    }

    /// Remove every facet of type `F`
    pub fn remove<F: Facet>(&self) -> bool {
        self.rankings
            .write()
            .shift_remove(&TypeId::of::<F>())
            .is_some()
    }

    /// The winning facet of every type
    pub fn facets(&self) -> Vec<Arc<dyn Facet>> {
        self.rankings
            .read()
            .values()
            .filter_map(|ranking| ranking.winner().cloned())
            .collect()
    }

    /// Support methods claimed by any facet in this holder
    pub fn support_methods(&self) -> Vec<Arc<MethodDescriptor>> {
        self.rankings
            .read()
            .values()
            .flat_map(|ranking| ranking.entries.iter())
            .flat_map(|facet| facet.support_methods())
            .collect()
    }

    /// Add every competitor of `other` to this holder
    pub fn copy_from(&self, other: &FacetHolder) {
        let source = other.rankings.read().clone();
        let mut target = self.rankings.write();
        for (key, ranking) in source {
            target
                .entry(key)
                .or_default()
                .entries
                .extend(ranking.entries);
        }
    }

    /// Number of facet types held
    pub fn len(&self) -> usize {
        self.rankings.read().len()
    }

    /// Whether no facets are held
    pub fn is_empty(&self) -> bool {
        self.rankings.read().is_empty()
    }
}

impl fmt::Debug for FacetHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.facets().iter().map(|facet| facet.facet_name()).collect();
        f.debug_struct("FacetHolder").field("facets", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Marker {
        label: &'static str,
        precedence: Precedence,
    }

    impl Facet for Marker {
        fn precedence(&self) -> Precedence {
            self.precedence
        }
    }

    #[derive(Debug)]
    struct Other;

    impl Facet for Other {
        fn precedence(&self) -> Precedence {
            Precedence::Default
        }
    }

    fn marker(label: &'static str, precedence: Precedence) -> Marker {
        Marker { label, precedence }
    }

    #[test]
    fn test_higher_precedence_wins() {
        let holder = FacetHolder::new();
        holder.add_facet(marker("fallback", Precedence::Fallback));
        holder.add_facet(marker("high", Precedence::High));
        holder.add_facet(marker("default", Precedence::Default));
        assert_eq!(holder.get::<Marker>().unwrap().label, "high");
        assert_eq!(holder.ranking::<Marker>().len(), 3);
    }

    #[test]
    fn test_latest_wins_among_equals() {
        let holder = FacetHolder::new();
        holder.add_facet(marker("first", Precedence::Default));
        holder.add_facet(marker("second", Precedence::Default));
        assert_eq!(holder.get::<Marker>().unwrap().label, "second");
    }

    #[test]
    fn test_fallback_alone_is_returned() {
        let holder = FacetHolder::new();
        holder.add_facet(marker("fallback", Precedence::Fallback));
        assert_eq!(holder.get::<Marker>().unwrap().label, "fallback");
        assert!(holder.contains::<Marker>());
        assert!(!holder.contains_non_fallback::<Marker>());
    }

    #[test]
    fn test_facet_types_are_independent() {
        let holder = FacetHolder::new();
        holder.add_facet(Other);
        assert!(holder.get::<Marker>().is_none());
        assert!(holder.get::<Other>().is_some());
        assert!(holder.remove::<Other>());
        assert!(holder.is_empty());
    }

    #[test]
    fn test_copy_from_merges_rankings() {
        let source = FacetHolder::new();
        source.add_facet(marker("copied", Precedence::High));
        let target = FacetHolder::new();
        target.add_facet(marker("own", Precedence::Default));
        target.copy_from(&source);
        assert_eq!(target.get::<Marker>().unwrap().label, "copied");
    }
}
