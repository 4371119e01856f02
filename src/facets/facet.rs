// Copyright 2025 Cowboy AI, LLC.

//! The facet trait and precedence tiers

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::reflection::MethodDescriptor;

/// Rank used to pick a winner among competing facets of one type
///
/// Ordered from weakest to strongest. A `Fallback` facet only wins when
/// nothing better exists anywhere in the type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Precedence {
    /// Used when nothing else applies
    Fallback,
    /// Derived from conventions
    Inferred,
    /// Declared through the programming model
    Default,
    /// Declared explicitly, overriding defaults
    High,
    /// Installed by event handling, beats everything
    Event,
}

impl Precedence {
    /// Whether this is the fallback tier
    pub fn is_fallback(self) -> bool {
        self == Precedence::Fallback
    }
}

/// Object-safe downcasting support for facets
pub trait FacetAny: Any + Send + Sync {
    /// Borrow as `Any`
    fn as_any(&self) -> &dyn Any;

    /// Convert into a shared `Any` for downcasting
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> FacetAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A behavioural contract attached to a metamodel element
///
/// Facets are keyed by their concrete type: a holder keeps at most one
/// winning facet per type.
///
/// # Example
///
/// ```
/// use causeway_metamodel::facets::{Facet, FacetHolder, Precedence};
///
/// #[derive(Debug)]
/// struct Immutable(Precedence);
///
/// impl Facet for Immutable {
///     fn precedence(&self) -> Precedence { self.0 }
/// }
///
/// let holder = FacetHolder::new();
/// holder.add_facet(Immutable(Precedence::Fallback));
/// holder.add_facet(Immutable(Precedence::High));
/// assert_eq!(holder.get::<Immutable>().unwrap().0, Precedence::High);
/// ```
pub trait Facet: FacetAny + fmt::Debug {
    /// Rank among competing facets of the same type
    fn precedence(&self) -> Precedence;

    /// Name used in logs and diagnostics
    fn facet_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Support methods this facet claimed from the class
    fn support_methods(&self) -> Vec<Arc<MethodDescriptor>> {
        Vec::new()
    }
}
