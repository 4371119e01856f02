// Copyright 2025 Cowboy AI, LLC.

//! Decides which class actually gets a specification

use std::collections::HashSet;

use crate::reflection::TypeKey;

/// Marker separating a generated proxy name from its base class
const PROXY_MARKER: &str = "$$";

/// Outcome of substituting a requested class
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// Introspect the class as requested
    Retain,
    /// Introspect another class instead
    ReplaceWith(TypeKey),
    /// Never create a specification for the class
    NeverIntrospect,
}

/// Maps requested classes to the classes that are introspected
///
/// Generated proxies (`Base$$Proxy`) are replaced by their base class;
/// `void` and configured framework types are never introspected.
#[derive(Debug, Clone, Default)]
pub struct ClassSubstitutor {
    never_introspect: HashSet<TypeKey>,
}

impl ClassSubstitutor {
    /// Substitutor skipping `never_introspect`
    pub fn new(never_introspect: impl IntoIterator<Item = impl Into<TypeKey>>) -> Self {
        Self {
            never_introspect: never_introspect.into_iter().map(Into::into).collect(),
        }
    }

    /// Substitution for `class`
    pub fn substitute(&self, class: &TypeKey) -> Substitution {
        if class.is_void() || self.never_introspect.contains(class) {
            return Substitution::NeverIntrospect;
        }
        match class.as_str().split_once(PROXY_MARKER) {
            Some((base, _)) if !base.is_empty() => {
                let base = TypeKey::new(base);
                if self.never_introspect.contains(&base) {
                    Substitution::NeverIntrospect
                } else {
                    Substitution::ReplaceWith(base)
                }
            }
            _ => Substitution::Retain,
        }
    }

    /// Whether `class` is never introspected
    pub fn is_never_introspected(&self, class: &TypeKey) -> bool {
        self.substitute(class) == Substitution::NeverIntrospect
    }
}
