// Copyright 2025 Cowboy AI, LLC.

//! Processing contexts handed to facet factories

use std::sync::Arc;

use crate::config::IntrospectionPolicy;
use crate::facets::FacetHolder;
use crate::feature::FeatureType;
use crate::reflection::{ClassDescriptor, ClassRepository, MethodDescriptor, ParameterDescriptor};

/// The methods of a class not yet claimed by any factory
#[derive(Debug, Clone, Default)]
pub struct MethodRemover {
    methods: Vec<Arc<MethodDescriptor>>,
}

impl MethodRemover {
    /// Start with every candidate method
    pub fn new(methods: Vec<Arc<MethodDescriptor>>) -> Self {
        Self { methods }
    }

    /// Methods still unclaimed, in declaration order
    pub fn remaining(&self) -> &[Arc<MethodDescriptor>] {
        &self.methods
    }

    /// Whether `method` is still unclaimed
    pub fn contains(&self, method: &MethodDescriptor) -> bool {
        self.methods.iter().any(|m| **m == *method)
    }

    /// Claim one method; returns whether it was still present
    pub fn remove(&mut self, method: &MethodDescriptor) -> bool {
        let before = self.methods.len();
        self.methods.retain(|m| **m != *method);
        self.methods.len() != before
    }

    /// Claim every method matching `predicate`
    pub fn remove_where(
        &mut self,
        mut predicate: impl FnMut(&MethodDescriptor) -> bool,
    ) -> Vec<Arc<MethodDescriptor>> {
        let mut removed = Vec::new();
        self.methods.retain(|method| {
            if predicate(method) {
                removed.push(Arc::clone(method));
                false
            } else {
                true
            }
        });
        removed
    }

    /// Claim the first public method called `name`, optionally with an
    /// exact parameter count
    pub fn take_named(&mut self, name: &str, param_count: Option<usize>) -> Option<Arc<MethodDescriptor>> {
        let index = self.methods.iter().position(|m| {
            m.name == name
                && m.is_public()
                && param_count.map_or(true, |count| m.param_count() == count)
        })?;
        Some(self.methods.remove(index))
    }

    /// Number of unclaimed methods
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether every method has been claimed
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Context for processing a class
pub struct ProcessClassContext<'a> {
    /// Class being introspected
    pub class: &'a ClassDescriptor,
    /// Known classes, for looking at ancestors
    pub classes: &'a ClassRepository,
    /// Holder of the specification's object facets
    pub holder: &'a FacetHolder,
    /// Active introspection policy
    pub policy: IntrospectionPolicy,
    /// Unclaimed methods of the class
    pub remover: &'a mut MethodRemover,
}

/// Context for processing a member method
pub struct ProcessMethodContext<'a> {
    /// Class declaring the member
    pub class: &'a ClassDescriptor,
    /// The accessor or action method
    pub method: &'a Arc<MethodDescriptor>,
    /// Member id, e.g. `name` for `getName`
    pub member_id: &'a str,
    /// What kind of member is being built
    pub feature_type: FeatureType,
    /// Whether this is the main method of a mixin
    pub is_mixin_main: bool,
    /// Holder of the member's facets
    pub holder: &'a FacetHolder,
    /// Active introspection policy
    pub policy: IntrospectionPolicy,
    /// Unclaimed methods of the class
    pub remover: &'a mut MethodRemover,
}

/// Context for processing one action parameter
pub struct ProcessParameterContext<'a> {
    /// Class declaring the action
    pub class: &'a ClassDescriptor,
    /// The action method
    pub action_method: &'a Arc<MethodDescriptor>,
    /// Member id of the action
    pub action_id: &'a str,
    /// Zero-based parameter index
    pub index: usize,
    /// The parameter
    pub parameter: &'a ParameterDescriptor,
    /// Singular or plural parameter
    pub feature_type: FeatureType,
    /// Holder of the parameter's facets
    pub holder: &'a FacetHolder,
    /// Unclaimed methods of the class
    pub remover: &'a mut MethodRemover,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::{TypeRef, Visibility};

    fn methods() -> Vec<Arc<MethodDescriptor>> {
        vec![
            Arc::new(MethodDescriptor::builder("getName").returns(TypeRef::of("String")).build()),
            Arc::new(MethodDescriptor::builder("hideName").build()),
            Arc::new(
                MethodDescriptor::builder("hideName")
                    .param("x", TypeRef::of("int"))
                    .build(),
            ),
            Arc::new(
                MethodDescriptor::builder("secret")
                    .visibility(Visibility::Private)
                    .build(),
            ),
        ]
    }

    #[test]
    fn test_take_named_respects_param_count() {
        let mut remover = MethodRemover::new(methods());
        let taken = remover.take_named("hideName", Some(1)).unwrap();
        assert_eq!(taken.param_count(), 1);
        assert_eq!(remover.len(), 3);
        assert!(remover.take_named("hideName", Some(1)).is_none());
        assert!(remover.take_named("secret", None).is_none());
    }

    #[test]
    fn test_remove_where_returns_claimed_methods() {
        let mut remover = MethodRemover::new(methods());
        let claimed = remover.remove_where(|m| m.name.starts_with("hide"));
        assert_eq!(claimed.len(), 2);
        assert_eq!(remover.len(), 2);
        assert!(!remover.contains(&claimed[0]));
        assert!(remover.remove(&methods()[0]));
        assert!(!remover.remove(&methods()[0]));
    }
}
