// Copyright 2025 Cowboy AI, LLC.

//! Facet factories
//!
//! A facet factory inspects a class, a method or a parameter and installs
//! facets on the matching holder. Factories are plain objects registered in
//! order on a [`ProgrammingModel`](crate::ProgrammingModel); the
//! [`FacetProcessor`](crate::FacetProcessor) indexes them and drives the
//! calls during introspection.
//!
//! Optional capabilities are exposed through the `as_*` accessors rather
//! than downcasting:
//!
//! - method prefixes ([`FacetFactory::method_prefixes`]) mark methods such as
//!   `hideName` as framework support methods,
//! - [`FacetFactory::recognizes`] claims individual methods by other rules,
//! - [`AccessorFacetFactory`] identifies property and collection getters,
//! - [`ObjectSpecRefiner`] refines a specification after its object facets
//!   are in place.

mod accessor;
mod action;
mod context;
mod member_support;
mod object;

pub use accessor::{CollectionAccessorFacetFactory, PropertyAccessorFacetFactory};
pub use action::{ActionFacetFactory, MemberOrderFacetFactory, NamedFacetFactory};
pub use context::{MethodRemover, ProcessClassContext, ProcessMethodContext, ProcessParameterContext};
pub use member_support::{MemberSupportFacetFactory, ParameterSupportFacetFactory};
pub(crate) use object::inherited_exclusion;
pub use object::{
    DomainObjectFacetFactory, DomainServiceFacetFactory, ObjectSupportFacetFactory,
    RemoveIgnoredMethodsFacetFactory, ValueFacetFactory,
};

use std::sync::Arc;

use crate::feature::FeatureType;
use crate::reflection::MethodDescriptor;
use crate::spec::ObjectSpecification;

/// Plugin contract for everything that installs facets
pub trait FacetFactory: Send + Sync {
    /// Name used in errors and logs
    fn name(&self) -> &'static str;

    /// Feature types this factory processes
    fn feature_types(&self) -> &[FeatureType];

    /// Process a class; may consume methods through the remover
    fn process_class(&self, _ctx: &mut ProcessClassContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Process a property, collection or action method
    fn process_method(&self, _ctx: &mut ProcessMethodContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Process one action parameter
    fn process_param(&self, _ctx: &mut ProcessParameterContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Method name prefixes of the support methods this factory consumes
    fn method_prefixes(&self) -> &[&'static str] {
        &[]
    }

    /// Whether this factory claims `method` as a framework method
    fn recognizes(&self, _method: &MethodDescriptor) -> bool {
        false
    }

    /// Accessor identification capability
    fn as_accessor_factory(&self) -> Option<&dyn AccessorFacetFactory> {
        None
    }

    /// Specification refinement capability
    fn as_object_spec_refiner(&self) -> Option<&dyn ObjectSpecRefiner> {
        None
    }
}

/// Identifies getters for properties or collections
pub trait AccessorFacetFactory: Send + Sync {
    /// Either [`FeatureType::Property`] or [`FeatureType::Collection`]
    fn accessor_feature_type(&self) -> FeatureType;

    /// Whether `method` is an accessor of this kind
    fn is_accessor(&self, method: &MethodDescriptor) -> bool;

    /// Remove and return every accessor still held by `remover`
    fn find_and_remove_accessors(&self, remover: &mut MethodRemover) -> Vec<Arc<MethodDescriptor>> {
        remover.remove_where(|method| self.is_accessor(method))
    }
}

/// Refines a specification once its object-level facets are installed
pub trait ObjectSpecRefiner: Send + Sync {
    /// Refine `spec`
    fn refine(&self, spec: &ObjectSpecification) -> anyhow::Result<()>;
}

/// Whether `method_name` is `prefix` followed by an upper-case letter or a
/// digit, so that `hideName` matches `hide` but `hideout` does not
pub(crate) fn has_support_prefix(method_name: &str, prefix: &str) -> bool {
    method_name
        .strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("hideName", "hide", true)]
    #[test_case("default0PlaceOrder", "default", true)]
    #[test_case("hideout", "hide", false)]
    #[test_case("hide", "hide", false)]
    #[test_case("getName", "hide", false)]
    fn test_support_prefix(name: &str, prefix: &str, expected: bool) {
        assert_eq!(has_support_prefix(name, prefix), expected);
    }
}
