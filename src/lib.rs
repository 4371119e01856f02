// Copyright 2025 Cowboy AI, LLC.

//! # Causeway Metamodel
//!
//! Metamodel introspection and facet resolution for annotated domain objects.
//!
//! Domain classes are described by [`ClassDescriptor`]s held in a
//! [`ClassRepository`]. From these, the [`SpecificationLoader`] builds one
//! [`ObjectSpecification`] per type:
//! - **Facets**: behavioural contracts installed by an ordered chain of
//!   [`FacetFactory`] plugins, resolved by precedence at read time
//! - **Members**: properties, collections and actions, built from faceted
//!   methods and sorted by policy
//! - **Mixins**: members contributed by mixin types on first access, with
//!   clash detection
//! - **Logical types**: stable names and aliases resolved to classes
//! - **Validation**: deferred, single-flight and re-entrant safe
//!
//! ## Lifecycle
//!
//! 1. Build a loader with [`SpecificationLoader::builder`]
//! 2. [`create_meta_model`](SpecificationLoader::create_meta_model) introspects
//!    every discovered type in waves
//! 3. Specs not reached during bootstrap are introspected lazily on lookup
//! 4. [`dispose_meta_model`](SpecificationLoader::dispose_meta_model) drops
//!    everything once pending validation has drained

#![warn(missing_docs)]

pub mod bean_sort;
pub mod bean_type_registry;
pub mod config;
pub mod errors;
pub mod facet_processor;
pub mod facets;
pub mod factories;
pub mod feature;
pub mod identifier;
pub mod loader;
pub mod logical_type_resolver;
pub mod memo;
pub mod naming;
pub mod programming_model;
pub mod reflection;
pub mod spec;
pub mod validators;

// Re-export core types
pub use bean_sort::{BeanMetaData, BeanSort, ManagedBy};
pub use bean_type_registry::BeanTypeRegistry;
pub use config::{IntrospectionMode, IntrospectionPolicy, MemberSortingPolicy, MetaModelConfig};
pub use errors::{MetaModelError, MetaModelResult};
pub use facet_processor::FacetProcessor;
pub use facets::{Facet, FacetHolder, Precedence};
pub use factories::FacetFactory;
pub use feature::{ActionScope, FeatureType, MixedIn};
pub use identifier::{Bookmark, Identifier, LogicalType};
pub use loader::{
    SpecId, SpecificationLoader, SpecificationLoaderBuilder, ValidationFailure, ValidationFailures,
};
pub use logical_type_resolver::LogicalTypeResolver;
pub use programming_model::ProgrammingModel;
pub use reflection::{ClassDescriptor, ClassRepository, MethodDescriptor, TypeKey, TypeRef};
pub use spec::{
    Depth, IntrospectionState, ObjectAction, ObjectAssociation, ObjectMember, ObjectSpecification,
};
pub use validators::MetaModelValidator;
