// Copyright 2025 Cowboy AI, LLC.

//! The specification loader and its collaborators

mod cache;
mod class_substitutor;
mod service_registry;
mod specification_loader;
mod validation;
mod value_semantics;

pub use cache::SpecId;
pub use class_substitutor::{ClassSubstitutor, Substitution};
pub use service_registry::{
    InMemoryServiceRegistry, ServiceDescriptor, ServiceInstance, ServiceLifetime, ServiceRegistry,
};
pub use specification_loader::{SpecificationLoader, SpecificationLoaderBuilder};
pub use validation::{ValidationFailure, ValidationFailures};
pub use value_semantics::{StaticValueSemantics, ValueSemanticsProvider};
