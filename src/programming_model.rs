// Copyright 2025 Cowboy AI, LLC.

//! The ordered registry of metamodel plugins

use std::sync::Arc;

use crate::config::MetaModelConfig;
use crate::factories::{
    ActionFacetFactory, CollectionAccessorFacetFactory, DomainObjectFacetFactory,
    DomainServiceFacetFactory, FacetFactory, MemberOrderFacetFactory, MemberSupportFacetFactory,
    NamedFacetFactory, ObjectSupportFacetFactory, ParameterSupportFacetFactory,
    PropertyAccessorFacetFactory, RemoveIgnoredMethodsFacetFactory, ValueFacetFactory,
};
use crate::spec::post_processing::{
    FallbackActionSemanticsPostProcessor, FallbackMemberNamesPostProcessor,
    ObjectSpecificationPostProcessor,
};
use crate::validators::{DomainIncludeValidator, LogicalTypeNameUniquenessValidator, MetaModelValidator};

/// Facet factories, post-processors and validators, each in the order they run
#[derive(Clone, Default)]
pub struct ProgrammingModel {
    factories: Vec<Arc<dyn FacetFactory>>,
    post_processors: Vec<Arc<dyn ObjectSpecificationPostProcessor>>,
    validators: Vec<Arc<dyn MetaModelValidator>>,
}

impl ProgrammingModel {
    /// An empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in plugins
    pub fn default_model(config: &MetaModelConfig) -> Self {
        Self::new()
            .with_factory(RemoveIgnoredMethodsFacetFactory)
            .with_factory(DomainObjectFacetFactory::new(config.mixin_main_method.clone()))
            .with_factory(DomainServiceFacetFactory)
            .with_factory(ValueFacetFactory)
            .with_factory(NamedFacetFactory)
            .with_factory(ObjectSupportFacetFactory)
            .with_factory(PropertyAccessorFacetFactory)
            .with_factory(CollectionAccessorFacetFactory)
            .with_factory(ActionFacetFactory)
            .with_factory(MemberOrderFacetFactory)
            .with_factory(MemberSupportFacetFactory)
            .with_factory(ParameterSupportFacetFactory)
            .with_post_processor(FallbackMemberNamesPostProcessor)
            .with_post_processor(FallbackActionSemanticsPostProcessor)
            .with_validator(DomainIncludeValidator)
            .with_validator(LogicalTypeNameUniquenessValidator)
    }

    /// Append a facet factory
    pub fn with_factory(mut self, factory: impl FacetFactory + 'static) -> Self {
        self.factories.push(Arc::new(factory));
        self
    }

    /// Append a post-processor
    pub fn with_post_processor(
        mut self,
        post_processor: impl ObjectSpecificationPostProcessor + 'static,
    ) -> Self {
        self.post_processors.push(Arc::new(post_processor));
        self
    }

    /// Append a validator
    pub fn with_validator(mut self, validator: impl MetaModelValidator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Registered facet factories
    pub fn factories(&self) -> &[Arc<dyn FacetFactory>] {
        &self.factories
    }

    /// Registered post-processors
    pub fn post_processors(&self) -> &[Arc<dyn ObjectSpecificationPostProcessor>] {
        &self.post_processors
    }

    /// Registered validators
    pub fn validators(&self) -> &[Arc<dyn MetaModelValidator>] {
        &self.validators
    }
}

impl std::fmt::Debug for ProgrammingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgrammingModel")
            .field("factories", &self.factories.iter().map(|p| p.name()).collect::<Vec<_>>())
            .field(
                "post_processors",
                &self.post_processors.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("validators", &self.validators.iter().map(|v| v.name()).collect::<Vec<_>>())
            .finish()
    }
}
