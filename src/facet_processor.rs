// Copyright 2025 Cowboy AI, LLC.

//! Dispatch of facet factories during introspection

use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

use crate::config::IntrospectionPolicy;
use crate::errors::{MetaModelError, MetaModelResult};
use crate::facets::FacetHolder;
use crate::factories::{
    has_support_prefix, FacetFactory, MethodRemover, ProcessClassContext, ProcessMethodContext,
    ProcessParameterContext,
};
use crate::feature::FeatureType;
use crate::reflection::{ClassDescriptor, ClassRepository, MethodDescriptor};
use crate::spec::ObjectSpecification;

/// Owns the ordered factory list and the indexes built from it
///
/// Order matters everywhere: when two accessor factories could claim the
/// same method the earlier one wins, so every index is an ordered list.
pub struct FacetProcessor {
    factories: Vec<Arc<dyn FacetFactory>>,
    factories_by_feature_type: HashMap<FeatureType, Vec<Arc<dyn FacetFactory>>>,
    method_prefixes: Vec<&'static str>,
    property_accessor_factories: Vec<Arc<dyn FacetFactory>>,
    collection_accessor_factories: Vec<Arc<dyn FacetFactory>>,
    object_spec_refiners: Vec<Arc<dyn FacetFactory>>,
}

impl FacetProcessor {
    /// Index `factories`, keeping their order
    pub fn new(factories: Vec<Arc<dyn FacetFactory>>) -> Self {
        let mut factories_by_feature_type: HashMap<FeatureType, Vec<Arc<dyn FacetFactory>>> =
            HashMap::new();
        let mut method_prefixes = Vec::new();
        let mut property_accessor_factories = Vec::new();
        let mut collection_accessor_factories = Vec::new();
        let mut object_spec_refiners = Vec::new();

        for factory in &factories {
            for feature_type in factory.feature_types() {
                factories_by_feature_type
                    .entry(*feature_type)
                    .or_default()
                    .push(Arc::clone(factory));
            }
            for prefix in factory.method_prefixes() {
                if !method_prefixes.contains(prefix) {
                    method_prefixes.push(*prefix);
                }
            }
            if let Some(accessor) = factory.as_accessor_factory() {
                match accessor.accessor_feature_type() {
                    FeatureType::Property => property_accessor_factories.push(Arc::clone(factory)),
                    FeatureType::Collection => {
                        collection_accessor_factories.push(Arc::clone(factory))
                    }
                    _ => {}
                }
            }
            if factory.feature_types().contains(&FeatureType::Object)
                && factory.as_object_spec_refiner().is_some()
            {
                object_spec_refiners.push(Arc::clone(factory));
            }
        }

        Self {
            factories,
            factories_by_feature_type,
            method_prefixes,
            property_accessor_factories,
            collection_accessor_factories,
            object_spec_refiners,
        }
    }

    /// Every registered factory, in order
    pub fn factories(&self) -> &[Arc<dyn FacetFactory>] {
        &self.factories
    }

    /// Factories for one feature type, in order
    pub fn factories_for(&self, feature_type: FeatureType) -> &[Arc<dyn FacetFactory>] {
        self.factories_by_feature_type
            .get(&feature_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Union of the support method prefixes
    pub fn method_prefixes(&self) -> &[&'static str] {
        &self.method_prefixes
    }

    /// Run every object factory against a class
    pub fn process_class(
        &self,
        class: &ClassDescriptor,
        classes: &ClassRepository,
        policy: IntrospectionPolicy,
        remover: &mut MethodRemover,
        holder: &FacetHolder,
    ) -> MetaModelResult<()> {
        for factory in self.factories_for(FeatureType::Object) {
            let mut ctx = ProcessClassContext {
                class,
                classes,
                holder,
                policy,
                remover: &mut *remover,
            };
            factory
                .process_class(&mut ctx)
                .map_err(|source| MetaModelError::FacetFactory {
                    factory: factory.name(),
                    target: class.name.to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Run the factories of `feature_type` against a member method
    #[allow(clippy::too_many_arguments)]
    pub fn process_method(
        &self,
        class: &ClassDescriptor,
        policy: IntrospectionPolicy,
        method: &Arc<MethodDescriptor>,
        member_id: &str,
        remover: &mut MethodRemover,
        holder: &FacetHolder,
        feature_type: FeatureType,
        is_mixin_main: bool,
    ) -> MetaModelResult<()> {
        for factory in self.factories_for(feature_type) {
            let mut ctx = ProcessMethodContext {
                class,
                method,
                member_id,
                feature_type,
                is_mixin_main,
                holder,
                policy,
                remover: &mut *remover,
            };
            factory
                .process_method(&mut ctx)
                .map_err(|source| MetaModelError::FacetFactory {
                    factory: factory.name(),
                    target: method.to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Run the parameter factories against one parameter
    ///
    /// Factories registered for both singular and plural parameters run
    /// once, in registration order.
    #[allow(clippy::too_many_arguments)]
    pub fn process_params(
        &self,
        class: &ClassDescriptor,
        action_method: &Arc<MethodDescriptor>,
        action_id: &str,
        index: usize,
        feature_type: FeatureType,
        remover: &mut MethodRemover,
        holder: &FacetHolder,
    ) -> MetaModelResult<()> {
        let Some(parameter) = action_method.parameters.get(index) else {
            return Err(MetaModelError::internal(format!(
                "{action_method} has no parameter {index}"
            )));
        };
        for factory in self.parameter_factories() {
            let mut ctx = ProcessParameterContext {
                class,
                action_method,
                action_id,
                index,
                parameter,
                feature_type,
                holder,
                remover: &mut *remover,
            };
            factory
                .process_param(&mut ctx)
                .map_err(|source| MetaModelError::FacetFactory {
                    factory: factory.name(),
                    target: format!("{action_method}[{index}]"),
                    source,
                })?;
        }
        Ok(())
    }

    /// Factories of both parameter feature types, de-duplicated, in order
    pub fn parameter_factories(&self) -> Vec<Arc<dyn FacetFactory>> {
        let mut unique: Vec<Arc<dyn FacetFactory>> = Vec::new();
        for factory in self
            .factories
            .iter()
            .filter(|f| f.feature_types().iter().any(|t| t.is_parameter()))
        {
            if !unique.iter().any(|seen| Arc::ptr_eq(seen, factory)) {
                unique.push(Arc::clone(factory));
            }
        }
        unique
    }

    /// Run the refining object factories against a specification
    pub fn process_object_specification(&self, spec: &ObjectSpecification) -> MetaModelResult<()> {
        for factory in &self.object_spec_refiners {
            if let Some(refiner) = factory.as_object_spec_refiner() {
                refiner
                    .refine(spec)
                    .map_err(|source| MetaModelError::FacetFactory {
                        factory: factory.name(),
                        target: spec.class_key().to_string(),
                        source,
                    })?;
            }
        }
        Ok(())
    }

    /// Whether `method` is a framework method: it carries a support prefix
    /// or some factory claims it
    pub fn recognizes(&self, method: &MethodDescriptor) -> bool {
        self.method_prefixes
            .iter()
            .any(|prefix| has_support_prefix(&method.name, prefix))
            || self.factories.iter().any(|f| f.recognizes(method))
    }

    /// Claim property getters; the first matching factory wins per method
    pub fn find_and_remove_property_accessors(
        &self,
        remover: &mut MethodRemover,
    ) -> Vec<Arc<MethodDescriptor>> {
        Self::find_and_remove_accessors(&self.property_accessor_factories, remover)
    }

    /// Claim collection getters; the first matching factory wins per method
    pub fn find_and_remove_collection_accessors(
        &self,
        remover: &mut MethodRemover,
    ) -> Vec<Arc<MethodDescriptor>> {
        Self::find_and_remove_accessors(&self.collection_accessor_factories, remover)
    }

    fn find_and_remove_accessors(
        factories: &[Arc<dyn FacetFactory>],
        remover: &mut MethodRemover,
    ) -> Vec<Arc<MethodDescriptor>> {
        let mut found = Vec::new();
        for factory in factories {
            if let Some(accessor) = factory.as_accessor_factory() {
                let claimed = accessor.find_and_remove_accessors(remover);
                trace!(factory = factory.name(), claimed = claimed.len(), "accessors claimed");
                found.extend(claimed);
            }
        }
        found
    }
}

impl std::fmt::Debug for FacetProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.factories.iter().map(|f| f.name()).collect();
        f.debug_struct("FacetProcessor")
            .field("factories", &names)
            .field("method_prefixes", &self.method_prefixes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetaModelConfig;
    use crate::programming_model::ProgrammingModel;
    use crate::reflection::TypeRef;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct CountingParamFactory {
        calls: Mutex<usize>,
    }

    impl FacetFactory for CountingParamFactory {
        fn name(&self) -> &'static str {
            "CountingParam"
        }

        fn feature_types(&self) -> &[FeatureType] {
            &FeatureType::PARAMETERS
        }

        fn process_param(&self, _ctx: &mut ProcessParameterContext<'_>) -> anyhow::Result<()> {
            *self.calls.lock() += 1;
            Ok(())
        }
    }

    struct FailingFactory;

    impl FacetFactory for FailingFactory {
        fn name(&self) -> &'static str {
            "Failing"
        }

        fn feature_types(&self) -> &[FeatureType] {
            &[FeatureType::Object]
        }

        fn process_class(&self, _ctx: &mut ProcessClassContext<'_>) -> anyhow::Result<()> {
            anyhow::bail!("boom")
        }
    }

    fn default_processor() -> FacetProcessor {
        FacetProcessor::new(ProgrammingModel::default_model(&MetaModelConfig::default()).factories().to_vec())
    }

    #[test]
    fn test_indexes_follow_registration_order() {
        let processor = default_processor();
        assert_eq!(processor.method_prefixes(), &["hide", "disable", "validate", "default", "choices"]);
        let object_names: Vec<_> = processor
            .factories_for(FeatureType::Object)
            .iter()
            .map(|f| f.name())
            .collect();
        assert_eq!(object_names.first(), Some(&"RemoveIgnoredMethods"));
        assert!(processor.factories_for(FeatureType::Property).len() >= 3);
    }

    #[test]
    fn test_parameter_factories_run_once() {
        let counting = Arc::new(CountingParamFactory::default());
        let processor = FacetProcessor::new(vec![counting.clone() as Arc<dyn FacetFactory>]);
        let class = ClassDescriptor::builder("Customer")
            .method(MethodDescriptor::builder("rename").param("name", TypeRef::of("String")))
            .build();
        let action = Arc::clone(&class.methods[0]);
        let mut remover = MethodRemover::default();
        processor
            .process_params(
                &class,
                &action,
                "rename",
                0,
                FeatureType::ActionParameterSingular,
                &mut remover,
                &FacetHolder::new(),
            )
            .unwrap();
        assert_eq!(processor.parameter_factories().len(), 1);
        assert_eq!(*counting.calls.lock(), 1);
    }

    #[test]
    fn test_recognizes_support_methods() {
        let processor = default_processor();
        let hide = MethodDescriptor::builder("hideName").build();
        let title = MethodDescriptor::builder("title").build();
        let business = MethodDescriptor::builder("hideout").build();
        assert!(processor.recognizes(&hide));
        assert!(processor.recognizes(&title));
        assert!(!processor.recognizes(&business));
    }

    #[test]
    fn test_first_accessor_factory_wins() {
        let processor = default_processor();
        let mut remover = MethodRemover::new(vec![
            Arc::new(MethodDescriptor::builder("getName").returns(TypeRef::of("String")).build()),
            Arc::new(
                MethodDescriptor::builder("getOrders")
                    .returns(TypeRef::collection_of("List", "Order"))
                    .build(),
            ),
        ]);
        let collections = processor.find_and_remove_collection_accessors(&mut remover);
        let properties = processor.find_and_remove_property_accessors(&mut remover);
        assert_eq!(collections.len(), 1);
        assert_eq!(properties.len(), 1);
        assert!(remover.is_empty());
    }

    #[test]
    fn test_factory_errors_name_the_factory() {
        let processor = FacetProcessor::new(vec![Arc::new(FailingFactory) as Arc<dyn FacetFactory>]);
        let class = ClassDescriptor::builder("Customer").build();
        let err = processor
            .process_class(
                &class,
                &ClassRepository::new(),
                IntrospectionPolicy::AnnotationOptional,
                &mut MethodRemover::default(),
                &FacetHolder::new(),
            )
            .unwrap_err();
        assert!(err.is_bootstrap_fatal());
        assert!(err.to_string().contains("Failing"));
    }
}
