// Copyright 2025 Cowboy AI, LLC.

//! Faceted methods: the raw material members are built from

use std::sync::Arc;
use tracing::trace;

use crate::config::IntrospectionPolicy;
use crate::errors::MetaModelResult;
use crate::facet_processor::FacetProcessor;
use crate::facets::FacetHolder;
use crate::factories::MethodRemover;
use crate::feature::FeatureType;
use crate::naming::accessor_member_id;
use crate::reflection::{annotations, ClassDescriptor, ClassRepository, MethodDescriptor, TypeRef};

/// A method recognised as a property, collection or action, with the
/// facets the factories installed on it
#[derive(Debug)]
pub struct FacetedMethod {
    /// What the method contributes
    pub feature_type: FeatureType,
    /// Member id
    pub member_id: String,
    /// The underlying method
    pub method: Arc<MethodDescriptor>,
    /// Return type
    pub type_ref: TypeRef,
    /// Facets of the member
    pub holder: FacetHolder,
    /// Action parameters, empty for associations
    pub parameters: Vec<FacetedMethodParameter>,
    /// Position of the method among the class's candidate methods
    pub declaration_index: usize,
}

/// One parameter of a faceted action method
#[derive(Debug)]
pub struct FacetedMethodParameter {
    /// Singular or plural
    pub feature_type: FeatureType,
    /// Declared name
    pub name: String,
    /// Declared type
    pub type_ref: TypeRef,
    /// Facets of the parameter
    pub holder: FacetHolder,
}

/// Walks the methods of one class and turns them into faceted methods
///
/// Created during type introspection, where the object factories consume
/// class-level support methods, and finished during member introspection.
#[derive(Debug)]
pub struct FacetedMethodsBuilder {
    class: Arc<ClassDescriptor>,
    candidates: Vec<Arc<MethodDescriptor>>,
    remover: MethodRemover,
}

impl FacetedMethodsBuilder {
    /// Collect the declared and inherited methods of `class`; overrides
    /// hide the inherited method they override
    pub fn new(class: Arc<ClassDescriptor>, classes: &ClassRepository) -> Self {
        let mut candidates: Vec<Arc<MethodDescriptor>> = class.methods.clone();
        for ancestor in classes.superclass_chain(&class.name) {
            for method in &ancestor.methods {
                if !candidates.iter().any(|seen| seen.same_signature(method)) {
                    candidates.push(Arc::clone(method));
                }
            }
        }
        Self {
            remover: MethodRemover::new(candidates.clone()),
            candidates,
            class,
        }
    }

    /// The class being introspected
    pub fn class(&self) -> &Arc<ClassDescriptor> {
        &self.class
    }

    /// Run the object factories
    pub fn introspect_class(
        &mut self,
        processor: &FacetProcessor,
        classes: &ClassRepository,
        policy: IntrospectionPolicy,
        holder: &FacetHolder,
    ) -> MetaModelResult<()> {
        processor.process_class(&self.class, classes, policy, &mut self.remover, holder)
    }

    /// Claim collection and property getters and build their faceted methods
    pub fn associations(
        &mut self,
        processor: &FacetProcessor,
        policy: IntrospectionPolicy,
    ) -> MetaModelResult<Vec<FacetedMethod>> {
        let collections = processor.find_and_remove_collection_accessors(&mut self.remover);
        let properties = processor.find_and_remove_property_accessors(&mut self.remover);
        let mut associations = Vec::with_capacity(collections.len() + properties.len());
        for (feature_type, method) in collections
            .into_iter()
            .map(|m| (FeatureType::Collection, m))
            .chain(properties.into_iter().map(|m| (FeatureType::Property, m)))
        {
            let member_id = accessor_member_id(&method.name).unwrap_or_else(|| method.name.clone());
            let holder = FacetHolder::new();
            processor.process_method(
                &self.class,
                policy,
                &method,
                &member_id,
                &mut self.remover,
                &holder,
                feature_type,
                false,
            )?;
            associations.push(FacetedMethod {
                feature_type,
                type_ref: method.return_type.clone(),
                declaration_index: self.declaration_index(&method),
                member_id,
                method,
                holder,
                parameters: Vec::new(),
            });
        }
        Ok(associations)
    }

    /// Turn the remaining eligible methods into faceted actions
    ///
    /// For a mixin, only its main method is an action.
    pub fn actions(
        &mut self,
        processor: &FacetProcessor,
        policy: IntrospectionPolicy,
        mixin_main: Option<&str>,
    ) -> MetaModelResult<Vec<FacetedMethod>> {
        let mut actions = Vec::new();
        for method in self.remover.remaining().to_vec() {
            // an earlier action may have claimed it as a support method
            if !self.remover.contains(&method) {
                continue;
            }
            let is_mixin_main = mixin_main == Some(method.name.as_str());
            if !is_mixin_main && !self.is_action_candidate(&method, processor, policy, mixin_main) {
                continue;
            }
            self.remover.remove(&method);

            let member_id = method.name.clone();
            let holder = FacetHolder::new();
            processor.process_method(
                &self.class,
                policy,
                &method,
                &member_id,
                &mut self.remover,
                &holder,
                FeatureType::Action,
                is_mixin_main,
            )?;

            let mut parameters = Vec::with_capacity(method.param_count());
            for (index, parameter) in method.parameters.iter().enumerate() {
                let feature_type = if parameter.type_ref.is_collection() {
                    FeatureType::ActionParameterPlural
                } else {
                    FeatureType::ActionParameterSingular
                };
                let param_holder = FacetHolder::new();
                processor.process_params(
                    &self.class,
                    &method,
                    &member_id,
                    index,
                    feature_type,
                    &mut self.remover,
                    &param_holder,
                )?;
                parameters.push(FacetedMethodParameter {
                    feature_type,
                    name: parameter.name.clone(),
                    type_ref: parameter.type_ref.clone(),
                    holder: param_holder,
                });
            }

            trace!(class = %self.class.name, action = %member_id, "action discovered");
            actions.push(FacetedMethod {
                feature_type: FeatureType::Action,
                type_ref: method.return_type.clone(),
                declaration_index: self.declaration_index(&method),
                member_id,
                method,
                holder,
                parameters,
            });
        }
        Ok(actions)
    }

    /// Public methods left over that look like support methods; nothing
    /// claimed them
    pub fn potential_orphans(&self, processor: &FacetProcessor) -> Vec<Arc<MethodDescriptor>> {
        self.remover
            .remaining()
            .iter()
            .filter(|method| method.is_public() && processor.recognizes(method))
            .cloned()
            .collect()
    }

    fn is_action_candidate(
        &self,
        method: &MethodDescriptor,
        processor: &FacetProcessor,
        policy: IntrospectionPolicy,
        mixin_main: Option<&str>,
    ) -> bool {
        if mixin_main.is_some() || !method.is_public() || processor.recognizes(method) {
            return false;
        }
        match policy {
            IntrospectionPolicy::AnnotationRequired => method.has_annotation(annotations::ACTION),
            IntrospectionPolicy::AnnotationOptional => true,
        }
    }

    fn declaration_index(&self, method: &Arc<MethodDescriptor>) -> usize {
        self.candidates
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, method))
            .unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetaModelConfig;
    use crate::facets::{HiddenFacet, ParameterChoicesFacet, TitleFacet};
    use crate::programming_model::ProgrammingModel;
    use crate::reflection::{Annotation, Visibility};
    use pretty_assertions::assert_eq;

    fn processor() -> FacetProcessor {
        FacetProcessor::new(
            ProgrammingModel::default_model(&MetaModelConfig::default())
                .factories()
                .to_vec(),
        )
    }

    fn customer() -> ClassDescriptor {
        ClassDescriptor::builder("com.acme.Customer")
            .extends("com.acme.Party")
            .method(MethodDescriptor::builder("title").returns(TypeRef::of("String")))
            .method(MethodDescriptor::builder("getName").returns(TypeRef::of("String")))
            .method(MethodDescriptor::builder("hideName").returns(TypeRef::of("boolean")))
            .method(
                MethodDescriptor::builder("getOrders")
                    .returns(TypeRef::collection_of("java.util.List", "com.acme.Order")),
            )
            .method(
                MethodDescriptor::builder("placeOrder")
                    .param("product", TypeRef::of("com.acme.Product"))
                    .returns(TypeRef::of("com.acme.Order")),
            )
            .method(MethodDescriptor::builder("choices0PlaceOrder").returns(TypeRef::collection_of("java.util.List", "com.acme.Product")))
            .method(MethodDescriptor::builder("disableSomethingElse").returns(TypeRef::of("String")))
            .method(MethodDescriptor::builder("audit").visibility(Visibility::Private))
            .method(MethodDescriptor::builder("hashCode").returns(TypeRef::of("int")))
            .build()
    }

    fn classes() -> ClassRepository {
        ClassRepository::with_classes([
            ClassDescriptor::builder("com.acme.Party")
                .abstract_class()
                .method(MethodDescriptor::builder("getEmail").returns(TypeRef::of("String")))
                .method(MethodDescriptor::builder("getName").returns(TypeRef::of("String")))
                .build(),
            customer(),
        ])
    }

    #[test]
    fn test_builds_members_from_methods() {
        let classes = classes();
        let processor = processor();
        let class = classes.require(&"com.acme.Customer".into()).unwrap();
        let object_holder = FacetHolder::new();
        let mut builder = FacetedMethodsBuilder::new(class, &classes);
        builder
            .introspect_class(&processor, &classes, IntrospectionPolicy::AnnotationOptional, &object_holder)
            .unwrap();
        assert!(object_holder.contains::<TitleFacet>());

        let associations = builder
            .associations(&processor, IntrospectionPolicy::AnnotationOptional)
            .unwrap();
        let ids: Vec<_> = associations.iter().map(|a| a.member_id.as_str()).collect();
        assert_eq!(ids, vec!["orders", "name", "email"]);
        assert!(associations[1].holder.contains::<HiddenFacet>());

        let actions = builder
            .actions(&processor, IntrospectionPolicy::AnnotationOptional, None)
            .unwrap();
        let ids: Vec<_> = actions.iter().map(|a| a.member_id.as_str()).collect();
        assert_eq!(ids, vec!["placeOrder"]);
        assert_eq!(actions[0].parameters.len(), 1);
        assert!(actions[0].parameters[0].holder.contains::<ParameterChoicesFacet>());

        let orphans: Vec<_> = builder
            .potential_orphans(&processor)
            .iter()
            .map(|m| m.name.clone())
            .collect();
        assert_eq!(orphans, vec!["disableSomethingElse".to_string()]);
    }

    #[test]
    fn test_annotation_required_policy() {
        let classes = ClassRepository::with_classes([ClassDescriptor::builder("Shop")
            .method(MethodDescriptor::builder("open").annotate(Annotation::new(annotations::ACTION)))
            .method(MethodDescriptor::builder("close"))
            .build()]);
        let processor = processor();
        let mut builder =
            FacetedMethodsBuilder::new(classes.require(&"Shop".into()).unwrap(), &classes);
        let actions = builder
            .actions(&processor, IntrospectionPolicy::AnnotationRequired, None)
            .unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].member_id, "open");
    }

    #[test]
    fn test_mixin_only_contributes_main_method() {
        let classes = ClassRepository::with_classes([ClassDescriptor::builder("Customer_rename")
            .mixin_for("Customer")
            .method(MethodDescriptor::builder("act").param("name", TypeRef::of("String")))
            .method(MethodDescriptor::builder("helper"))
            .build()]);
        let processor = processor();
        let mut builder =
            FacetedMethodsBuilder::new(classes.require(&"Customer_rename".into()).unwrap(), &classes);
        let actions = builder
            .actions(&processor, IntrospectionPolicy::AnnotationRequired, Some("act"))
            .unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].member_id, "act");
    }
}
