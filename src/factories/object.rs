// Copyright 2025 Cowboy AI, LLC.

//! Factories for object-level facets

use std::sync::Arc;

use super::{FacetFactory, ObjectSpecRefiner, ProcessClassContext};
use crate::facets::{
    AliasedFacet, DomainServiceFacet, IconFacet, MixinContribution, MixinFacet, Precedence,
    TitleFacet, TitleSource, ValueFacet,
};
use crate::feature::FeatureType;
use crate::reflection::{annotations, ClassDescriptor, ClassRepository, MethodDescriptor, TypeKey};
use crate::spec::ObjectSpecification;

/// Methods every object has that never become members
const IGNORED_METHOD_NAMES: &[&str] = &[
    "equals", "hashCode", "toString", "getClass", "clone", "finalize", "notify", "notifyAll",
    "wait",
];

/// The nearest ancestor that declares `method` with `Domain.Exclude`
pub(crate) fn inherited_exclusion(
    classes: &ClassRepository,
    class: &ClassDescriptor,
    method: &MethodDescriptor,
) -> Option<TypeKey> {
    classes
        .superclass_chain(&class.name)
        .into_iter()
        .find(|ancestor| {
            ancestor.methods.iter().any(|candidate| {
                candidate.same_signature(method)
                    && candidate.has_annotation(annotations::DOMAIN_EXCLUDE)
            })
        })
        .map(|ancestor| ancestor.name.clone())
}

/// Removes methods that must never be introspected
///
/// Static methods, `Programmatic` and `Domain.Exclude` methods (including
/// overrides of excluded methods) and the universal object methods.
#[derive(Debug, Default)]
pub struct RemoveIgnoredMethodsFacetFactory;

impl FacetFactory for RemoveIgnoredMethodsFacetFactory {
    fn name(&self) -> &'static str {
        "RemoveIgnoredMethods"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &[FeatureType::Object]
    }

    fn process_class(&self, ctx: &mut ProcessClassContext<'_>) -> anyhow::Result<()> {
        let class = ctx.class;
        let classes = ctx.classes;
        ctx.remover.remove_where(|method| {
            method.is_static
                || IGNORED_METHOD_NAMES.contains(&method.name.as_str())
                || method.has_annotation(annotations::PROGRAMMATIC)
                || method.has_annotation(annotations::DOMAIN_EXCLUDE)
                || inherited_exclusion(classes, class, method).is_some()
        });
        Ok(())
    }
}

/// Reads `DomainObject` attributes: aliases and mixin declarations
#[derive(Debug)]
pub struct DomainObjectFacetFactory {
    mixin_main_method: String,
}

impl DomainObjectFacetFactory {
    /// Mixin actions default to `mixin_main_method`
    pub fn new(mixin_main_method: impl Into<String>) -> Self {
        Self {
            mixin_main_method: mixin_main_method.into(),
        }
    }

    fn mixin_facet(&self, class: &ClassDescriptor) -> Option<MixinFacet> {
        let mixee = class.mixin_target.clone()?;
        let nature = class.annotations.attr(annotations::DOMAIN_OBJECT, "nature");
        let contribution = if class.has_annotation(annotations::PROPERTY) {
            MixinContribution::Property
        } else if class.has_annotation(annotations::COLLECTION) {
            MixinContribution::Collection
        } else if class.has_annotation(annotations::ACTION) || nature == Some("MIXIN") {
            MixinContribution::Action
        } else {
            return None;
        };
        let main_method = match class.annotations.attr(annotations::DOMAIN_OBJECT, "mixinMethod") {
            Some(explicit) => explicit.to_string(),
            None => match contribution {
                MixinContribution::Action => self.mixin_main_method.clone(),
                MixinContribution::Property => "prop".to_string(),
                MixinContribution::Collection => "coll".to_string(),
            },
        };
        Some(MixinFacet {
            mixee,
            main_method,
            contribution,
        })
    }
}

impl FacetFactory for DomainObjectFacetFactory {
    fn name(&self) -> &'static str {
        "DomainObject"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &[FeatureType::Object]
    }

    fn process_class(&self, ctx: &mut ProcessClassContext<'_>) -> anyhow::Result<()> {
        if let Some(domain_object) = ctx.class.annotations.get(annotations::DOMAIN_OBJECT) {
            let aliases = domain_object.attr_list("aliased");
            if !aliases.is_empty() {
                ctx.holder.add_facet(AliasedFacet { aliases });
            }
        }
        if let Some(mixin) = self.mixin_facet(ctx.class) {
            ctx.holder.add_facet(mixin);
        }
        Ok(())
    }
}

/// Marks domain services
#[derive(Debug, Default)]
pub struct DomainServiceFacetFactory;

impl FacetFactory for DomainServiceFacetFactory {
    fn name(&self) -> &'static str {
        "DomainService"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &[FeatureType::Object]
    }

    fn process_class(&self, ctx: &mut ProcessClassContext<'_>) -> anyhow::Result<()> {
        if ctx.class.has_annotation(annotations::DOMAIN_SERVICE) {
            ctx.holder.add_facet(DomainServiceFacet);
        }
        Ok(())
    }

    fn as_object_spec_refiner(&self) -> Option<&dyn ObjectSpecRefiner> {
        Some(self)
    }
}

impl ObjectSpecRefiner for DomainServiceFacetFactory {
    fn refine(&self, spec: &ObjectSpecification) -> anyhow::Result<()> {
        if spec.bean_sort().is_managed_bean() && !spec.facet_holder().contains::<DomainServiceFacet>() {
            spec.facet_holder().add_facet(DomainServiceFacet);
        }
        Ok(())
    }
}

/// Installs value facets from annotations and from value semantics
#[derive(Debug, Default)]
pub struct ValueFacetFactory;

impl FacetFactory for ValueFacetFactory {
    fn name(&self) -> &'static str {
        "Value"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &[FeatureType::Object]
    }

    fn process_class(&self, ctx: &mut ProcessClassContext<'_>) -> anyhow::Result<()> {
        if ctx.class.has_annotation(annotations::VALUE) {
            ctx.holder.add_facet(ValueFacet {
                value_type: ctx.class.name.clone(),
                semantics_origin: "annotation".to_string(),
                precedence: Precedence::Default,
            });
        }
        Ok(())
    }

    fn as_object_spec_refiner(&self) -> Option<&dyn ObjectSpecRefiner> {
        Some(self)
    }
}

impl ObjectSpecRefiner for ValueFacetFactory {
    fn refine(&self, spec: &ObjectSpecification) -> anyhow::Result<()> {
        if spec.bean_sort().is_value() && !spec.facet_holder().contains::<ValueFacet>() {
            spec.facet_holder().add_facet(ValueFacet {
                value_type: spec.class_key().clone(),
                semantics_origin: "value-semantics".to_string(),
                precedence: Precedence::Inferred,
            });
        }
        Ok(())
    }
}

/// Consumes the `title()` and `iconName()` object support methods
#[derive(Debug, Default)]
pub struct ObjectSupportFacetFactory;

impl ObjectSupportFacetFactory {
    const TITLE: &'static str = "title";
    const ICON_NAME: &'static str = "iconName";
}

impl FacetFactory for ObjectSupportFacetFactory {
    fn name(&self) -> &'static str {
        "ObjectSupport"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &[FeatureType::Object]
    }

    fn process_class(&self, ctx: &mut ProcessClassContext<'_>) -> anyhow::Result<()> {
        if let Some(method) = ctx.remover.take_named(Self::TITLE, Some(0)) {
            ctx.holder.add_facet(TitleFacet {
                source: TitleSource::Method(method),
                precedence: Precedence::Default,
            });
        }
        if let Some(method) = ctx.remover.take_named(Self::ICON_NAME, Some(0)) {
            ctx.holder.add_facet(IconFacet { method });
        }
        Ok(())
    }

    fn recognizes(&self, method: &MethodDescriptor) -> bool {
        method.name == Self::TITLE || method.name == Self::ICON_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntrospectionPolicy;
    use crate::facets::FacetHolder;
    use crate::factories::MethodRemover;
    use crate::reflection::{Annotation, TypeRef};

    fn run(factory: &dyn FacetFactory, class: &ClassDescriptor, classes: &ClassRepository) -> (FacetHolder, MethodRemover) {
        let holder = FacetHolder::new();
        let mut remover = MethodRemover::new(class.methods.clone());
        let mut ctx = ProcessClassContext {
            class,
            classes,
            holder: &holder,
            policy: IntrospectionPolicy::AnnotationOptional,
            remover: &mut remover,
        };
        factory.process_class(&mut ctx).unwrap();
        (holder, remover)
    }

    #[test]
    fn test_ignored_methods_are_removed() {
        let classes = ClassRepository::with_classes([ClassDescriptor::builder("Base")
            .method(
                MethodDescriptor::builder("internal")
                    .annotate(Annotation::new(annotations::DOMAIN_EXCLUDE)),
            )
            .build()]);
        let class = ClassDescriptor::builder("Customer")
            .extends("Base")
            .method(MethodDescriptor::builder("toString").returns(TypeRef::of("String")))
            .method(MethodDescriptor::builder("create").static_method())
            .method(MethodDescriptor::builder("internal"))
            .method(MethodDescriptor::builder("helper").annotate(Annotation::new(annotations::PROGRAMMATIC)))
            .method(MethodDescriptor::builder("placeOrder"))
            .build();
        let (_, remover) = run(&RemoveIgnoredMethodsFacetFactory, &class, &classes);
        let names: Vec<_> = remover.remaining().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["placeOrder"]);
    }

    #[test]
    fn test_mixin_facet_from_annotation() {
        let class = ClassDescriptor::builder("com.acme.Customer_rename")
            .annotate(Annotation::new(annotations::ACTION))
            .mixin_for("com.acme.Customer")
            .build();
        let (holder, _) = run(&DomainObjectFacetFactory::new("act"), &class, &ClassRepository::new());
        let mixin = holder.get::<MixinFacet>().unwrap();
        assert_eq!(mixin.mixee.as_str(), "com.acme.Customer");
        assert_eq!(mixin.main_method, "act");
        assert_eq!(mixin.contribution, MixinContribution::Action);
    }

    #[test]
    fn test_property_mixin_uses_prop_method() {
        let class = ClassDescriptor::builder("Customer_age")
            .annotate(Annotation::new(annotations::PROPERTY))
            .mixin_for("Customer")
            .build();
        let (holder, _) = run(&DomainObjectFacetFactory::new("act"), &class, &ClassRepository::new());
        assert_eq!(holder.get::<MixinFacet>().unwrap().main_method, "prop");
    }

    #[test]
    fn test_aliases_are_read() {
        let class = ClassDescriptor::builder("Customer")
            .annotate(Annotation::new(annotations::DOMAIN_OBJECT).with("aliased", "crm.Client, crm.Buyer"))
            .build();
        let (holder, _) = run(&DomainObjectFacetFactory::new("act"), &class, &ClassRepository::new());
        assert_eq!(holder.get::<AliasedFacet>().unwrap().aliases, vec!["crm.Client", "crm.Buyer"]);
    }

    #[test]
    fn test_title_and_icon_methods_are_consumed() {
        let class = ClassDescriptor::builder("Customer")
            .method(MethodDescriptor::builder("title").returns(TypeRef::of("String")))
            .method(MethodDescriptor::builder("iconName").returns(TypeRef::of("String")))
            .method(MethodDescriptor::builder("getName").returns(TypeRef::of("String")))
            .build();
        let (holder, remover) = run(&ObjectSupportFacetFactory, &class, &ClassRepository::new());
        assert!(matches!(holder.get::<TitleFacet>().unwrap().source, TitleSource::Method(_)));
        assert!(holder.contains::<IconFacet>());
        assert_eq!(remover.len(), 1);
        assert_eq!(holder.support_methods().len(), 2);
    }

    #[test]
    fn test_value_annotation() {
        let class = ClassDescriptor::builder("Money")
            .annotate(Annotation::new(annotations::VALUE))
            .build();
        let (holder, _) = run(&ValueFacetFactory, &class, &ClassRepository::new());
        assert_eq!(holder.get::<ValueFacet>().unwrap().semantics_origin, "annotation");
    }
}
