// Copyright 2025 Cowboy AI, LLC.

//! Factories consuming naming-convention support methods

use super::{FacetFactory, ProcessMethodContext, ProcessParameterContext};
use crate::facets::{DisabledFacet, HiddenFacet, ParameterChoicesFacet, ParameterDefaultsFacet, ValidateFacet};
use crate::feature::FeatureType;
use crate::naming::capitalize;

static MEMBER_PREFIXES: [&str; 3] = ["hide", "disable", "validate"];
static PARAMETER_PREFIXES: [&str; 2] = ["default", "choices"];

/// Consumes `hideXxx()`, `disableXxx()` and `validateXxx(..)`
#[derive(Debug, Default)]
pub struct MemberSupportFacetFactory;

impl FacetFactory for MemberSupportFacetFactory {
    fn name(&self) -> &'static str {
        "MemberSupport"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &FeatureType::MEMBERS
    }

    fn process_method(&self, ctx: &mut ProcessMethodContext<'_>) -> anyhow::Result<()> {
        let suffix = capitalize(ctx.member_id);
        if let Some(method) = ctx.remover.take_named(&format!("hide{suffix}"), Some(0)) {
            ctx.holder.add_facet(HiddenFacet { method });
        }
        if let Some(method) = ctx.remover.take_named(&format!("disable{suffix}"), Some(0)) {
            ctx.holder.add_facet(DisabledFacet { method });
        }
        let validate_arity = match ctx.feature_type {
            FeatureType::Action => Some(ctx.method.param_count()),
            FeatureType::Property => Some(1),
            _ => None,
        };
        if let Some(arity) = validate_arity {
            if let Some(method) = ctx.remover.take_named(&format!("validate{suffix}"), Some(arity)) {
                ctx.holder.add_facet(ValidateFacet { method });
            }
        }
        Ok(())
    }

    fn method_prefixes(&self) -> &[&'static str] {
        &MEMBER_PREFIXES
    }
}

/// Consumes `defaultNXxx()` and `choicesNXxx()` for action parameters
#[derive(Debug, Default)]
pub struct ParameterSupportFacetFactory;

impl FacetFactory for ParameterSupportFacetFactory {
    fn name(&self) -> &'static str {
        "ParameterSupport"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &FeatureType::PARAMETERS
    }

    fn process_param(&self, ctx: &mut ProcessParameterContext<'_>) -> anyhow::Result<()> {
        let suffix = format!("{}{}", ctx.index, capitalize(ctx.action_id));
        if let Some(method) = ctx.remover.take_named(&format!("default{suffix}"), Some(0)) {
            ctx.holder.add_facet(ParameterDefaultsFacet { method });
        }
        if let Some(method) = ctx.remover.take_named(&format!("choices{suffix}"), Some(0)) {
            ctx.holder.add_facet(ParameterChoicesFacet { method });
        }
        Ok(())
    }

    fn method_prefixes(&self) -> &[&'static str] {
        &PARAMETER_PREFIXES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntrospectionPolicy;
    use crate::facets::FacetHolder;
    use crate::factories::MethodRemover;
    use crate::reflection::{ClassDescriptor, MethodDescriptor, TypeRef};
    use std::sync::Arc;

    #[test]
    fn test_action_support_methods_are_claimed() {
        let class = ClassDescriptor::builder("Customer")
            .method(MethodDescriptor::builder("placeOrder").param("qty", TypeRef::of("int")))
            .method(MethodDescriptor::builder("hidePlaceOrder").returns(TypeRef::of("boolean")))
            .method(MethodDescriptor::builder("disablePlaceOrder").returns(TypeRef::of("String")))
            .method(
                MethodDescriptor::builder("validatePlaceOrder")
                    .param("qty", TypeRef::of("int"))
                    .returns(TypeRef::of("String")),
            )
            .method(MethodDescriptor::builder("default0PlaceOrder").returns(TypeRef::of("int")))
            .build();
        let action = Arc::clone(&class.methods[0]);
        let mut remover = MethodRemover::new(class.methods[1..].to_vec());
        let holder = FacetHolder::new();
        let mut ctx = ProcessMethodContext {
            class: &class,
            method: &action,
            member_id: "placeOrder",
            feature_type: FeatureType::Action,
            is_mixin_main: false,
            holder: &holder,
            policy: IntrospectionPolicy::AnnotationOptional,
            remover: &mut remover,
        };
        MemberSupportFacetFactory.process_method(&mut ctx).unwrap();
        assert!(holder.contains::<HiddenFacet>());
        assert!(holder.contains::<DisabledFacet>());
        assert!(holder.contains::<ValidateFacet>());
        assert_eq!(remover.len(), 1);

        let param_holder = FacetHolder::new();
        let mut ctx = ProcessParameterContext {
            class: &class,
            action_method: &action,
            action_id: "placeOrder",
            index: 0,
            parameter: &action.parameters[0],
            feature_type: FeatureType::ActionParameterSingular,
            holder: &param_holder,
            remover: &mut remover,
        };
        ParameterSupportFacetFactory.process_param(&mut ctx).unwrap();
        assert!(param_holder.contains::<ParameterDefaultsFacet>());
        assert!(remover.is_empty());
    }
}
