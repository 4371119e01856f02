// Copyright 2025 Cowboy AI, LLC.

//! Action, naming and ordering factories

use anyhow::Context;
use std::sync::Arc;

use super::{FacetFactory, ProcessClassContext, ProcessMethodContext, ProcessParameterContext};
use crate::facets::{
    ActionInvocationFacet, ActionSemanticsFacet, MemberNamedFacet, MemberOrderFacet,
    ObjectNamedFacet, Precedence, PrototypeFacet, SemanticsOf,
};
use crate::feature::FeatureType;
use crate::reflection::annotations;

/// Installs invocation, semantics and scope facets on actions
#[derive(Debug, Default)]
pub struct ActionFacetFactory;

impl FacetFactory for ActionFacetFactory {
    fn name(&self) -> &'static str {
        "Action"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &[FeatureType::Action]
    }

    fn process_method(&self, ctx: &mut ProcessMethodContext<'_>) -> anyhow::Result<()> {
        let method = ctx.method;
        ctx.holder.add_facet(ActionInvocationFacet {
            method: Arc::clone(method),
            return_type: method.return_type.clone(),
        });

        let Some(action) = method.annotations.get(annotations::ACTION) else {
            return Ok(());
        };
        if let Some(raw) = action.attr("semantics") {
            let semantics = raw
                .parse::<SemanticsOf>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid semantics on {method}"))?;
            ctx.holder.add_facet(ActionSemanticsFacet {
                semantics,
                precedence: Precedence::Default,
            });
        }
        if action.attr("restrictTo") == Some("PROTOTYPING") {
            ctx.holder.add_facet(PrototypeFacet);
        }
        Ok(())
    }
}

/// Installs explicit names from `Named`
#[derive(Debug, Default)]
pub struct NamedFacetFactory;

impl FacetFactory for NamedFacetFactory {
    fn name(&self) -> &'static str {
        "Named"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &FeatureType::ALL
    }

    fn process_class(&self, ctx: &mut ProcessClassContext<'_>) -> anyhow::Result<()> {
        if let Some(name) = ctx.class.annotations.attr(annotations::NAMED, "value") {
            ctx.holder.add_facet(ObjectNamedFacet {
                name: name.to_string(),
                precedence: Precedence::Default,
            });
        }
        Ok(())
    }

    fn process_method(&self, ctx: &mut ProcessMethodContext<'_>) -> anyhow::Result<()> {
        if let Some(name) = ctx.method.annotations.attr(annotations::NAMED, "value") {
            ctx.holder.add_facet(MemberNamedFacet {
                name: name.to_string(),
                precedence: Precedence::Default,
            });
        }
        Ok(())
    }

    fn process_param(&self, ctx: &mut ProcessParameterContext<'_>) -> anyhow::Result<()> {
        if let Some(name) = ctx.parameter.annotations.attr(annotations::NAMED, "value") {
            ctx.holder.add_facet(MemberNamedFacet {
                name: name.to_string(),
                precedence: Precedence::Default,
            });
        }
        Ok(())
    }
}

/// Installs `MemberOrder` sequences
#[derive(Debug, Default)]
pub struct MemberOrderFacetFactory;

impl FacetFactory for MemberOrderFacetFactory {
    fn name(&self) -> &'static str {
        "MemberOrder"
    }

    fn feature_types(&self) -> &[FeatureType] {
        &FeatureType::MEMBERS
    }

    fn process_method(&self, ctx: &mut ProcessMethodContext<'_>) -> anyhow::Result<()> {
        if let Some(sequence) = ctx.method.annotations.attr(annotations::MEMBER_ORDER, "sequence") {
            ctx.holder.add_facet(MemberOrderFacet {
                sequence: sequence.to_string(),
            });
        }
        Ok(())
    }
}
