// Copyright 2025 Cowboy AI, LLC.

//! Post-processing of fully introspected specifications

use std::fmt;

use super::members::ObjectMember;
use super::object_spec::ObjectSpecification;
use crate::facets::{ActionSemanticsFacet, FacetHolder, MemberNamedFacet, Precedence, SemanticsOf};
use crate::naming::natural_name;

/// Runs once per specification, after its members are introspected
///
/// Errors abort introspection of the specification.
pub trait ObjectSpecificationPostProcessor: fmt::Debug + Send + Sync {
    /// Name used in errors and logs
    fn name(&self) -> &'static str;

    /// Adjust the specification or its members
    fn post_process(&self, spec: &ObjectSpecification) -> anyhow::Result<()>;
}

/// Gives every member and parameter without a name a natural one
#[derive(Debug, Default)]
pub struct FallbackMemberNamesPostProcessor;

impl ObjectSpecificationPostProcessor for FallbackMemberNamesPostProcessor {
    fn name(&self) -> &'static str {
        "FallbackMemberNames"
    }

    fn post_process(&self, spec: &ObjectSpecification) -> anyhow::Result<()> {
        for association in spec.associations_snapshot().iter() {
            name_if_missing(association.facet_holder(), || natural_name(association.id()));
        }
        for action in spec.actions_snapshot().iter() {
            name_if_missing(action.facet_holder(), || natural_name(action.id()));
            for parameter in action.parameters() {
                name_if_missing(parameter.facet_holder(), || parameter.name());
            }
        }
        Ok(())
    }
}

fn name_if_missing(holder: &FacetHolder, name: impl FnOnce() -> String) {
    if !holder.contains::<MemberNamedFacet>() {
        holder.add_facet(MemberNamedFacet {
            name: name(),
            precedence: Precedence::Fallback,
        });
    }
}

/// Actions without declared semantics are treated as non-idempotent
#[derive(Debug, Default)]
pub struct FallbackActionSemanticsPostProcessor;

impl ObjectSpecificationPostProcessor for FallbackActionSemanticsPostProcessor {
    fn name(&self) -> &'static str {
        "FallbackActionSemantics"
    }

    fn post_process(&self, spec: &ObjectSpecification) -> anyhow::Result<()> {
        for action in spec.actions_snapshot().iter() {
            action.facet_holder().add_facet(ActionSemanticsFacet {
                semantics: SemanticsOf::NonIdempotent,
                precedence: Precedence::Fallback,
            });
        }
        Ok(())
    }
}
