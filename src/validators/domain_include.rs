// Copyright 2025 Cowboy AI, LLC.

//! `Domain.Include` methods that did not make it into the metamodel

use std::sync::Arc;

use super::MetaModelValidator;
use crate::factories::inherited_exclusion;
use crate::feature::{ActionScope, MixedIn};
use crate::loader::{SpecificationLoader, ValidationFailure, ValidationFailures};
use crate::reflection::{annotations, MethodDescriptor};
use crate::spec::ObjectSpecification;

/// Reports methods marked `Domain.Include` that no member or support facet
/// claimed, and support-looking methods no member claimed
///
/// Orphaned support methods are raised on the loader, so they survive later
/// assessments after the spec's tracking list is cleared.
#[derive(Debug, Default)]
pub struct DomainIncludeValidator;

impl MetaModelValidator for DomainIncludeValidator {
    fn name(&self) -> &'static str {
        "DomainInclude"
    }

    fn validate(
        &self,
        loader: &SpecificationLoader,
        failures: &mut ValidationFailures,
    ) -> anyhow::Result<()> {
        let specs: Vec<Arc<ObjectSpecification>> = loader
            .all_specifications()
            .into_iter()
            .filter(|spec| spec.bean_sort().has_members() && spec.state().is_fully_introspected())
            .collect();

        for spec in &specs {
            // contributes mixins, raising any clashes
            spec.stream_declared_actions(ActionScope::Any, MixedIn::Included)?;
            spec.stream_declared_associations(MixedIn::Included)?;

            let recognized = spec.recognized_methods();
            for method in spec
                .class()
                .methods
                .iter()
                .filter(|method| method.has_annotation(annotations::DOMAIN_INCLUDE))
            {
                if is_recognized(&recognized, method) {
                    continue;
                }
                failures.add(ValidationFailure::new(
                    format!("{}#{}", spec.full_identifier(), method.name),
                    unrecognized_reason(loader, spec, method),
                ));
            }
        }

        for spec in &specs {
            for orphan in spec.potential_orphans() {
                loader.raise_failure(ValidationFailure::new(
                    format!("{}#{}", spec.full_identifier(), orphan.name),
                    format!(
                        "{}: {} looks like a supporting method, but no member claims it",
                        spec.logical_type_name(),
                        orphan.signature()
                    ),
                ));
            }
            spec.clear_potential_orphans();
        }
        Ok(())
    }
}

fn is_recognized(recognized: &[Arc<MethodDescriptor>], method: &Arc<MethodDescriptor>) -> bool {
    recognized
        .iter()
        .any(|claimed| Arc::ptr_eq(claimed, method) || claimed.same_signature(method))
}

fn unrecognized_reason(
    loader: &SpecificationLoader,
    spec: &ObjectSpecification,
    method: &MethodDescriptor,
) -> String {
    let type_name = spec.logical_type_name();
    let signature = method.signature();
    if !method.is_public() {
        return format!(
            "{type_name}: {signature} is marked Domain.Include but is not public; \
             only public methods can become members"
        );
    }
    if let Some(ancestor) = inherited_exclusion(loader.classes(), spec.class(), method) {
        return format!(
            "{type_name}: {signature} is marked Domain.Include but overrides a method \
             marked Domain.Exclude in {ancestor}"
        );
    }
    format!(
        "{type_name}: {signature} is marked Domain.Include but was not recognized \
         as a member or supporting method"
    )
}
