// Copyright 2025 Cowboy AI, LLC.

//! Members contributed by mixins

use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

use super::members::{ObjectAction, ObjectAssociation, ObjectMember};
use super::object_spec::ObjectSpecification;
use super::state::IntrospectionState;
use crate::errors::MetaModelResult;
use crate::facets::{MixinContribution, MixinFacet};
use crate::feature::FeatureType;
use crate::loader::{SpecificationLoader, ValidationFailure};
use crate::naming::mixin_member_id;

/// A mixin applicable to some mixee, with its main action
struct Contributor {
    spec: Arc<ObjectSpecification>,
    facet: Arc<MixinFacet>,
    main_action: Arc<ObjectAction>,
}

impl Contributor {
    fn member_id(&self) -> String {
        mixin_member_id(self.spec.class_key().as_str())
    }
}

fn contributors(
    mixee: &ObjectSpecification,
    loader: &SpecificationLoader,
) -> MetaModelResult<Vec<Contributor>> {
    let mut found = Vec::new();
    for key in loader.bean_types().mixin_types() {
        let Some(spec) = loader.load_specification(&key, IntrospectionState::FullyIntrospected)?
        else {
            continue;
        };
        let Some(facet) = spec.mixin_facet() else {
            continue;
        };
        if !facet.is_mixin_for(mixee.class_key(), loader.classes()) {
            continue;
        }
        let main_action = spec
            .actions_snapshot()
            .iter()
            .find(|action| action.method().name == facet.main_method)
            .cloned();
        match main_action {
            Some(main_action) => found.push(Contributor {
                spec,
                facet,
                main_action,
            }),
            None => warn!(
                mixin = %key,
                main_method = %facet.main_method,
                "mixin has no main action, nothing contributed"
            ),
        }
    }
    Ok(found)
}

/// Actions contributed to `mixee`
pub(super) fn mixed_in_actions(
    mixee: &ObjectSpecification,
    loader: &SpecificationLoader,
) -> MetaModelResult<Vec<Arc<ObjectAction>>> {
    Ok(contributors(mixee, loader)?
        .into_iter()
        .filter(|contributor| contributor.facet.contribution == MixinContribution::Action)
        .map(|contributor| {
            Arc::new(ObjectAction::contributed(
                mixee.logical_type(),
                &contributor.member_id(),
                &contributor.main_action,
                contributor.spec.class_key().clone(),
            ))
        })
        .collect())
}

/// Properties and collections contributed to `mixee`
pub(super) fn mixed_in_associations(
    mixee: &ObjectSpecification,
    loader: &SpecificationLoader,
) -> MetaModelResult<Vec<Arc<ObjectAssociation>>> {
    Ok(contributors(mixee, loader)?
        .into_iter()
        .filter_map(|contributor| {
            let feature_type = match contributor.facet.contribution {
                MixinContribution::Property => FeatureType::Property,
                MixinContribution::Collection => FeatureType::Collection,
                MixinContribution::Action => return None,
            };
            Some(Arc::new(ObjectAssociation::contributed(
                mixee.logical_type(),
                &contributor.member_id(),
                feature_type,
                &contributor.main_action,
                contributor.spec.class_key().clone(),
            )))
        })
        .collect())
}

/// Drop contributed members whose id is already taken, reporting each
/// clash as a validation failure
pub(super) fn reject_clashes<T: ObjectMember>(
    mixee: &ObjectSpecification,
    contributed: Vec<Arc<T>>,
    taken: &HashSet<String>,
    loader: &SpecificationLoader,
) -> Vec<Arc<T>> {
    let mut taken = taken.clone();
    let mut accepted = Vec::with_capacity(contributed.len());
    for member in contributed {
        if taken.insert(member.id().to_string()) {
            accepted.push(member);
            continue;
        }
        let mixin = member
            .mixed_in()
            .map(|origin| origin.mixin_type.to_string())
            .unwrap_or_default();
        warn!(spec = %mixee.class_key(), member = member.id(), %mixin, "mixed-in member clashes");
        loader.raise_failure(ValidationFailure::new(
            mixee.full_identifier(),
            format!(
                "{}: mixin {} contributes member '{}' which clashes with an existing member",
                mixee.logical_type_name(),
                mixin,
                member.id()
            ),
        ));
    }
    accepted
}
