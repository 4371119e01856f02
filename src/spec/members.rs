// Copyright 2025 Cowboy AI, LLC.

//! Properties, collections, actions and action parameters

use std::fmt;
use std::sync::Arc;

use super::faceted_method::{FacetedMethod, FacetedMethodParameter};
use crate::facets::{
    ActionSemanticsFacet, Facet, FacetHolder, MemberNamedFacet, MemberOrderFacet, Precedence,
    PrototypeFacet, SemanticsOf,
};
use crate::feature::{ActionScope, FeatureType};
use crate::identifier::{Identifier, LogicalType};
use crate::naming::natural_name;
use crate::reflection::{MethodDescriptor, TypeKey, TypeRef};

/// Origin of a member contributed by a mixin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedInMember {
    /// The mixin class
    pub mixin_type: TypeKey,
    /// The type receiving the member
    pub mixee_type: TypeKey,
}

/// What every member of a specification offers
pub trait ObjectMember: fmt::Debug + Send + Sync {
    /// Full identifier, e.g. `crm.Customer#name`
    fn identifier(&self) -> &Identifier;

    /// Property, collection or action
    fn feature_type(&self) -> FeatureType;

    /// The member's facets
    fn facet_holder(&self) -> &FacetHolder;

    /// Set when the member comes from a mixin
    fn mixed_in(&self) -> Option<&MixedInMember>;

    /// Position of the underlying method in its class
    fn declaration_index(&self) -> usize;

    /// The method backing the member
    fn method(&self) -> &Arc<MethodDescriptor>;

    /// Member id
    fn id(&self) -> &str {
        self.identifier().member_id()
    }

    /// Display name
    fn name(&self) -> String {
        self.facet_holder()
            .get::<MemberNamedFacet>()
            .map(|named| named.name.clone())
            .unwrap_or_else(|| natural_name(self.id()))
    }

    /// Whether the member comes from a mixin
    fn is_mixed_in(&self) -> bool {
        self.mixed_in().is_some()
    }

    /// `MemberOrder` of the member
    fn member_order(&self) -> Option<Arc<MemberOrderFacet>> {
        self.facet_holder().get::<MemberOrderFacet>()
    }

    /// Support methods claimed by the member's facets
    fn support_methods(&self) -> Vec<Arc<MethodDescriptor>> {
        self.facet_holder().support_methods()
    }
}

/// A property or a collection
#[derive(Debug)]
pub struct ObjectAssociation {
    identifier: Identifier,
    feature_type: FeatureType,
    element_type: TypeKey,
    method: Arc<MethodDescriptor>,
    holder: Arc<FacetHolder>,
    mixed_in: Option<MixedInMember>,
    declaration_index: usize,
}

impl ObjectAssociation {
    pub(crate) fn from_faceted(logical_type: &LogicalType, faceted: FacetedMethod) -> Self {
        Self {
            identifier: Identifier::property_identifier(logical_type, faceted.member_id),
            feature_type: faceted.feature_type,
            element_type: faceted.type_ref.element_or_raw().clone(),
            method: faceted.method,
            holder: Arc::new(faceted.holder),
            mixed_in: None,
            declaration_index: faceted.declaration_index,
        }
    }

    /// A property or collection contributed by the main action of a mixin
    pub(crate) fn contributed(
        mixee: &LogicalType,
        member_id: &str,
        feature_type: FeatureType,
        mixin_action: &ObjectAction,
        mixin_type: TypeKey,
    ) -> Self {
        Self {
            identifier: Identifier::property_identifier(mixee, member_id),
            feature_type,
            element_type: mixin_action.return_type().element_or_raw().clone(),
            method: Arc::clone(mixin_action.method()),
            holder: Arc::new(mixed_in_holder(mixin_action.facet_holder(), member_id)),
            mixed_in: Some(MixedInMember {
                mixin_type,
                mixee_type: mixee.class().clone(),
            }),
            declaration_index: usize::MAX,
        }
    }

    /// Whether this is a property
    pub fn is_property(&self) -> bool {
        self.feature_type == FeatureType::Property
    }

    /// Whether this is a collection
    pub fn is_collection(&self) -> bool {
        self.feature_type == FeatureType::Collection
    }

    /// Property type, or the element type of a collection
    pub fn element_type(&self) -> &TypeKey {
        &self.element_type
    }

    /// Winning facet of type `F`
    pub fn facet<F: Facet>(&self) -> Option<Arc<F>> {
        self.holder.get::<F>()
    }
}

impl ObjectMember for ObjectAssociation {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    fn facet_holder(&self) -> &FacetHolder {
        &self.holder
    }

    fn mixed_in(&self) -> Option<&MixedInMember> {
        self.mixed_in.as_ref()
    }

    fn declaration_index(&self) -> usize {
        self.declaration_index
    }

    fn method(&self) -> &Arc<MethodDescriptor> {
        &self.method
    }
}

/// An action
#[derive(Debug)]
pub struct ObjectAction {
    identifier: Identifier,
    method: Arc<MethodDescriptor>,
    return_type: TypeRef,
    holder: Arc<FacetHolder>,
    parameters: Vec<ObjectActionParameter>,
    mixed_in: Option<MixedInMember>,
    declaration_index: usize,
}

impl ObjectAction {
    pub(crate) fn from_faceted(logical_type: &LogicalType, faceted: FacetedMethod) -> Self {
        let identifier = Identifier::action_identifier(logical_type, faceted.member_id);
        let parameters = faceted
            .parameters
            .into_iter()
            .enumerate()
            .map(|(index, parameter)| ObjectActionParameter::from_faceted(&identifier, index, parameter))
            .collect();
        Self {
            identifier,
            method: faceted.method,
            return_type: faceted.type_ref,
            holder: Arc::new(faceted.holder),
            parameters,
            mixed_in: None,
            declaration_index: faceted.declaration_index,
        }
    }

    /// An action contributed by the main action of a mixin
    pub(crate) fn contributed(
        mixee: &LogicalType,
        member_id: &str,
        mixin_action: &ObjectAction,
        mixin_type: TypeKey,
    ) -> Self {
        let identifier = Identifier::action_identifier(mixee, member_id);
        let parameters = mixin_action
            .parameters
            .iter()
            .map(|parameter| ObjectActionParameter {
                identifier: identifier.with_parameter_index(parameter.index),
                ..parameter.clone()
            })
            .collect();
        Self {
            identifier,
            method: Arc::clone(&mixin_action.method),
            return_type: mixin_action.return_type.clone(),
            holder: Arc::new(mixed_in_holder(&mixin_action.holder, member_id)),
            parameters,
            mixed_in: Some(MixedInMember {
                mixin_type,
                mixee_type: mixee.class().clone(),
            }),
            declaration_index: usize::MAX,
        }
    }

    /// Declared return type
    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    /// Parameters in declaration order
    pub fn parameters(&self) -> &[ObjectActionParameter] {
        &self.parameters
    }

    /// Number of parameters
    pub fn param_count(&self) -> usize {
        self.parameters.len()
    }

    /// Production or prototype
    pub fn scope(&self) -> ActionScope {
        if self.holder.contains::<PrototypeFacet>() {
            ActionScope::Prototype
        } else {
            ActionScope::Production
        }
    }

    /// Declared or inferred semantics
    pub fn semantics(&self) -> SemanticsOf {
        self.holder
            .get::<ActionSemanticsFacet>()
            .map(|facet| facet.semantics)
            .unwrap_or(SemanticsOf::NotSpecified)
    }

    /// Winning facet of type `F`
    pub fn facet<F: Facet>(&self) -> Option<Arc<F>> {
        self.holder.get::<F>()
    }
}

impl ObjectMember for ObjectAction {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn feature_type(&self) -> FeatureType {
        FeatureType::Action
    }

    fn facet_holder(&self) -> &FacetHolder {
        &self.holder
    }

    fn mixed_in(&self) -> Option<&MixedInMember> {
        self.mixed_in.as_ref()
    }

    fn declaration_index(&self) -> usize {
        self.declaration_index
    }

    fn method(&self) -> &Arc<MethodDescriptor> {
        &self.method
    }

    fn support_methods(&self) -> Vec<Arc<MethodDescriptor>> {
        let mut methods = self.holder.support_methods();
        for parameter in &self.parameters {
            methods.extend(parameter.holder.support_methods());
        }
        methods
    }
}

/// A parameter of an action
#[derive(Debug, Clone)]
pub struct ObjectActionParameter {
    identifier: Identifier,
    index: usize,
    declared_name: String,
    type_ref: TypeRef,
    feature_type: FeatureType,
    holder: Arc<FacetHolder>,
}

impl ObjectActionParameter {
    fn from_faceted(action: &Identifier, index: usize, parameter: FacetedMethodParameter) -> Self {
        Self {
            identifier: action.with_parameter_index(index),
            index,
            declared_name: parameter.name,
            type_ref: parameter.type_ref,
            feature_type: parameter.feature_type,
            holder: Arc::new(parameter.holder),
        }
    }

    /// Identifier, e.g. `crm.Customer#placeOrder[0]`
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Zero-based position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display name
    pub fn name(&self) -> String {
        self.holder
            .get::<MemberNamedFacet>()
            .map(|named| named.name.clone())
            .unwrap_or_else(|| natural_name(&self.declared_name))
    }

    /// Declared type
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Singular or plural
    pub fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    /// The parameter's facets
    pub fn facet_holder(&self) -> &FacetHolder {
        &self.holder
    }
}

/// Facets of the mixin's main action, named after the contributed member
fn mixed_in_holder(source: &FacetHolder, member_id: &str) -> FacetHolder {
    let holder = FacetHolder::new();
    holder.copy_from(source);
    holder.add_facet(MemberNamedFacet {
        name: natural_name(member_id),
        precedence: Precedence::Inferred,
    });
    holder
}
