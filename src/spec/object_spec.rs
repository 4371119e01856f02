// Copyright 2025 Cowboy AI, LLC.

//! The specification of one introspected type

use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use tracing::{debug, trace, warn};

use super::faceted_method::FacetedMethodsBuilder;
use super::member_list::MemberList;
use super::members::{ObjectAction, ObjectAssociation, ObjectMember};
use super::mixin;
use super::sorting::sort_members;
use super::state::IntrospectionState;
use crate::bean_sort::{BeanMetaData, BeanSort};
use crate::config::IntrospectionMode;
use crate::errors::{MetaModelError, MetaModelResult};
use crate::facets::{
    AliasedFacet, DomainServiceFacet, Facet, FacetHolder, IconFacet, MixinFacet, ObjectNamedFacet,
    Precedence, TitleFacet, ValueFacet,
};
use crate::feature::{ActionScope, MixedIn};
use crate::identifier::{Identifier, LogicalType};
use crate::loader::{SpecId, SpecificationLoader};
use crate::memo::{Memo, OneShot};
use crate::naming::natural_name;
use crate::reflection::{ClassDescriptor, MethodDescriptor, TypeKey};

/// Direct or transitive subclass lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Immediate subclasses only
    Direct,
    /// Every descendant
    Transitive,
}

/// Facets read on hot paths, refreshed whenever the spec changes
#[derive(Default)]
struct CachedFacets {
    value: Option<Arc<ValueFacet>>,
    title: Option<Arc<TitleFacet>>,
    icon: Option<Arc<IconFacet>>,
    object_named: Option<Arc<ObjectNamedFacet>>,
    mixin: Option<Arc<MixinFacet>>,
    aliased: Option<Arc<AliasedFacet>>,
    domain_service: Option<Arc<DomainServiceFacet>>,
}

/// Metamodel node for one domain type
///
/// Created once per type by the [`SpecificationLoader`] and advanced through
/// [`IntrospectionState`]s on demand.
pub struct ObjectSpecification {
    id: SpecId,
    self_ref: Weak<ObjectSpecification>,
    loader: Weak<SpecificationLoader>,
    class: Arc<ClassDescriptor>,
    logical_type: LogicalType,
    identifier: Identifier,
    bean_sort: BeanSort,
    holder: FacetHolder,
    state: AtomicU8,
    failure: Mutex<Option<String>>,

    superclass: OnceLock<Arc<ObjectSpecification>>,
    interfaces: RwLock<Vec<Arc<ObjectSpecification>>>,
    direct_subclasses: RwLock<Vec<Weak<ObjectSpecification>>>,
    transitive_subclasses: Memo<Vec<Weak<ObjectSpecification>>>,

    associations: MemberList<ObjectAssociation>,
    actions: MemberList<ObjectAction>,
    mixed_in_associations_added: OneShot,
    mixed_in_actions_added: OneShot,
    aliases_registered: OneShot,

    methods_builder: Mutex<Option<FacetedMethodsBuilder>>,
    potential_orphans: Mutex<Vec<Arc<MethodDescriptor>>>,
    cached_facets: RwLock<CachedFacets>,
}

impl ObjectSpecification {
    pub(crate) fn new(
        id: SpecId,
        class: Arc<ClassDescriptor>,
        metadata: &BeanMetaData,
        loader: Weak<SpecificationLoader>,
    ) -> Arc<Self> {
        let logical_type = metadata.logical_type.clone();
        Arc::new_cyclic(|self_ref| Self {
            id,
            self_ref: self_ref.clone(),
            loader,
            identifier: Identifier::class_identifier(&logical_type),
            logical_type,
            bean_sort: metadata.bean_sort,
            class,
            holder: FacetHolder::new(),
            state: AtomicU8::new(IntrospectionState::NotIntrospected as u8),
            failure: Mutex::new(None),
            superclass: OnceLock::new(),
            interfaces: RwLock::new(Vec::new()),
            direct_subclasses: RwLock::new(Vec::new()),
            transitive_subclasses: Memo::new(),
            associations: MemberList::new(),
            actions: MemberList::new(),
            mixed_in_associations_added: OneShot::new(),
            mixed_in_actions_added: OneShot::new(),
            aliases_registered: OneShot::new(),
            methods_builder: Mutex::new(None),
            potential_orphans: Mutex::new(Vec::new()),
            cached_facets: RwLock::new(CachedFacets::default()),
        })
    }

    // -- identity

    /// Arena handle
    pub fn id(&self) -> SpecId {
        self.id
    }

    /// The class descriptor
    pub fn class(&self) -> &Arc<ClassDescriptor> {
        &self.class
    }

    /// The class key
    pub fn class_key(&self) -> &TypeKey {
        &self.class.name
    }

    /// Logical type
    pub fn logical_type(&self) -> &LogicalType {
        &self.logical_type
    }

    /// Logical type name
    pub fn logical_type_name(&self) -> &str {
        self.logical_type.name()
    }

    /// Type identifier
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Full identifier, the logical type name
    pub fn full_identifier(&self) -> String {
        self.identifier.full_identity_string()
    }

    /// Short identifier, the simple logical type name
    pub fn short_identifier(&self) -> String {
        self.identifier.short_identity_string()
    }

    /// Classification
    pub fn bean_sort(&self) -> BeanSort {
        self.bean_sort
    }

    /// Own facets, without hierarchy lookup
    pub fn facet_holder(&self) -> &FacetHolder {
        &self.holder
    }

    /// Whether the type may be registered by logical type name
    pub fn is_registrable(&self) -> bool {
        self.class.is_concrete() && self.class.canonical_name().is_some()
    }

    /// Whether the type is abstract or an interface
    pub fn is_abstract(&self) -> bool {
        !self.class.is_concrete()
    }

    /// Whether the type is a mixin
    pub fn is_mixin(&self) -> bool {
        self.bean_sort.is_mixin()
    }

    /// Declared aliases
    pub fn aliases(&self) -> Vec<String> {
        self.holder
            .get::<AliasedFacet>()
            .map(|aliased| aliased.aliases.clone())
            .unwrap_or_default()
    }

    /// Display name of the type
    pub fn singular_name(&self) -> String {
        self.object_named_facet()
            .map(|named| named.name.clone())
            .unwrap_or_else(|| natural_name(&self.short_identifier()))
    }

    // -- introspection

    /// Current introspection state
    pub fn state(&self) -> IntrospectionState {
        IntrospectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn advance(&self, from: IntrospectionState, to: IntrospectionState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn settle(&self, state: IntrospectionState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Introspect at least up to `target`
    ///
    /// Idempotent. While this spec is being introspected, further calls
    /// return immediately without waiting. A failed step leaves the spec at
    /// the last state it reached, and every later request beyond that state
    /// reports the failure again.
    pub fn introspect_up_to(&self, target: IntrospectionState) -> MetaModelResult<()> {
        if target.is_type_introspected()
            && self.advance(
                IntrospectionState::NotIntrospected,
                IntrospectionState::TypeBeingIntrospected,
            )
        {
            self.run_step(IntrospectionState::NotIntrospected, || {
                self.introspect_type_hierarchy()
            })?;
            self.settle(IntrospectionState::TypeIntrospected);
            let loader = self.loader()?;
            if self.aliases_registered.fire() {
                loader.logical_types().register_aliases(self);
            }
            loader.validate_later(self)?;
        }

        if target.is_fully_introspected()
            && self.advance(
                IntrospectionState::TypeIntrospected,
                IntrospectionState::MembersBeingIntrospected,
            )
        {
            self.run_step(IntrospectionState::TypeIntrospected, || self.introspect_members())?;
            self.settle(IntrospectionState::FullyIntrospected);
            self.loader()?.validate_later(self)?;
        }
        Ok(())
    }

    /// Run one introspection step; on failure record it and fall back to
    /// `previous`
    fn run_step(
        &self,
        previous: IntrospectionState,
        step: impl FnOnce() -> MetaModelResult<()>,
    ) -> MetaModelResult<()> {
        let recorded = self.failure.lock().clone();
        let outcome = match &recorded {
            Some(reason) => Err(MetaModelError::Introspection {
                type_name: self.class_key().to_string(),
                reason: reason.clone(),
            }),
            None => step(),
        };
        if let Err(err) = &outcome {
            if recorded.is_none() {
                warn!(spec = %self.class_key(), back_to = %previous, error = %err, "introspection failed");
                *self.failure.lock() = Some(err.to_string());
            }
            self.settle(previous);
        }
        outcome
    }

    /// Why introspection of this spec failed, if it did
    pub fn introspection_failure(&self) -> Option<String> {
        self.failure.lock().clone()
    }

    fn introspect_type_hierarchy(&self) -> MetaModelResult<()> {
        let loader = self.loader()?;
        debug!(spec = %self.class_key(), sort = ?self.bean_sort, "introspecting type hierarchy");

        let mut builder = FacetedMethodsBuilder::new(Arc::clone(&self.class), loader.classes());
        builder.introspect_class(
            loader.facet_processor(),
            loader.classes(),
            loader.config().policy,
            &self.holder,
        )?;
        *self.methods_builder.lock() = Some(builder);

        if !self.bean_sort.is_value() {
            if let Some(superclass) = self.class.superclass.as_ref() {
                if let Some(spec) =
                    loader.load_if_known(superclass, IntrospectionState::TypeIntrospected)?
                {
                    spec.register_subclass(self);
                    // a concurrent rebuild may have set it first
                    let _ = self.superclass.set(spec);
                }
            }
            let mut interfaces = Vec::with_capacity(self.class.interfaces.len());
            for interface in &self.class.interfaces {
                if let Some(spec) =
                    loader.load_if_known(interface, IntrospectionState::TypeIntrospected)?
                {
                    spec.register_subclass(self);
                    interfaces.push(spec);
                }
            }
            *self.interfaces.write() = interfaces;
        }

        if !self.holder.contains::<ObjectNamedFacet>() {
            self.holder.add_facet(ObjectNamedFacet {
                name: natural_name(&self.short_identifier()),
                precedence: Precedence::Fallback,
            });
        }
        loader.facet_processor().process_object_specification(self)?;
        self.invalidate_cached_facets();
        Ok(())
    }

    fn introspect_members(&self) -> MetaModelResult<()> {
        if !self.bean_sort.has_members() {
            trace!(spec = %self.class_key(), sort = ?self.bean_sort, "no members to introspect");
            return Ok(());
        }
        let loader = self.loader()?;
        debug!(spec = %self.class_key(), "introspecting members");

        let mut builder = self.methods_builder.lock().take().ok_or_else(|| {
            MetaModelError::internal(format!(
                "{} reached member introspection without type introspection",
                self.class_key()
            ))
        })?;
        let processor = loader.facet_processor();
        let config = loader.config();
        let mixin_main = self.mixin_facet().map(|mixin| mixin.main_method.clone());

        let associations = builder.associations(processor, config.policy)?;
        let actions = builder.actions(processor, config.policy, mixin_main.as_deref())?;
        *self.potential_orphans.lock() = builder.potential_orphans(processor);

        let mut associations: Vec<Arc<ObjectAssociation>> = associations
            .into_iter()
            .map(|faceted| Arc::new(ObjectAssociation::from_faceted(&self.logical_type, faceted)))
            .collect();
        let mut actions: Vec<Arc<ObjectAction>> = actions
            .into_iter()
            .map(|faceted| Arc::new(ObjectAction::from_faceted(&self.logical_type, faceted)))
            .collect();
        sort_members(&mut associations, config.member_sorting);
        sort_members(&mut actions, config.member_sorting);

        let referenced = referenced_types(self.class_key(), &associations, &actions);
        self.associations.replace(associations);
        self.actions.replace(actions);

        let depth = match config.mode {
            IntrospectionMode::Full => IntrospectionState::FullyIntrospected,
            IntrospectionMode::Lazy => IntrospectionState::TypeIntrospected,
        };
        for key in referenced {
            loader.load_if_known(&key, depth)?;
        }

        for post_processor in loader.post_processors() {
            post_processor
                .post_process(self)
                .map_err(|source| MetaModelError::PostProcessor {
                    processor: post_processor.name(),
                    type_name: self.class_key().to_string(),
                    source,
                })?;
        }
        self.invalidate_cached_facets();
        Ok(())
    }

    pub(crate) fn loader(&self) -> MetaModelResult<Arc<SpecificationLoader>> {
        self.loader
            .upgrade()
            .ok_or_else(|| MetaModelError::internal("specification loader has been dropped"))
    }

    // -- hierarchy

    /// Superclass specification, once the type hierarchy is introspected
    pub fn superclass(&self) -> Option<Arc<ObjectSpecification>> {
        self.superclass.get().cloned()
    }

    /// Interface specifications, in declaration order
    pub fn interfaces(&self) -> Vec<Arc<ObjectSpecification>> {
        self.interfaces.read().clone()
    }

    /// Replace the interface specifications
    pub fn replace_interfaces(&self, interfaces: Vec<Arc<ObjectSpecification>>) {
        *self.interfaces.write() = interfaces;
    }

    /// Record `subclass` as a direct subclass; repeated calls are ignored
    pub fn register_subclass(&self, subclass: &ObjectSpecification) {
        {
            let mut subclasses = self.direct_subclasses.write();
            subclasses.retain(|weak| weak.strong_count() > 0);
            if subclasses
                .iter()
                .any(|weak| Weak::ptr_eq(weak, &subclass.self_ref))
            {
                return;
            }
            subclasses.push(subclass.self_ref.clone());
        }
        self.invalidate_transitive_subclasses();
    }

    fn invalidate_transitive_subclasses(&self) {
        self.transitive_subclasses.clear();
        if let Some(superclass) = self.superclass.get() {
            superclass.invalidate_transitive_subclasses();
        }
        for interface in self.interfaces.read().iter() {
            interface.invalidate_transitive_subclasses();
        }
    }

    /// Subclass specifications
    ///
    /// The transitive set is memoized and recomputed after any subclass is
    /// registered anywhere below this type.
    pub fn subclasses(&self, depth: Depth) -> Vec<Arc<ObjectSpecification>> {
        match depth {
            Depth::Direct => self.direct_subclasses(),
            Depth::Transitive => self
                .transitive_subclasses
                .get_or_compute(|| self.walk_subclasses())
                .iter()
                .filter_map(Weak::upgrade)
                .collect(),
        }
    }

    fn direct_subclasses(&self) -> Vec<Arc<ObjectSpecification>> {
        self.direct_subclasses
            .read()
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }

    fn walk_subclasses(&self) -> Vec<Weak<ObjectSpecification>> {
        let mut seen: Vec<Weak<ObjectSpecification>> = Vec::new();
        let mut pending = self.direct_subclasses();
        pending.reverse();
        while let Some(spec) = pending.pop() {
            if seen.iter().any(|weak| Weak::ptr_eq(weak, &spec.self_ref)) {
                continue;
            }
            seen.push(spec.self_ref.clone());
            let mut children = spec.direct_subclasses();
            children.reverse();
            pending.extend(children);
        }
        seen
    }

    // -- facets

    /// Winning facet of type `F`, searching this type, then its interfaces,
    /// then its superclass
    ///
    /// A fallback facet is only returned when no better facet exists
    /// anywhere in the hierarchy.
    pub fn get_facet<F: Facet>(&self) -> Option<Arc<F>> {
        let mut fallback = None;
        self.find_facet::<F>(&mut fallback).or(fallback)
    }

    fn find_facet<F: Facet>(&self, fallback: &mut Option<Arc<F>>) -> Option<Arc<F>> {
        if let Some(facet) = self.holder.get::<F>() {
            if !facet.precedence().is_fallback() {
                return Some(facet);
            }
            fallback.get_or_insert(facet);
        }
        for interface in self.interfaces.read().iter() {
            if let Some(facet) = interface.find_facet::<F>(fallback) {
                return Some(facet);
            }
        }
        self.superclass
            .get()
            .and_then(|superclass| superclass.find_facet::<F>(fallback))
    }

    /// Refresh the cached hot facets
    pub fn invalidate_cached_facets(&self) {
        let refreshed = CachedFacets {
            value: self.get_facet(),
            title: self.get_facet(),
            icon: self.get_facet(),
            object_named: self.get_facet(),
            mixin: self.get_facet(),
            aliased: self.get_facet(),
            domain_service: self.get_facet(),
        };
        *self.cached_facets.write() = refreshed;
    }

    /// Cached [`ValueFacet`]
    pub fn value_facet(&self) -> Option<Arc<ValueFacet>> {
        self.cached_facets.read().value.clone()
    }

    /// Cached [`TitleFacet`]
    pub fn title_facet(&self) -> Option<Arc<TitleFacet>> {
        self.cached_facets.read().title.clone()
    }

    /// Cached [`IconFacet`]
    pub fn icon_facet(&self) -> Option<Arc<IconFacet>> {
        self.cached_facets.read().icon.clone()
    }

    /// Cached [`ObjectNamedFacet`]
    pub fn object_named_facet(&self) -> Option<Arc<ObjectNamedFacet>> {
        self.cached_facets.read().object_named.clone()
    }

    /// Cached [`MixinFacet`]
    pub fn mixin_facet(&self) -> Option<Arc<MixinFacet>> {
        self.cached_facets.read().mixin.clone()
    }

    /// Cached [`AliasedFacet`]
    pub fn aliased_facet(&self) -> Option<Arc<AliasedFacet>> {
        self.cached_facets.read().aliased.clone()
    }

    /// Cached [`DomainServiceFacet`]
    pub fn domain_service_facet(&self) -> Option<Arc<DomainServiceFacet>> {
        self.cached_facets.read().domain_service.clone()
    }

    // -- members

    /// Properties and collections currently held, without introspecting or
    /// contributing mixins
    pub fn associations_snapshot(&self) -> Arc<Vec<Arc<ObjectAssociation>>> {
        self.associations.snapshot()
    }

    /// Actions currently held, without introspecting or contributing mixins
    pub fn actions_snapshot(&self) -> Arc<Vec<Arc<ObjectAction>>> {
        self.actions.snapshot()
    }

    /// Replace every association
    pub fn replace_associations(&self, associations: Vec<Arc<ObjectAssociation>>) {
        self.associations.replace(associations);
    }

    /// Replace every action
    pub fn replace_actions(&self, actions: Vec<Arc<ObjectAction>>) {
        self.actions.replace(actions);
    }

    /// Properties and collections
    ///
    /// The first call contributes mixed-in associations.
    pub fn stream_declared_associations(
        &self,
        mixed_in: MixedIn,
    ) -> MetaModelResult<Vec<Arc<ObjectAssociation>>> {
        self.introspect_up_to(IntrospectionState::FullyIntrospected)?;
        self.contribute_mixed_in_associations()?;
        Ok(self
            .associations
            .snapshot()
            .iter()
            .filter(|association| mixed_in.is_included() || !association.is_mixed_in())
            .cloned()
            .collect())
    }

    /// Properties only
    pub fn stream_properties(&self, mixed_in: MixedIn) -> MetaModelResult<Vec<Arc<ObjectAssociation>>> {
        let mut associations = self.stream_declared_associations(mixed_in)?;
        associations.retain(|association| association.is_property());
        Ok(associations)
    }

    /// Collections only
    pub fn stream_collections(&self, mixed_in: MixedIn) -> MetaModelResult<Vec<Arc<ObjectAssociation>>> {
        let mut associations = self.stream_declared_associations(mixed_in)?;
        associations.retain(|association| association.is_collection());
        Ok(associations)
    }

    /// Actions within `scope`
    ///
    /// The first call contributes mixed-in actions.
    pub fn stream_declared_actions(
        &self,
        scope: ActionScope,
        mixed_in: MixedIn,
    ) -> MetaModelResult<Vec<Arc<ObjectAction>>> {
        self.introspect_up_to(IntrospectionState::FullyIntrospected)?;
        self.contribute_mixed_in_actions()?;
        Ok(self
            .actions
            .snapshot()
            .iter()
            .filter(|action| mixed_in.is_included() || !action.is_mixed_in())
            .filter(|action| action.scope().matches(scope))
            .cloned()
            .collect())
    }

    /// The association with the given id, mixed-in ones included
    pub fn get_association(&self, id: &str) -> MetaModelResult<Arc<ObjectAssociation>> {
        self.stream_declared_associations(MixedIn::Included)?
            .into_iter()
            .find(|association| association.id() == id)
            .ok_or_else(|| self.member_not_found(id))
    }

    /// The action with the given id, in any scope, mixed-in ones included
    pub fn get_action(&self, id: &str) -> MetaModelResult<Arc<ObjectAction>> {
        self.stream_declared_actions(ActionScope::Any, MixedIn::Included)?
            .into_iter()
            .find(|action| action.id() == id)
            .ok_or_else(|| self.member_not_found(id))
    }

    fn member_not_found(&self, id: &str) -> MetaModelError {
        MetaModelError::MemberNotFound {
            type_name: self.logical_type_name().to_string(),
            member_id: id.to_string(),
        }
    }

    fn can_receive_mixins(&self) -> bool {
        self.state().is_fully_introspected() && !self.bean_sort.is_mixin()
    }

    fn contribute_mixed_in_actions(&self) -> MetaModelResult<()> {
        if !self.can_receive_mixins() {
            return Ok(());
        }
        let loader = self.loader()?;
        if !self.mixed_in_actions_added.fire() {
            return Ok(());
        }
        let contributed = match mixin::mixed_in_actions(self, &loader) {
            Ok(contributed) => contributed,
            Err(err) => {
                self.mixed_in_actions_added.rearm();
                return Err(err);
            }
        };
        let accepted = mixin::reject_clashes(self, contributed, &self.regular_member_ids(), &loader);
        if !accepted.is_empty() {
            debug!(spec = %self.class_key(), count = accepted.len(), "mixed-in actions contributed");
            self.actions.extend(accepted);
        }
        Ok(())
    }

    fn contribute_mixed_in_associations(&self) -> MetaModelResult<()> {
        if !self.can_receive_mixins() {
            return Ok(());
        }
        let loader = self.loader()?;
        if !self.mixed_in_associations_added.fire() {
            return Ok(());
        }
        let contributed = match mixin::mixed_in_associations(self, &loader) {
            Ok(contributed) => contributed,
            Err(err) => {
                self.mixed_in_associations_added.rearm();
                return Err(err);
            }
        };
        let accepted = mixin::reject_clashes(self, contributed, &self.regular_member_ids(), &loader);
        if !accepted.is_empty() {
            debug!(spec = %self.class_key(), count = accepted.len(), "mixed-in associations contributed");
            self.associations.extend(accepted);
        }
        Ok(())
    }

    fn regular_member_ids(&self) -> HashSet<String> {
        let associations = self.associations.snapshot();
        let actions = self.actions.snapshot();
        associations
            .iter()
            .filter(|member| !member.is_mixed_in())
            .map(|member| member.id().to_string())
            .chain(
                actions
                    .iter()
                    .filter(|member| !member.is_mixed_in())
                    .map(|member| member.id().to_string()),
            )
            .collect()
    }

    // -- validation support

    /// Every method claimed as a member or support method
    pub fn recognized_methods(&self) -> Vec<Arc<MethodDescriptor>> {
        let mut methods = self.holder.support_methods();
        for association in self.associations.snapshot().iter() {
            methods.push(Arc::clone(association.method()));
            methods.extend(association.support_methods());
        }
        for action in self.actions.snapshot().iter() {
            methods.push(Arc::clone(action.method()));
            methods.extend(action.support_methods());
        }
        methods
    }

    /// Support-looking methods no member claimed
    pub fn potential_orphans(&self) -> Vec<Arc<MethodDescriptor>> {
        self.potential_orphans.lock().clone()
    }

    /// Forget the potential orphans once they have been reported
    pub fn clear_potential_orphans(&self) {
        self.potential_orphans.lock().clear();
    }
}

/// Types referred to by members, excluding `own` and `void`
fn referenced_types(
    own: &TypeKey,
    associations: &[Arc<ObjectAssociation>],
    actions: &[Arc<ObjectAction>],
) -> Vec<TypeKey> {
    let mut seen = HashSet::new();
    let candidates = associations
        .iter()
        .map(|association| association.element_type().clone())
        .chain(actions.iter().flat_map(|action| {
            std::iter::once(action.return_type().element_or_raw().clone()).chain(
                action
                    .parameters()
                    .iter()
                    .map(|parameter| parameter.type_ref().element_or_raw().clone()),
            )
        }));
    candidates
        .filter(|key| key != own && !key.is_void())
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

impl fmt::Debug for ObjectSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectSpecification")
            .field("id", &self.id)
            .field("class", &self.class.name)
            .field("logical_type", &self.logical_type.name())
            .field("bean_sort", &self.bean_sort)
            .field("state", &self.state())
            .finish()
    }
}

impl fmt::Display for ObjectSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.logical_type.name(), self.class.name)
    }
}
