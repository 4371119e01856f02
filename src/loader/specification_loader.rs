// Copyright 2025 Cowboy AI, LLC.

//! Builds, caches and validates object specifications

use indexmap::IndexMap;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Instant;
use tracing::{debug, error, info, trace, warn};

use super::cache::{SpecId, SpecificationCache};
use super::class_substitutor::{ClassSubstitutor, Substitution};
use super::service_registry::{InMemoryServiceRegistry, ServiceRegistry};
use super::validation::{ValidationFailure, ValidationFailures};
use super::value_semantics::{StaticValueSemantics, ValueSemanticsProvider};
use crate::bean_sort::{BeanMetaData, BeanSort};
use crate::bean_type_registry::BeanTypeRegistry;
use crate::config::{IntrospectionMode, MetaModelConfig};
use crate::errors::{MetaModelError, MetaModelResult};
use crate::facet_processor::FacetProcessor;
use crate::facets::SemanticsOf;
use crate::identifier::{Bookmark, Identifier};
use crate::logical_type_resolver::LogicalTypeResolver;
use crate::memo::Memo;
use crate::programming_model::ProgrammingModel;
use crate::reflection::{ClassDescriptor, ClassKind, ClassRepository, TypeKey};
use crate::spec::{IntrospectionState, ObjectSpecification, ObjectSpecificationPostProcessor};
use crate::validators::MetaModelValidator;

/// State of the single-flight validation protocol
#[derive(Default)]
struct ValidationState {
    in_progress: AtomicBool,
    queue: Mutex<VecDeque<TypeKey>>,
    result: Memo<ValidationFailures>,
    raised: Mutex<ValidationFailures>,
}

/// Assembles a [`SpecificationLoader`]
pub struct SpecificationLoaderBuilder {
    classes: Arc<ClassRepository>,
    config: MetaModelConfig,
    bean_types: Arc<BeanTypeRegistry>,
    value_semantics: Arc<dyn ValueSemanticsProvider>,
    services: Arc<dyn ServiceRegistry>,
    programming_model: Option<ProgrammingModel>,
}

impl SpecificationLoaderBuilder {
    /// Use `config`
    pub fn config(mut self, config: MetaModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Scanned bean types
    pub fn bean_types(mut self, bean_types: Arc<BeanTypeRegistry>) -> Self {
        self.bean_types = bean_types;
        self
    }

    /// Registered value types
    pub fn value_semantics(mut self, value_semantics: Arc<dyn ValueSemanticsProvider>) -> Self {
        self.value_semantics = value_semantics;
        self
    }

    /// Registered domain services
    pub fn services(mut self, services: Arc<dyn ServiceRegistry>) -> Self {
        self.services = services;
        self
    }

    /// Replace the default programming model
    pub fn programming_model(mut self, programming_model: ProgrammingModel) -> Self {
        self.programming_model = Some(programming_model);
        self
    }

    /// Build the loader
    pub fn build(self) -> Arc<SpecificationLoader> {
        let programming_model = self
            .programming_model
            .unwrap_or_else(|| ProgrammingModel::default_model(&self.config));
        let substitutor = ClassSubstitutor::new(self.config.never_introspect.iter().cloned());
        Arc::new_cyclic(|self_ref| SpecificationLoader {
            self_ref: self_ref.clone(),
            facet_processor: FacetProcessor::new(programming_model.factories().to_vec()),
            post_processors: programming_model.post_processors().to_vec(),
            validators: programming_model.validators().to_vec(),
            substitutor,
            config: self.config,
            classes: self.classes,
            bean_types: self.bean_types,
            value_semantics: self.value_semantics,
            services: self.services,
            logical_types: LogicalTypeResolver::new(),
            cache: SpecificationCache::new(),
            fully_introspected: AtomicBool::new(false),
            validation: ValidationState::default(),
        })
    }
}

/// Owns every [`ObjectSpecification`] and drives their introspection
pub struct SpecificationLoader {
    self_ref: Weak<SpecificationLoader>,
    config: MetaModelConfig,
    classes: Arc<ClassRepository>,
    bean_types: Arc<BeanTypeRegistry>,
    value_semantics: Arc<dyn ValueSemanticsProvider>,
    services: Arc<dyn ServiceRegistry>,
    substitutor: ClassSubstitutor,
    facet_processor: FacetProcessor,
    post_processors: Vec<Arc<dyn ObjectSpecificationPostProcessor>>,
    validators: Vec<Arc<dyn MetaModelValidator>>,
    logical_types: LogicalTypeResolver,
    cache: SpecificationCache,
    fully_introspected: AtomicBool,
    validation: ValidationState,
}

impl SpecificationLoader {
    /// Start building a loader over `classes`
    pub fn builder(classes: Arc<ClassRepository>) -> SpecificationLoaderBuilder {
        SpecificationLoaderBuilder {
            classes,
            config: MetaModelConfig::default(),
            bean_types: Arc::new(BeanTypeRegistry::new()),
            value_semantics: Arc::new(StaticValueSemantics::with_defaults()),
            services: Arc::new(InMemoryServiceRegistry::new()),
            programming_model: None,
        }
    }

    // -- collaborators

    /// Configuration in effect
    pub fn config(&self) -> &MetaModelConfig {
        &self.config
    }

    /// The class repository
    pub fn classes(&self) -> &ClassRepository {
        &self.classes
    }

    /// The scanned bean types
    pub fn bean_types(&self) -> &BeanTypeRegistry {
        &self.bean_types
    }

    /// The value semantics provider
    pub fn value_semantics(&self) -> &dyn ValueSemanticsProvider {
        self.value_semantics.as_ref()
    }

    /// The service registry
    pub fn services(&self) -> &dyn ServiceRegistry {
        self.services.as_ref()
    }

    /// The facet processor built from the programming model
    pub fn facet_processor(&self) -> &FacetProcessor {
        &self.facet_processor
    }

    /// Post-processors in run order
    pub fn post_processors(&self) -> &[Arc<dyn ObjectSpecificationPostProcessor>] {
        &self.post_processors
    }

    /// Logical type names and aliases registered so far
    pub fn logical_types(&self) -> &LogicalTypeResolver {
        &self.logical_types
    }

    /// Whether bootstrap has completed
    pub fn is_metamodel_fully_introspected(&self) -> bool {
        self.fully_introspected.load(Ordering::Acquire)
    }

    // -- bootstrap

    /// Introspect every discovered type and validate the result
    ///
    /// Validation failures do not fail bootstrap; read them through
    /// [`get_or_assess_validation_result`](Self::get_or_assess_validation_result).
    pub fn create_meta_model(&self) -> MetaModelResult<()> {
        let started = Instant::now();
        info!(
            classes = self.classes.len(),
            beans = self.bean_types.len(),
            mode = ?self.config.mode,
            parallel = self.config.parallelize,
            "creating metamodel"
        );

        for key in &self.config.preload_types {
            self.load_if_known(&TypeKey::new(key), IntrospectionState::TypeIntrospected)?;
        }

        let mut primed: IndexMap<TypeKey, Arc<ObjectSpecification>> = IndexMap::new();
        let candidates = self
            .bean_types
            .discovered()
            .into_iter()
            .map(|bean| bean.corresponding_class)
            .chain(self.value_semantics.value_types())
            .chain(self.services.registered_types());
        for key in candidates {
            if let Some(spec) = self.prime(&key)? {
                primed.entry(spec.class_key().clone()).or_insert(spec);
            }
        }
        let specs: Vec<Arc<ObjectSpecification>> = primed.into_values().collect();
        debug!(count = specs.len(), "specifications primed");

        self.introspect_wave("type hierarchy", specs.clone(), IntrospectionState::TypeIntrospected)?;

        let of_sort = |sort: BeanSort| -> Vec<Arc<ObjectSpecification>> {
            specs
                .iter()
                .filter(|spec| spec.bean_sort() == sort)
                .cloned()
                .collect()
        };
        for (wave, sort) in [
            ("values", BeanSort::Value),
            ("mixins", BeanSort::Mixin),
            ("managed beans", BeanSort::ManagedBean),
            ("entities", BeanSort::Entity),
            ("view models", BeanSort::ViewModel),
        ] {
            self.introspect_wave(wave, of_sort(sort), IntrospectionState::FullyIntrospected)?;
        }

        if self.config.mode == IntrospectionMode::Full {
            let (mut remaining, others): (Vec<_>, Vec<_>) = self
                .cache
                .values()
                .into_iter()
                .filter(|spec| !spec.state().is_fully_introspected())
                .partition(|spec| spec.is_mixin());
            remaining.extend(others);
            self.introspect_wave("remaining", remaining, IntrospectionState::FullyIntrospected)?;
        }

        let failures = self.validate_exclusive(None)?;
        self.fully_introspected.store(true, Ordering::Release);

        let failure_count = failures.map_or(0, |failures| failures.len());
        if failure_count > 0 {
            warn!(failures = failure_count, "metamodel has validation failures");
        }
        info!(
            specifications = self.cache.len(),
            logical_types = self.logical_types.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "metamodel created"
        );
        Ok(())
    }

    fn introspect_wave(
        &self,
        wave: &'static str,
        specs: Vec<Arc<ObjectSpecification>>,
        up_to: IntrospectionState,
    ) -> MetaModelResult<()> {
        if specs.is_empty() {
            return Ok(());
        }
        debug!(wave, count = specs.len(), target = %up_to, "introspection wave");
        let introspect = |spec: &Arc<ObjectSpecification>| {
            spec.introspect_up_to(up_to).map_err(|err| {
                error!(wave, spec = %spec.class_key(), error = %err, "introspection failed");
                err
            })
        };
        if self.config.parallelize {
            let failures: Vec<MetaModelError> = specs
                .par_iter()
                .filter_map(|spec| introspect(spec).err())
                .collect();
            match failures.into_iter().next() {
                Some(first) => Err(first),
                None => Ok(()),
            }
        } else {
            specs.iter().try_for_each(introspect)
        }
    }

    /// Create the spec for `key` without introspecting it
    fn prime(&self, key: &TypeKey) -> MetaModelResult<Option<Arc<ObjectSpecification>>> {
        match self.substitutor.substitute(key) {
            Substitution::NeverIntrospect => Ok(None),
            Substitution::ReplaceWith(base) => self.spec_for(&base).map(Some),
            Substitution::Retain => self.spec_for(key).map(Some),
        }
    }

    // -- loading

    /// The spec for `key`, introspected at least up to `up_to`
    ///
    /// Returns `None` for classes that are never introspected.
    pub fn load_specification(
        &self,
        key: &TypeKey,
        up_to: IntrospectionState,
    ) -> MetaModelResult<Option<Arc<ObjectSpecification>>> {
        let Some(spec) = self.prime(key)? else {
            return Ok(None);
        };
        spec.introspect_up_to(up_to)?;
        Ok(Some(spec))
    }

    /// Like [`load_specification`](Self::load_specification), but types the
    /// class repository and value semantics do not know yield `None`
    pub fn load_if_known(
        &self,
        key: &TypeKey,
        up_to: IntrospectionState,
    ) -> MetaModelResult<Option<Arc<ObjectSpecification>>> {
        let target = match self.substitutor.substitute(key) {
            Substitution::NeverIntrospect => return Ok(None),
            Substitution::ReplaceWith(base) => base,
            Substitution::Retain => key.clone(),
        };
        if !self.classes.contains(&target) && !self.value_semantics.has_value_semantics(&target) {
            trace!(class = %target, "skipping unknown type");
            return Ok(None);
        }
        self.load_specification(&target, up_to)
    }

    /// The cached spec for `key`, without loading
    pub fn specification(&self, key: &TypeKey) -> Option<Arc<ObjectSpecification>> {
        self.cache.get(key)
    }

    /// The cached spec with handle `id`
    pub fn specification_by_id(&self, id: SpecId) -> Option<Arc<ObjectSpecification>> {
        self.cache.get_by_id(id)
    }

    fn spec_for(&self, key: &TypeKey) -> MetaModelResult<Arc<ObjectSpecification>> {
        if let Some(spec) = self.cache.get(key) {
            return Ok(spec);
        }
        let (class, metadata) = self.describe(key)?;
        let (spec, created) = self.cache.get_or_create(key, |id| {
            ObjectSpecification::new(id, class, &metadata, self.self_ref.clone())
        });
        if created {
            trace!(class = %key, sort = ?spec.bean_sort(), id = %spec.id(), "specification created");
            self.logical_types.register(&spec);
        }
        Ok(spec)
    }

    fn describe(&self, key: &TypeKey) -> MetaModelResult<(Arc<ClassDescriptor>, BeanMetaData)> {
        let has_value_semantics = self.value_semantics.has_value_semantics(key);
        match self.classes.get(key) {
            Some(class) => {
                let metadata = match self.bean_types.lookup(key) {
                    Some(metadata) => metadata,
                    None if has_value_semantics => BeanMetaData::new(key.clone(), BeanSort::Value),
                    None => BeanMetaData::classify(&class, false),
                };
                Ok((class, metadata))
            }
            None if has_value_semantics => {
                let class = ClassDescriptor::builder(key.clone()).kind(ClassKind::Class).build();
                Ok((Arc::new(class), BeanMetaData::new(key.clone(), BeanSort::Value)))
            }
            None => Err(MetaModelError::ClassNotFound(key.clone())),
        }
    }

    /// Drop the spec for `key` and its superclass chain from the cache, then
    /// rebuild it fully
    pub fn reload_specification(&self, key: &TypeKey) -> MetaModelResult<Option<Arc<ObjectSpecification>>> {
        self.invalidate_cache(key);
        self.load_specification(key, IntrospectionState::FullyIntrospected)
    }

    /// Drop the spec for `key` and its superclass chain from the cache
    pub fn invalidate_cache(&self, key: &TypeKey) {
        let key = match self.substitutor.substitute(key) {
            Substitution::ReplaceWith(base) => base,
            _ => key.clone(),
        };
        let mut next = Some(key);
        while let Some(current) = next {
            next = self.classes.get(&current).and_then(|class| class.superclass.clone());
            if let Some(spec) = self.cache.remove(&current) {
                debug!(class = %current, id = %spec.id(), "specification invalidated");
            }
        }
    }

    // -- lookups

    /// Snapshot of every cached spec, in creation order
    pub fn all_specifications(&self) -> Vec<Arc<ObjectSpecification>> {
        self.cache.values()
    }

    /// The spec registered under a logical type name or alias
    pub fn specification_for_logical_type_name(
        &self,
        name: &str,
    ) -> MetaModelResult<Option<Arc<ObjectSpecification>>> {
        match self.logical_types.lookup(name) {
            Some(logical_type) => {
                self.load_specification(logical_type.class(), IntrospectionState::TypeIntrospected)
            }
            None => Ok(None),
        }
    }

    /// The spec of the type a bookmark points into
    pub fn specification_for_bookmark(
        &self,
        bookmark: &Bookmark,
    ) -> MetaModelResult<Option<Arc<ObjectSpecification>>> {
        self.specification_for_logical_type_name(&bookmark.logical_type_name)
    }

    /// Semantics of the action identified by `identifier`
    pub fn action_semantics_of(&self, identifier: &Identifier) -> MetaModelResult<SemanticsOf> {
        let spec = self
            .load_specification(identifier.class(), IntrospectionState::FullyIntrospected)?
            .ok_or_else(|| MetaModelError::SpecificationNotFound(identifier.class().to_string()))?;
        Ok(spec.get_action(identifier.member_id())?.semantics())
    }

    // -- validation

    /// Record a failure found outside the validators; it is merged into
    /// every later assessment
    pub fn raise_failure(&self, failure: ValidationFailure) {
        if self.validation.raised.lock().add(failure) {
            self.validation.result.clear();
        }
    }

    /// Revalidate after `spec` changed state
    ///
    /// Skipped during bootstrap and when incremental revalidation is off.
    /// A request arriving while a validation pass runs is queued and served
    /// by that pass.
    pub fn validate_later(&self, spec: &ObjectSpecification) -> MetaModelResult<()> {
        if !self.is_metamodel_fully_introspected() || !self.config.revalidate_incrementally {
            return Ok(());
        }
        match self.validate_exclusive(Some(spec.class_key().clone()))? {
            Some(failures) if failures.has_failures() => {
                Err(MetaModelError::ValidationFailed(failures.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// The memoized validation result, assessing first if needed
    ///
    /// Called while a validation pass is running, this returns the failures
    /// raised so far instead of waiting.
    pub fn get_or_assess_validation_result(&self) -> MetaModelResult<Arc<ValidationFailures>> {
        if let Some(result) = self.validation.result.peek() {
            return Ok(result);
        }
        match self.validate_exclusive(None)? {
            Some(result) => Ok(result),
            None => Ok(Arc::new(self.validation.raised.lock().clone())),
        }
    }

    /// Number of queued validation requests
    pub fn pending_validations(&self) -> usize {
        self.validation.queue.lock().len()
    }

    /// Whether a validation pass is running
    pub fn is_validation_in_progress(&self) -> bool {
        self.validation.in_progress.load(Ordering::Acquire)
    }

    /// Run validation unless a pass is already running, in which case
    /// `trigger` is queued and `None` returned
    fn validate_exclusive(
        &self,
        trigger: Option<TypeKey>,
    ) -> MetaModelResult<Option<Arc<ValidationFailures>>> {
        let mut trigger = trigger;
        loop {
            if self
                .validation
                .in_progress
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                if let Some(key) = trigger {
                    self.enqueue_validation(key)?;
                }
                return Ok(None);
            }
            let outcome = self.validate_until_settled();
            if outcome.is_err() {
                let dropped = std::mem::take(&mut *self.validation.queue.lock());
                if !dropped.is_empty() {
                    warn!(requests = dropped.len(), "validation failed, dropping queued requests");
                }
            }
            self.validation.in_progress.store(false, Ordering::Release);
            let failures = outcome?;
            // a request may have been queued after the last pass drained
            if self.validation.queue.lock().is_empty() {
                return Ok(Some(failures));
            }
            trigger = None;
        }
    }

    fn validate_until_settled(&self) -> MetaModelResult<Arc<ValidationFailures>> {
        loop {
            let drained = std::mem::take(&mut *self.validation.queue.lock());
            if !drained.is_empty() {
                trace!(requests = drained.len(), "serving queued validation requests");
            }
            self.validation.result.clear();
            let failures = self.validation.result.try_get_or_compute(|| self.assess())?;
            if self.validation.queue.lock().is_empty() {
                return Ok(failures);
            }
        }
    }

    fn enqueue_validation(&self, key: TypeKey) -> MetaModelResult<()> {
        let mut queue = self.validation.queue.lock();
        if queue.len() >= self.config.validation_queue_capacity {
            return Err(MetaModelError::internal(format!(
                "validation queue full ({} requests), dropping request for {key}",
                queue.len()
            )));
        }
        trace!(class = %key, "validation request queued");
        queue.push_back(key);
        Ok(())
    }

    fn assess(&self) -> MetaModelResult<ValidationFailures> {
        let mut failures = ValidationFailures::new();
        for validator in &self.validators {
            validator
                .validate(self, &mut failures)
                .map_err(|source| MetaModelError::Validator {
                    validator: validator.name(),
                    source,
                })?;
        }
        let raised = self.validation.raised.lock().clone();
        failures.extend(&raised);
        debug!(failures = failures.len(), "metamodel assessed");
        Ok(failures)
    }

    // -- disposal

    /// Wait for validation to drain, then drop every specification
    pub fn dispose_meta_model(&self) {
        let deadline = Instant::now() + self.config.dispose_timeout();
        while (self.is_validation_in_progress() || self.pending_validations() > 0)
            && Instant::now() < deadline
        {
            std::thread::sleep(self.config.dispose_poll_interval());
        }
        if self.is_validation_in_progress() {
            warn!(
                timeout_ms = self.config.dispose_timeout_ms,
                "validation still running, disposing anyway"
            );
        }

        self.fully_introspected.store(false, Ordering::Release);
        self.logical_types.clear();
        self.cache.clear();
        self.validation.result.clear();
        self.validation.raised.lock().clear();
        self.validation.queue.lock().clear();
        self.services.clear_bean_cache();
        info!("metamodel disposed");
    }
}

impl fmt::Debug for SpecificationLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecificationLoader")
            .field("specifications", &self.cache.len())
            .field("logical_types", &self.logical_types.len())
            .field("fully_introspected", &self.is_metamodel_fully_introspected())
            .field("config", &self.config)
            .finish()
    }
}
