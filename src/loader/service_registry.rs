// Copyright 2025 Cowboy AI, LLC.

//! Registry of domain services known to the metamodel
//!
//! Services registered here have their types primed as specifications during
//! bootstrap. Singleton instances are cached until the metamodel is disposed.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::{MetaModelError, MetaModelResult};
use crate::reflection::TypeKey;

/// A service instance, downcast by the caller
pub type ServiceInstance = Arc<dyn Any + Send + Sync>;

type ServiceFactory = Arc<dyn Fn() -> anyhow::Result<ServiceInstance> + Send + Sync>;

/// Service lifetime management
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceLifetime {
    /// New instance for each lookup
    Transient,

    /// Single instance, cached until the bean cache is cleared
    Singleton,
}

/// What the loader needs from a service registry
pub trait ServiceRegistry: fmt::Debug + Send + Sync {
    /// Classes of every registered service
    fn registered_types(&self) -> Vec<TypeKey>;

    /// Resolve an instance of the service registered for `service_type`
    fn lookup_service(&self, service_type: &TypeKey) -> MetaModelResult<Option<ServiceInstance>>;

    /// Drop cached singleton instances
    fn clear_bean_cache(&self);
}

/// Service descriptor
#[derive(Clone)]
pub struct ServiceDescriptor {
    /// Service class
    pub service_type: TypeKey,

    /// Service lifetime
    pub lifetime: ServiceLifetime,

    /// Factory function
    factory: ServiceFactory,

    /// Service metadata
    pub metadata: HashMap<String, String>,
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("service_type", &self.service_type)
            .field("lifetime", &self.lifetime)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// In-memory [`ServiceRegistry`]
#[derive(Default)]
pub struct InMemoryServiceRegistry {
    services: RwLock<HashMap<TypeKey, ServiceDescriptor>>,
    instances: RwLock<HashMap<TypeKey, ServiceInstance>>,
}

impl InMemoryServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service
    pub fn register<T, F>(
        &self,
        service_type: impl Into<TypeKey>,
        lifetime: ServiceLifetime,
        factory: F,
    ) -> MetaModelResult<()>
    where
        T: Any + Send + Sync,
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let service_type = service_type.into();
        let mut services = self.services.write();
        if services.contains_key(&service_type) {
            return Err(MetaModelError::Configuration(format!(
                "Service {service_type} already registered"
            )));
        }
        let descriptor = ServiceDescriptor {
            service_type: service_type.clone(),
            lifetime,
            factory: Arc::new(move || Ok(Arc::new(factory()?) as ServiceInstance)),
            metadata: HashMap::new(),
        };
        services.insert(service_type, descriptor);
        Ok(())
    }

    /// Register a singleton service
    pub fn register_singleton<T, F>(&self, service_type: impl Into<TypeKey>, factory: F) -> MetaModelResult<()>
    where
        T: Any + Send + Sync,
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        self.register(service_type, ServiceLifetime::Singleton, factory)
    }

    /// Register a transient service
    pub fn register_transient<T, F>(&self, service_type: impl Into<TypeKey>, factory: F) -> MetaModelResult<()>
    where
        T: Any + Send + Sync,
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        self.register(service_type, ServiceLifetime::Transient, factory)
    }

    /// Resolve and downcast a service instance
    pub fn resolve<T: Any + Send + Sync>(&self, service_type: &TypeKey) -> MetaModelResult<Arc<T>> {
        let instance = self
            .lookup_service(service_type)?
            .ok_or_else(|| MetaModelError::SpecificationNotFound(format!("Service {service_type} not registered")))?;
        instance.downcast::<T>().map_err(|_| {
            MetaModelError::internal(format!("Service {service_type} has an unexpected type"))
        })
    }

    /// Descriptor of a registered service
    pub fn descriptor(&self, service_type: &TypeKey) -> Option<ServiceDescriptor> {
        self.services.read().get(service_type).cloned()
    }

    /// Number of cached singleton instances
    pub fn cached_instances(&self) -> usize {
        self.instances.read().len()
    }
}

impl ServiceRegistry for InMemoryServiceRegistry {
    fn registered_types(&self) -> Vec<TypeKey> {
        let mut types: Vec<TypeKey> = self.services.read().keys().cloned().collect();
        types.sort();
        types
    }

    fn lookup_service(&self, service_type: &TypeKey) -> MetaModelResult<Option<ServiceInstance>> {
        let Some(descriptor) = self.descriptor(service_type) else {
            return Ok(None);
        };
        let create = || {
            (descriptor.factory)().map_err(|err| {
                MetaModelError::internal(format!("Service {service_type} could not be created: {err:#}"))
            })
        };
        match descriptor.lifetime {
            ServiceLifetime::Transient => create().map(Some),
            ServiceLifetime::Singleton => {
                if let Some(instance) = self.instances.read().get(service_type) {
                    return Ok(Some(Arc::clone(instance)));
                }
                let instance = create()?;
                let mut instances = self.instances.write();
                let cached = instances
                    .entry(service_type.clone())
                    .or_insert(instance);
                Ok(Some(Arc::clone(cached)))
            }
        }
    }

    fn clear_bean_cache(&self) {
        self.instances.write().clear();
    }
}

impl fmt::Debug for InMemoryServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryServiceRegistry")
            .field("services", &self.registered_types())
            .field("cached_instances", &self.cached_instances())
            .finish()
    }
}
