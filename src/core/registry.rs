//! Service registry - central registry of available block services
//!
//! Thread-safe registry keyed by service type id. Hosts register their block
//! services at startup and look them up per render request. Supports:
//! - Service registration and unregistration
//! - Lookup by service type id
//! - Discovery by search query or tag
//!
//! The registry uses `Arc<RwLock<HashMap>>` for shared access, with
//! parking_lot's RwLock so concurrent render paths read without contention.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::service::BlockService;

/// Registry of block services keyed by service type id
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: Arc<RwLock<HashMap<String, Arc<dyn BlockService>>>>,
}

impl ServiceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            services: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a block service
    ///
    /// # Errors
    /// `RegistryError::DuplicateService` if the service type id is taken,
    /// `RegistryError::Invalid` if the metadata fails validation.
    pub fn register(&self, service: Arc<dyn BlockService>) -> Result<(), RegistryError> {
        Self::validate(service.as_ref())?;

        let id = service.metadata().id.clone();
        let mut services = self.services.write();

        if services.contains_key(&id) {
            return Err(RegistryError::DuplicateService(id));
        }

        tracing::debug!(service = %id, "registering block service");
        services.insert(id, service);
        Ok(())
    }

    /// Remove a service from the registry
    pub fn unregister(&self, service_type: &str) -> Result<(), RegistryError> {
        self.services
            .write()
            .remove(service_type)
            .ok_or_else(|| RegistryError::ServiceNotFound(service_type.to_string()))?;
        Ok(())
    }

    /// Look up a service by its type id
    pub fn get(&self, service_type: &str) -> Result<Arc<dyn BlockService>, RegistryError> {
        self.services
            .read()
            .get(service_type)
            .cloned()
            .ok_or_else(|| RegistryError::ServiceNotFound(service_type.to_string()))
    }

    /// All registered services
    pub fn all(&self) -> Vec<Arc<dyn BlockService>> {
        self.services.read().values().cloned().collect()
    }

    /// Services carrying the given tag
    pub fn by_tag(&self, tag: &str) -> Vec<Arc<dyn BlockService>> {
        self.services
            .read()
            .values()
            .filter(|s| s.metadata().tags.iter().any(|t| t == tag))
            .cloned()
            .collect()
    }

    /// Case-insensitive search over service name, description, and tags
    pub fn search(&self, query: &str) -> Vec<Arc<dyn BlockService>> {
        let query = query.to_lowercase();
        self.services
            .read()
            .values()
            .filter(|s| {
                let meta = s.metadata();
                meta.name.to_lowercase().contains(&query)
                    || meta.description.to_lowercase().contains(&query)
                    || meta.tags.iter().any(|t| t.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    /// Number of registered services
    pub fn count(&self) -> usize {
        self.services.read().len()
    }

    /// Whether a service type id is registered
    pub fn contains(&self, service_type: &str) -> bool {
        self.services.read().contains_key(service_type)
    }

    /// Remove all registered services
    pub fn clear(&self) {
        self.services.write().clear();
    }

    fn validate(service: &dyn BlockService) -> Result<(), RegistryError> {
        let meta = service.metadata();
        if meta.id.is_empty() {
            return Err(RegistryError::Invalid("service type id cannot be empty".into()));
        }
        if meta.name.is_empty() {
            return Err(RegistryError::Invalid("service name cannot be empty".into()));
        }
        Ok(())
    }
}

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No service with the given type id is registered
    #[error("service not found: {0}")]
    ServiceNotFound(String),

    /// A service with the given type id is already registered
    #[error("duplicate service type: {0}")]
    DuplicateService(String),

    /// Service metadata failed validation
    #[error("invalid service: {0}")]
    Invalid(String),
}
