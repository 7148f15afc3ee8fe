//! Integration contract and registry.
//!
//! Integrations are installed once by the outer framework during
//! initialization and live for the rest of the process. The registry maps a
//! stable identifier to the live instance; dispatch paths that need their
//! integration back (the stack-feed callback does) look it up by id instead
//! of relying on runtime type lookup.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::errors::RegistryError;
use crate::hub::Hub;
use crate::platform::Platform;

/// A pluggable capture integration.
pub trait Integration: Any + Send + Sync {
    /// Stable identifier, used as the registry key.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Wire the integration's hooks. Invoked once by the framework during
    /// initialization; implementations guard their own install state.
    fn setup_once(&self, hub: &Arc<Hub>, platform: &Platform);

    /// Upcast for registry downcasting back to the concrete type.
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Explicit id → instance map of installed integrations.
#[derive(Default)]
pub struct IntegrationRegistry {
    entries: RwLock<HashMap<&'static str, Arc<dyn Integration>>>,
}

impl IntegrationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an integration under its stable id.
    ///
    /// # Errors
    /// Returns an error if an integration with the same id is already
    /// registered, or the registry lock is poisoned.
    pub fn register(&self, integration: Arc<dyn Integration>) -> Result<(), RegistryError> {
        let mut entries = self.entries.write().map_err(|_| RegistryError::Poisoned)?;
        let id = integration.id();
        if entries.contains_key(id) {
            return Err(RegistryError::DuplicateIntegration(id));
        }
        entries.insert(id, integration);
        Ok(())
    }

    /// Look up an integration by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn Integration>> {
        let Ok(entries) = self.entries.read() else {
            return None;
        };
        entries.get(id).cloned()
    }

    /// Look up an integration by id and downcast to its concrete type.
    #[must_use]
    pub fn get_as<T: Integration>(&self, id: &str) -> Option<Arc<T>> {
        self.get(id)?.as_any().downcast::<T>().ok()
    }
}
