//! Capture hub.
//!
//! The hub bundles the three ambient collaborators every capture path
//! touches: the event pipeline, the suppression policy, and the integration
//! registry. Handlers hold an `Arc<Hub>` for process lifetime and all calls
//! through it are fire-and-forget.

use std::sync::Arc;

use faultline_protocol::{CanonicalError, CaptureEvent};
use log::debug;

use crate::errors::RegistryError;
use crate::gate::{NoopPolicy, SuppressionPolicy};
use crate::integration::{Integration, IntegrationRegistry};
use crate::pipeline::{CaptureContext, CapturePipeline, EventHint};

pub struct Hub {
    pipeline: Arc<dyn CapturePipeline>,
    policy: Arc<dyn SuppressionPolicy>,
    registry: IntegrationRegistry,
}

impl Hub {
    #[must_use]
    pub fn new(pipeline: Arc<dyn CapturePipeline>, policy: Arc<dyn SuppressionPolicy>) -> Self {
        Self { pipeline, policy, registry: IntegrationRegistry::new() }
    }

    /// Hub with a permissive suppression policy.
    #[must_use]
    pub fn without_suppression(pipeline: Arc<dyn CapturePipeline>) -> Self {
        Self::new(pipeline, Arc::new(NoopPolicy))
    }

    /// Register an integration instance under its stable id.
    ///
    /// # Errors
    /// Returns an error if the id is already taken.
    pub fn register_integration(
        &self,
        integration: Arc<dyn Integration>,
    ) -> Result<(), RegistryError> {
        debug!("registering integration: {}", integration.name());
        self.registry.register(integration)
    }

    /// Look up a registered integration by id.
    #[must_use]
    pub fn integration(&self, id: &str) -> Option<Arc<dyn Integration>> {
        self.registry.get(id)
    }

    /// Look up a registered integration by id as its concrete type.
    #[must_use]
    pub fn integration_as<T: Integration>(&self, id: &str) -> Option<Arc<T>> {
        self.registry.get_as::<T>(id)
    }

    /// The ambient suppression policy, for gate checks.
    #[must_use]
    pub fn policy(&self) -> &dyn SuppressionPolicy {
        self.policy.as_ref()
    }

    /// Consult the ambient suppression policy.
    #[must_use]
    pub fn should_ignore_on_error(&self) -> bool {
        self.policy.should_ignore_on_error()
    }

    /// Hand a fully-built event to the pipeline.
    pub fn capture_event(&self, event: CaptureEvent, hint: Option<EventHint>) {
        self.pipeline.capture_event(event, hint);
    }

    /// Hand a normalized error to the pipeline's exception path.
    pub fn capture_exception(&self, error: CanonicalError, context: CaptureContext) {
        self.pipeline.capture_exception(error, context);
    }
}
