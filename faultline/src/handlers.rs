//! # Global Handler Registration
//!
//! Wires the uncaught-error capture chain to the platform, exactly once:
//!
//! - **Stack-trace feed** (always): gate check → convert the structured
//!   trace to an event → tag the capture mechanism → hand to the pipeline
//!   with the original-signal context.
//! - **Global error hook** (`config.onerror`, capability-detected): classify
//!   the signal, synthesize a canonical error when it isn't one already, and
//!   capture it through the exception path with the fingerprint threaded
//!   explicitly alongside.
//! - **Page-not-found hook** (`config.onpagenotfound`, capability-detected):
//!   emit a fixed-message event carrying the raw navigation result; never
//!   exception-shaped, never fingerprinted.
//!
//! Registration is process-lifetime; there is no teardown path.

use std::any::Any;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use faultline_protocol::{CaptureEvent, RawStacktrace, PAGE_NOT_FOUND_MESSAGE};

use crate::classification::classify;
use crate::convert::{DefaultConverter, StacktraceConverter};
use crate::gate::should_capture;
use crate::hub::Hub;
use crate::integration::Integration;
use crate::mechanism::tag_mechanism;
use crate::normalize::{synthesize, ErrorSignal};
use crate::pipeline::{CaptureContext, EventHint};
use crate::platform::{HostContext, Platform, StackFeed};

/// Which native hooks to wrap. Resolved once at construction; immutable for
/// the registrar's lifetime. The stack-feed subscription is not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Wrap the platform's global error hook, if present.
    pub onerror: bool,
    /// Wrap the platform's page-not-found hook, if present.
    pub onpagenotfound: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self { onerror: true, onpagenotfound: true }
    }
}

// Registration lifecycle: Unregistered → Registering → Registered.
// Terminal state, no reverse transitions.
const STATE_UNREGISTERED: u8 = 0;
const STATE_REGISTERING: u8 = 1;
const STATE_REGISTERED: u8 = 2;

/// The global uncaught-error capture integration.
pub struct GlobalHandlers {
    config: HandlerConfig,
    converter: Arc<dyn StacktraceConverter>,
    state: AtomicU8,
}

impl GlobalHandlers {
    /// Stable registry identifier.
    pub const ID: &'static str = "GlobalHandlers";

    #[must_use]
    pub fn new(config: HandlerConfig) -> Self {
        Self::with_converter(config, Arc::new(DefaultConverter))
    }

    /// Registrar with a custom stacktrace-to-event converter.
    #[must_use]
    pub fn with_converter(config: HandlerConfig, converter: Arc<dyn StacktraceConverter>) -> Self {
        Self { config, converter, state: AtomicU8::new(STATE_UNREGISTERED) }
    }

    /// Whether setup has completed and all hooks are wired.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.state.load(Ordering::SeqCst) == STATE_REGISTERED
    }

    /// Build the capture event for a feed-delivered stack trace: structural
    /// conversion first, then the capture mechanism merged into the
    /// exception (mode from the trace, `handled: false`, type from the
    /// feed's mechanism tag).
    #[must_use]
    pub fn event_from_global_handler(&self, stacktrace: &RawStacktrace) -> CaptureEvent {
        tag_mechanism(self.converter.event_from_stacktrace(stacktrace), stacktrace)
    }

    fn install_stack_feed(hub: &Arc<Hub>, feed: &dyn StackFeed) {
        let hub = Arc::clone(hub);
        feed.subscribe(Box::new(move |stacktrace: &RawStacktrace, original_signal: Option<&str>| {
            // Gate first: suppressed signals must cost nothing
            if !should_capture(hub.policy()) {
                return;
            }
            // Per-signal registry lookup; if the integration was never
            // registered with this hub, the feed path stays dark
            let Some(handlers) = hub.integration_as::<GlobalHandlers>(GlobalHandlers::ID) else {
                return;
            };
            let event = handlers.event_from_global_handler(stacktrace);
            let hint = EventHint {
                original_signal: original_signal.map(str::to_string),
                stacktrace: Some(stacktrace.clone()),
            };
            hub.capture_event(event, Some(hint));
        }));
        info!("✓ subscribed to stack-trace feed");
    }

    fn install_error_hook(hub: &Arc<Hub>, ctx: &dyn HostContext) {
        let hub = Arc::clone(hub);
        let installed = ctx.on_error(Box::new(move |signal| {
            let fingerprint = classify(&signal.to_text());
            // The fingerprint travels with this one capture only
            let context = CaptureContext {
                fingerprint: fingerprint.is_match().then(|| fingerprint.grouping_key()),
            };
            let error = match signal {
                ErrorSignal::Object(error) => error,
                ErrorSignal::Text(raw) => synthesize(raw, &fingerprint),
            };
            hub.capture_exception(error, context);
        }));
        if installed {
            info!("✓ attached global error hook: onError");
        } else {
            debug!("host context lacks onError; global error hook not installed");
        }
    }

    fn install_page_not_found_hook(hub: &Arc<Hub>, ctx: &dyn HostContext) {
        let hub = Arc::clone(hub);
        let installed = ctx.on_page_not_found(Box::new(move |res| {
            hub.capture_event(
                CaptureEvent {
                    message: Some(PAGE_NOT_FOUND_MESSAGE.to_string()),
                    extra: Some(res),
                    ..CaptureEvent::default()
                },
                None,
            );
        }));
        if installed {
            info!("✓ attached global hook: onPageNotFound");
        } else {
            debug!("host context lacks onPageNotFound; hook not installed");
        }
    }
}

impl Integration for GlobalHandlers {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn name(&self) -> &str {
        "GlobalHandlers"
    }

    fn setup_once(&self, hub: &Arc<Hub>, platform: &Platform) {
        if self
            .state
            .compare_exchange(
                STATE_UNREGISTERED,
                STATE_REGISTERING,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_err()
        {
            warn!("global handlers already registered; ignoring repeated setup");
            return;
        }

        // The feed subscription is unconditional; config flags only govern
        // the native hook wrappers
        Self::install_stack_feed(hub, platform.feed.as_ref());

        if self.config.onerror {
            Self::install_error_hook(hub, platform.ctx.as_ref());
        }
        if self.config.onpagenotfound {
            Self::install_page_not_found_hook(hub, platform.ctx.as_ref());
        }

        self.state.store(STATE_REGISTERED, Ordering::SeqCst);
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
