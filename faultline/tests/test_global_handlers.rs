//! End-to-end wiring tests: fake platform + fake feed + recording pipeline
//! around the real registrar.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use faultline::protocol::{
    CanonicalError, CaptureEvent, RawStacktrace, PAGE_NOT_FOUND_MESSAGE,
};
use faultline::{
    CaptureContext, CapturePipeline, ErrorHandler, ErrorSignal, EventHint, GlobalHandlers,
    HandlerConfig, HostContext, Hub, Integration, PageNotFoundHandler, Platform, StackFeed,
    StackHandler, SuppressionPolicy,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingPipeline {
    events: Mutex<Vec<(CaptureEvent, Option<EventHint>)>>,
    exceptions: Mutex<Vec<(CanonicalError, CaptureContext)>>,
}

impl RecordingPipeline {
    fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    fn exception_count(&self) -> usize {
        self.exceptions.lock().unwrap().len()
    }
}

impl CapturePipeline for RecordingPipeline {
    fn capture_event(&self, event: CaptureEvent, hint: Option<EventHint>) {
        self.events.lock().unwrap().push((event, hint));
    }

    fn capture_exception(&self, error: CanonicalError, context: CaptureContext) {
        self.exceptions.lock().unwrap().push((error, context));
    }
}

/// Host context with configurable capabilities, recording installed hooks.
struct FakeContext {
    supports_on_error: bool,
    supports_on_page_not_found: bool,
    error_handler: Mutex<Option<ErrorHandler>>,
    page_not_found_handler: Mutex<Option<PageNotFoundHandler>>,
}

impl FakeContext {
    fn full() -> Self {
        Self {
            supports_on_error: true,
            supports_on_page_not_found: true,
            error_handler: Mutex::new(None),
            page_not_found_handler: Mutex::new(None),
        }
    }

    fn bare() -> Self {
        Self { supports_on_error: false, supports_on_page_not_found: false, ..Self::full() }
    }

    fn has_error_hook(&self) -> bool {
        self.error_handler.lock().unwrap().is_some()
    }

    fn has_page_not_found_hook(&self) -> bool {
        self.page_not_found_handler.lock().unwrap().is_some()
    }

    fn fire_error(&self, signal: ErrorSignal) {
        let guard = self.error_handler.lock().unwrap();
        let handler = guard.as_ref().expect("error hook installed");
        handler(signal);
    }

    fn fire_page_not_found(&self, res: serde_json::Value) {
        let guard = self.page_not_found_handler.lock().unwrap();
        let handler = guard.as_ref().expect("page-not-found hook installed");
        handler(res);
    }
}

impl HostContext for FakeContext {
    fn on_error(&self, handler: ErrorHandler) -> bool {
        if !self.supports_on_error {
            return false;
        }
        *self.error_handler.lock().unwrap() = Some(handler);
        true
    }

    fn on_page_not_found(&self, handler: PageNotFoundHandler) -> bool {
        if !self.supports_on_page_not_found {
            return false;
        }
        *self.page_not_found_handler.lock().unwrap() = Some(handler);
        true
    }
}

#[derive(Default)]
struct FakeFeed {
    handlers: Mutex<Vec<StackHandler>>,
}

impl FakeFeed {
    fn subscriber_count(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }

    fn deliver(&self, stacktrace: &RawStacktrace, original_signal: Option<&str>) {
        for handler in self.handlers.lock().unwrap().iter() {
            handler(stacktrace, original_signal);
        }
    }
}

impl StackFeed for FakeFeed {
    fn subscribe(&self, handler: StackHandler) {
        self.handlers.lock().unwrap().push(handler);
    }
}

struct TogglePolicy(AtomicBool);

impl SuppressionPolicy for TogglePolicy {
    fn should_ignore_on_error(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Harness {
    pipeline: Arc<RecordingPipeline>,
    hub: Arc<Hub>,
    ctx: Arc<FakeContext>,
    feed: Arc<FakeFeed>,
    handlers: Arc<GlobalHandlers>,
    suppress: Arc<TogglePolicy>,
}

fn setup(config: HandlerConfig, ctx: FakeContext) -> Harness {
    let pipeline = Arc::new(RecordingPipeline::default());
    let suppress = Arc::new(TogglePolicy(AtomicBool::new(false)));
    let hub = Arc::new(Hub::new(pipeline.clone(), suppress.clone()));
    let ctx = Arc::new(ctx);
    let feed = Arc::new(FakeFeed::default());
    let platform = Platform::new(ctx.clone(), feed.clone());

    let handlers = Arc::new(GlobalHandlers::new(config));
    hub.register_integration(handlers.clone()).expect("registration succeeds");
    handlers.setup_once(&hub, &platform);

    Harness { pipeline, hub, ctx, feed, handlers, suppress }
}

fn generic_stacktrace() -> RawStacktrace {
    RawStacktrace {
        mode: Some("stacktrace".to_string()),
        mechanism: "generic".to_string(),
        name: Some("TypeError".to_string()),
        message: Some("boom".to_string()),
        ..RawStacktrace::default()
    }
}

// ---------------------------------------------------------------------------
// Native hook scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_on_error_string_is_classified_and_captured() {
    let h = setup(HandlerConfig::default(), FakeContext::full());

    let raw = "ReferenceError: x is not defined\n  at foo (app.js:10)";
    h.ctx.fire_error(ErrorSignal::from(raw));

    let exceptions = h.pipeline.exceptions.lock().unwrap();
    let (error, context) = &exceptions[0];
    assert_eq!(error.name, "ReferenceError");
    assert_eq!(error.message, "x is not defined");
    assert_eq!(error.stack, raw);
    assert_eq!(
        context.fingerprint,
        Some(vec!["ReferenceError".to_string(), "x is not defined".to_string()])
    );
}

#[test]
fn test_on_error_unclassified_string_gets_defaults() {
    let h = setup(HandlerConfig::default(), FakeContext::full());

    h.ctx.fire_error(ErrorSignal::from("weird unstructured noise"));

    let exceptions = h.pipeline.exceptions.lock().unwrap();
    let (error, context) = &exceptions[0];
    assert_eq!(error.name, "UnknownAppError");
    assert_eq!(error.message, "UnknownAppError");
    assert_eq!(error.stack, "weird unstructured noise");
    assert_eq!(context.fingerprint, None);
}

#[test]
fn test_on_error_object_passes_through_unchanged() {
    let h = setup(HandlerConfig::default(), FakeContext::full());

    let error = CanonicalError {
        name: "PaymentError".to_string(),
        message: "card declined".to_string(),
        stack: "PaymentError: card declined\n  at checkout".to_string(),
    };
    h.ctx.fire_error(ErrorSignal::Object(error.clone()));

    let exceptions = h.pipeline.exceptions.lock().unwrap();
    assert_eq!(exceptions[0].0, error);
}

#[test]
fn test_page_not_found_event_shape() {
    let h = setup(HandlerConfig::default(), FakeContext::full());

    h.ctx.fire_page_not_found(json!({ "path": "/missing" }));

    let events = h.pipeline.events.lock().unwrap();
    let (event, hint) = &events[0];
    assert_eq!(event.message.as_deref(), Some(PAGE_NOT_FOUND_MESSAGE));
    assert_eq!(event.extra, Some(json!({ "path": "/missing" })));
    // Never exception-shaped, never fingerprinted
    assert!(event.exception.is_none());
    assert!(event.fingerprint.is_none());
    assert!(hint.is_none());
}

#[test]
fn test_disabled_config_installs_nothing() {
    let h = setup(HandlerConfig { onerror: false, onpagenotfound: false }, FakeContext::full());

    assert!(!h.ctx.has_error_hook());
    assert!(!h.ctx.has_page_not_found_hook());
    // The feed subscription does not depend on config flags
    assert_eq!(h.feed.subscriber_count(), 1);
}

#[test]
fn test_missing_capabilities_are_skipped_silently() {
    let h = setup(HandlerConfig::default(), FakeContext::bare());

    assert!(!h.ctx.has_error_hook());
    assert!(!h.ctx.has_page_not_found_hook());
    assert!(h.handlers.is_registered());
}

// ---------------------------------------------------------------------------
// Stack-feed scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_feed_signal_is_tagged_and_captured_with_hint() {
    let h = setup(HandlerConfig::default(), FakeContext::full());

    let stacktrace = generic_stacktrace();
    h.feed.deliver(&stacktrace, Some("TypeError: boom"));

    let events = h.pipeline.events.lock().unwrap();
    let (event, hint) = &events[0];
    let exception = event.exception.as_ref().expect("exception built");
    assert_eq!(exception.exception_type, "TypeError");
    let mechanism = exception.mechanism.as_ref().expect("mechanism tagged");
    assert_eq!(mechanism.mechanism_type, "generic");
    assert!(!mechanism.handled);
    assert_eq!(
        mechanism.data.as_ref().expect("data").mode.as_deref(),
        Some("stacktrace")
    );

    let hint = hint.as_ref().expect("hint attached");
    assert_eq!(hint.original_signal.as_deref(), Some("TypeError: boom"));
    assert_eq!(hint.stacktrace.as_ref(), Some(&stacktrace));
}

#[test]
fn test_suppressed_feed_signal_never_reaches_pipeline() {
    let h = setup(HandlerConfig::default(), FakeContext::full());

    h.suppress.0.store(true, Ordering::Relaxed);
    h.feed.deliver(&generic_stacktrace(), None);
    assert_eq!(h.pipeline.event_count(), 0);
    assert_eq!(h.pipeline.exception_count(), 0);

    // Lifting suppression lets signals flow again
    h.suppress.0.store(false, Ordering::Relaxed);
    h.feed.deliver(&generic_stacktrace(), None);
    assert_eq!(h.pipeline.event_count(), 1);
}

#[test]
fn test_feed_without_registered_integration_stays_dark() {
    let pipeline = Arc::new(RecordingPipeline::default());
    let hub = Arc::new(Hub::without_suppression(pipeline.clone()));
    let ctx = Arc::new(FakeContext::full());
    let feed = Arc::new(FakeFeed::default());
    let platform = Platform::new(ctx, feed.clone());

    // Setup without registering in the hub: the feed callback finds no
    // live integration and drops the signal
    let handlers = Arc::new(GlobalHandlers::new(HandlerConfig::default()));
    handlers.setup_once(&hub, &platform);

    feed.deliver(&generic_stacktrace(), None);
    assert_eq!(pipeline.event_count(), 0);
}

// ---------------------------------------------------------------------------
// Registration lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_repeated_setup_is_ignored() {
    let h = setup(HandlerConfig::default(), FakeContext::full());
    assert!(h.handlers.is_registered());

    let platform = Platform::new(h.ctx.clone(), h.feed.clone());
    h.handlers.setup_once(&h.hub, &platform);
    h.handlers.setup_once(&h.hub, &platform);

    // Still wired exactly once
    assert_eq!(h.feed.subscriber_count(), 1);
}

#[test]
fn test_duplicate_hub_registration_is_rejected() {
    let h = setup(HandlerConfig::default(), FakeContext::full());
    let second = Arc::new(GlobalHandlers::new(HandlerConfig::default()));
    assert!(h.hub.register_integration(second).is_err());
}
