//! External capture pipeline boundary.
//!
//! The bridge builds events; the pipeline owns delivery. Whether an event
//! is actually sent, batched, rate-limited, or retried is entirely the
//! pipeline's concern - every call here is fire-and-forget.

use crossbeam_channel::Sender;
use serde_json::json;

use faultline_protocol::{CanonicalError, CaptureEvent, Exception, RawStacktrace};

/// Context threaded explicitly through a single exception capture.
///
/// Replaces ambient scope mutation: a fingerprint set here applies to
/// exactly the one capture it accompanies, nothing else.
#[derive(Debug, Clone, Default)]
pub struct CaptureContext {
    /// Grouping key derived from classification, if any was derived.
    pub fingerprint: Option<Vec<String>>,
}

/// Side-channel context accompanying a capture event, for pipelines that
/// want the pre-normalization input (debugging, richer grouping).
#[derive(Debug, Clone, Default)]
pub struct EventHint {
    /// Raw signal text as originally delivered, when still available.
    pub original_signal: Option<String>,
    /// The structured stack trace the event was built from.
    pub stacktrace: Option<RawStacktrace>,
}

/// External event pipeline consumed by the bridge.
pub trait CapturePipeline: Send + Sync {
    /// Hand off a fully-built capture event.
    fn capture_event(&self, event: CaptureEvent, hint: Option<EventHint>);

    /// Hand off a normalized error through the exception path.
    fn capture_exception(&self, error: CanonicalError, context: CaptureContext);
}

/// Pipeline adapter that forwards events into a channel, typically drained
/// by a transport thread.
///
/// Handoff is non-blocking: if the transport side falls behind, events are
/// dropped rather than stalling the platform's callback thread.
pub struct ChannelPipeline {
    tx: Sender<CaptureEvent>,
}

impl ChannelPipeline {
    #[must_use]
    pub fn new(tx: Sender<CaptureEvent>) -> Self {
        Self { tx }
    }
}

impl CapturePipeline for ChannelPipeline {
    fn capture_event(&self, event: CaptureEvent, _hint: Option<EventHint>) {
        // Non-blocking send (drop if transport is slow)
        let _ = self.tx.try_send(event);
    }

    fn capture_exception(&self, error: CanonicalError, context: CaptureContext) {
        let extra = (!error.stack.is_empty()).then(|| json!({ "stack": error.stack }));
        let event = CaptureEvent {
            exception: Some(Exception {
                exception_type: error.name,
                value: error.message,
                ..Exception::default()
            }),
            fingerprint: context.fingerprint,
            extra,
            ..CaptureEvent::default()
        };
        let _ = self.tx.try_send(event);
    }
}
