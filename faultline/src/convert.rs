//! Stacktrace-to-event conversion boundary.
//!
//! Structural parsing of raw stack text is not the bridge's business; the
//! feed delivers records that are already structured. Converters only map
//! those records into exception-shaped capture events. The bridge tags the
//! mechanism afterwards.

use faultline_protocol::{CaptureEvent, Exception, RawStacktrace, DEFAULT_ERROR_NAME};

/// Converts a structured stack trace into a capture event.
pub trait StacktraceConverter: Send + Sync {
    fn event_from_stacktrace(&self, stacktrace: &RawStacktrace) -> CaptureEvent;
}

/// Minimal converter: maps the record's name, message, and frames straight
/// into an exception, falling back to defaults where the feed left gaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverter;

impl StacktraceConverter for DefaultConverter {
    fn event_from_stacktrace(&self, stacktrace: &RawStacktrace) -> CaptureEvent {
        let exception_type =
            stacktrace.name.clone().unwrap_or_else(|| DEFAULT_ERROR_NAME.to_string());
        let value = stacktrace.message.clone().unwrap_or_else(|| exception_type.clone());
        CaptureEvent {
            exception: Some(Exception {
                exception_type,
                value,
                stacktrace: (!stacktrace.frames.is_empty()).then(|| stacktrace.frames.clone()),
                mechanism: None,
            }),
            ..CaptureEvent::default()
        }
    }
}
