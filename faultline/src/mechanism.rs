//! Capture-mechanism tagging.
//!
//! Annotates a pipeline event with how the error was caught. Everything the
//! bridge processes is an uncaught-path capture, so `handled` is always
//! `false`; the mechanism type records which subscription path produced the
//! event and the mode of the underlying stack trace.

use faultline_protocol::{CaptureEvent, Exception, Mechanism, MechanismData, RawStacktrace};

/// Merge capture-mechanism metadata into `event.exception`.
///
/// Only the `mechanism` field of the exception is written; all other
/// exception fields survive untouched. An event without an exception gets a
/// default one so the mechanism is never dropped.
#[must_use]
pub fn tag_mechanism(mut event: CaptureEvent, stacktrace: &RawStacktrace) -> CaptureEvent {
    let exception = event.exception.take().unwrap_or_default();
    event.exception = Some(Exception {
        mechanism: Some(Mechanism {
            data: Some(MechanismData { mode: stacktrace.mode.clone() }),
            handled: false,
            mechanism_type: stacktrace.mechanism.clone(),
        }),
        ..exception
    });
    event
}
