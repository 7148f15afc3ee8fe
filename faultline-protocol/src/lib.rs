//! # Shared Event Shapes (Bridge ↔ Pipeline)
//!
//! Defines the data structures and constants shared between the capture
//! bridge and the external event pipeline. Everything here is plain data:
//! the bridge builds these values once per captured signal and hands them
//! to the pipeline, which owns them from then on.
//!
//! ## Key Types
//!
//! - [`CaptureEvent`] - Canonical event record handed to the pipeline
//! - [`Exception`] - Exception payload attached to an event
//! - [`Mechanism`] - How the error was caught (hook, feed, handled flag)
//! - [`CanonicalError`] - Normalized error (`name`/`message`/`stack` always set)
//! - [`RawStacktrace`] - Structured record delivered by the stack-trace feed

use serde::{Deserialize, Serialize};

// ============================================================================
// Well-Known Constants
// ============================================================================

/// Error name used when no classification rule matched a raw signal.
///
/// Normalization never fails: signals without a recognizable error head
/// still produce a valid [`CanonicalError`] carrying this name.
pub const DEFAULT_ERROR_NAME: &str = "UnknownAppError";

/// Fixed message for page-not-found navigation failures.
///
/// This path never produces an exception-shaped event: the raw navigation
/// result travels in `extra`, nothing is classified or fingerprinted.
pub const PAGE_NOT_FOUND_MESSAGE: &str = "page not found";

/// Mechanism type recorded for captures coming through the global error hook.
pub const MECHANISM_ONERROR: &str = "onerror";

// ============================================================================
// Event Shapes
// ============================================================================

/// Severity of a capture event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Uncaught-path captures default to error severity.
    #[default]
    Error,
    Warning,
    Info,
}

/// Canonical event record handed to the external pipeline.
///
/// Constructed fresh per capture. The bridge never mutates an event after
/// handing it off; delivery, queueing, and retry are pipeline concerns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureEvent {
    /// Human-readable message (used by non-exception events).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Event severity.
    #[serde(default)]
    pub level: Level,

    /// Exception payload, if this event represents a thrown error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<Exception>,

    /// Grouping key derived from classification, if any was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Vec<String>>,

    /// Arbitrary context payload (e.g. a raw navigation result).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

/// Exception payload of a [`CaptureEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exception {
    /// Error type, e.g. `"ReferenceError"`.
    #[serde(rename = "type")]
    pub exception_type: String,

    /// Error message text.
    pub value: String,

    /// Structured frames, when the feed already parsed them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<Vec<StackFrame>>,

    /// Capture-mechanism metadata. Attached by the bridge; other fields
    /// of the exception are left untouched when it is merged in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<Mechanism>,
}

impl Default for Exception {
    fn default() -> Self {
        Self {
            exception_type: DEFAULT_ERROR_NAME.to_string(),
            value: String::new(),
            stacktrace: None,
            mechanism: None,
        }
    }
}

/// How an event was captured.
///
/// `handled` is `false` for everything the bridge produces: every path here
/// is an uncaught-path capture (global hook or stack-trace subscription).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mechanism {
    /// Mode of the underlying stack trace, when the feed reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MechanismData>,

    /// Whether application code handled the error. Always `false` here.
    pub handled: bool,

    /// Which subscription path produced the event, e.g. `"onerror"` or the
    /// stack-trace feed's own mechanism tag.
    #[serde(rename = "type")]
    pub mechanism_type: String,
}

/// Extra mechanism detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanismData {
    /// Stack-trace mode reported by the feed (e.g. `"stacktrace"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

// ============================================================================
// Normalized Errors
// ============================================================================

/// Normalized error object.
///
/// Invariant: fully populated before leaving the normalizer, even when the
/// raw signal carried no structure. `stack` holds the original raw text
/// verbatim and is never reformatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalError {
    /// Error type name, e.g. `"TypeError"`. Never empty.
    pub name: String,
    /// Error message. Falls back to `name` when nothing better exists.
    pub message: String,
    /// Raw stack text as the platform delivered it.
    pub stack: String,
}

// ============================================================================
// Stack-Trace Feed Records
// ============================================================================

/// Structured stack trace delivered by the independent stack-tracking feed.
///
/// The bridge does not parse raw stack text itself; the feed hands over
/// records that are already structured, tagged with how they were obtained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStacktrace {
    /// How the trace was obtained (e.g. `"stacktrace"`, `"onerror"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Mechanism tag for this record, copied into the event's mechanism.
    pub mechanism: String,

    /// Error type name, when the feed recognized one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Error message, when the feed recognized one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Parsed frames, innermost last.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<StackFrame>,
}

/// Single frame of a parsed stack trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// Function name, if resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Source file, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Line number, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineno: Option<u32>,

    /// Column number, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colno: Option<u32>,
}
