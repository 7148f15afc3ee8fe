//! Dispatch gate.
//!
//! Per-signal suppression check, evaluated before any normalization or
//! event construction so known-noise signals cost nothing. The policy
//! itself (ignore rules, wrapped-handler re-entry tracking) lives outside
//! the bridge; this module only consults it and short-circuits.

/// Ambient suppression policy consulted by the dispatch gate.
///
/// Implementations answer a single global question with no per-signal
/// arguments: should captures from the uncaught-error path be ignored
/// right now?
pub trait SuppressionPolicy: Send + Sync {
    /// Returns true while uncaught-error captures should be suppressed.
    fn should_ignore_on_error(&self) -> bool;
}

/// Permissive policy: never suppresses anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPolicy;

impl SuppressionPolicy for NoopPolicy {
    fn should_ignore_on_error(&self) -> bool {
        false
    }
}

/// Gate decision for a captured signal.
///
/// Returns false when the signal must be dropped: no normalization, no
/// event construction, no pipeline call.
#[must_use]
pub fn should_capture(policy: &dyn SuppressionPolicy) -> bool {
    !policy.should_ignore_on_error()
}
