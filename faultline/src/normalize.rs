//! Error normalization.
//!
//! Converts every accepted input shape into a [`CanonicalError`] with
//! `name`, `message`, and `stack` all populated. The governing policy:
//! normalization never fails. Malformed, empty, or unclassifiable input
//! still terminates in a valid error object - a secondary failure thrown
//! from the uncaught-error path would itself go uncaught.

use std::borrow::Cow;

use faultline_protocol::{CanonicalError, DEFAULT_ERROR_NAME};

use crate::classification::{classify, Fingerprint};

/// Raw input to the global error hook.
///
/// Platforms deliver either a structured error object or a bare string
/// (usually a stack dump). The explicit variants replace runtime
/// type-sniffing and keep the normalization logic exhaustive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSignal {
    /// Already a structured error; passes through normalization unchanged.
    Object(CanonicalError),
    /// Bare string payload; classified and synthesized into an error.
    Text(String),
}

impl ErrorSignal {
    /// Textual view of the signal for classification.
    ///
    /// Text signals classify on their raw content; object signals on their
    /// `"name: message"` rendering, matching how platforms stringify errors.
    #[must_use]
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Object(error) => Cow::Owned(format!("{}: {}", error.name, error.message)),
            Self::Text(raw) => Cow::Borrowed(raw),
        }
    }
}

impl From<CanonicalError> for ErrorSignal {
    fn from(error: CanonicalError) -> Self {
        Self::Object(error)
    }
}

impl From<String> for ErrorSignal {
    fn from(raw: String) -> Self {
        Self::Text(raw)
    }
}

impl From<&str> for ErrorSignal {
    fn from(raw: &str) -> Self {
        Self::Text(raw.to_string())
    }
}

/// Normalize a raw signal into a [`CanonicalError`].
///
/// Structured errors pass through untouched (identity, no field rewriting).
/// Bare strings run through the classifier and fall back to defaults:
/// `name` from the fingerprint type or [`DEFAULT_ERROR_NAME`], `message`
/// from the fingerprint message or `name`, `stack` the raw text verbatim.
#[must_use]
pub fn normalize(signal: ErrorSignal) -> CanonicalError {
    match signal {
        ErrorSignal::Object(error) => error,
        ErrorSignal::Text(raw) => {
            let fingerprint = classify(&raw);
            synthesize(raw, &fingerprint)
        }
    }
}

/// Build a [`CanonicalError`] from raw text and an already-computed
/// fingerprint. Split out so callers that also need the fingerprint (for
/// grouping) classify exactly once.
#[must_use]
pub fn synthesize(raw: String, fingerprint: &Fingerprint) -> CanonicalError {
    let name =
        fingerprint.error_type.clone().unwrap_or_else(|| DEFAULT_ERROR_NAME.to_string());
    let message = fingerprint.error_message.clone().unwrap_or_else(|| name.clone());
    CanonicalError { name, message, stack: raw }
}
