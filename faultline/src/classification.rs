//! Fingerprint classification for raw error text.
//!
//! Uncaught-error hooks frequently deliver plain strings instead of error
//! objects: a typed head like `"TypeError: x is not a function"` followed by
//! stack lines, or host-runtime noise with no typed head at all. This module
//! extracts a stable `(error type, error message)` pair from that text. The
//! pair serves two purposes:
//!
//! 1. **Grouping** - it becomes the event fingerprint so identical failures
//!    collapse into one group server-side.
//! 2. **Synthesis** - the normalizer uses it to build a proper error object
//!    when the raw signal carried none.
//!
//! # Matching Strategy
//!
//! Rules are tried in table order; the first match wins. A rule either
//! extracts the type from the text itself (`<Type>Error: <message>` heads)
//! or pins a fixed type for host-runtime failures that carry none. No rule
//! matching is not an error: the caller synthesizes defaults.

use regex::Regex;
use std::sync::OnceLock;

/// Classification result: a semantic error category and message extracted
/// from raw signal text. Both fields are `None` when no rule matched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fingerprint {
    /// Semantic error category, e.g. `"ReferenceError"`.
    pub error_type: Option<String>,
    /// Message text extracted alongside the category.
    pub error_message: Option<String>,
}

impl Fingerprint {
    /// Fingerprint with no classification (no rule matched).
    #[must_use]
    pub const fn none() -> Self {
        Self { error_type: None, error_message: None }
    }

    /// Returns true if any classification rule matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.error_type.is_some() || self.error_message.is_some()
    }

    /// Grouping key for the event pipeline: the present components, type
    /// first. Empty when nothing matched.
    #[must_use]
    pub fn grouping_key(&self) -> Vec<String> {
        self.error_type.iter().chain(self.error_message.iter()).cloned().collect()
    }
}

// =============================================================================
// CLASSIFICATION RULES
// =============================================================================

/// A single classification rule.
///
/// When `error_type` is `None`, capture group 1 is the type and group 2 the
/// message. When it is `Some`, the type is fixed and capture group 1 (if any)
/// is the message.
struct Rule {
    pattern: &'static str,
    error_type: Option<&'static str>,
}

/// Ordered rule table. First match wins, so more specific patterns go first.
const RULES: &[Rule] = &[
    // Typed head with message: "TypeError: x is not a function",
    // optionally with a browser-style "Uncaught " prefix
    Rule {
        pattern: r"^\s*(?:Uncaught\s+)?((?:[A-Za-z_][A-Za-z0-9_]*)?(?:Error|Exception)):\s*([^\n]+)",
        error_type: None,
    },
    // Bare typed head with no message text, e.g. "RangeError"
    Rule {
        pattern: r"^\s*((?:[A-Za-z_][A-Za-z0-9_]*)?(?:Error|Exception))\s*(?:\n|$)",
        error_type: None,
    },
    // Cross-origin / sandboxed hosts report an opaque "Script error"
    Rule { pattern: r"(?i)^\s*script error\b[.:]?\s*([^\n]*)", error_type: Some("ScriptError") },
    // Host module loader failures carry the module path, not a typed head
    Rule {
        pattern: r#"module ['"]([^'"]+)['"] is not (?:defined|found)"#,
        error_type: Some("ModuleNotFoundError"),
    },
];

/// Compiled rule patterns, built once per process.
static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();

fn compiled_rules() -> &'static [Regex] {
    COMPILED.get_or_init(|| {
        RULES
            .iter()
            .map(|rule| Regex::new(rule.pattern).expect("classification rule pattern must compile"))
            .collect()
    })
}

/// Classify raw signal text into a [`Fingerprint`].
///
/// Pure and deterministic: the same input always yields the same output.
/// Returns [`Fingerprint::none`] when no rule matches - callers are expected
/// to fall back to default naming, never to treat this as a failure.
#[must_use]
pub fn classify(signal: &str) -> Fingerprint {
    for (rule, regex) in RULES.iter().zip(compiled_rules()) {
        if let Some(captures) = regex.captures(signal) {
            let (error_type, message_group) = match rule.error_type {
                Some(fixed) => (Some(fixed.to_string()), captures.get(1)),
                None => (captures.get(1).map(|m| m.as_str().to_string()), captures.get(2)),
            };
            let error_message = message_group
                .map(|m| m.as_str().trim())
                .filter(|m| !m.is_empty())
                .map(str::to_string);
            return Fingerprint { error_type, error_message };
        }
    }
    Fingerprint::none()
}
