//! Structured error types for faultline
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! The capture paths themselves are infallible by construction (a failure
//! thrown from the uncaught-error path would itself go uncaught); only the
//! registration surfaces can reject input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("integration \"{0}\" is already registered")]
    DuplicateIntegration(&'static str),

    #[error("integration registry lock poisoned")]
    Poisoned,
}
