//! # Faultline - Global Uncaught-Error Capture Bridge
//!
//! Faultline intercepts errors that escape normal application control flow -
//! global `onError`-style hooks, page-not-found navigation failures, and raw
//! stack traces from an independent stack-tracking feed - and converts them
//! into normalized, structured capture events for an external event pipeline.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Host Platform                        │
//! │     onError  ·  onPageNotFound  ·  stack-trace feed      │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │ raw signals
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Faultline (This Crate)                  │
//! │                                                          │
//! │  ┌──────┐   ┌────────────┐   ┌───────────┐   ┌───────┐ │
//! │  │ Gate │──▶│ Normalizer │──▶│ Mechanism │──▶│  Hub  │ │
//! │  └──────┘   │(Classifier)│   │  Tagger   │   └───┬───┘ │
//! │             └────────────┘   └───────────┘       │     │
//! └───────────────────────────────────────────────────┼─────┘
//!                                                     ▼
//!                                         external event pipeline
//! ```
//!
//! ## Module Structure
//!
//! - [`classification`]: ordered fingerprint rules over raw error text
//! - [`normalize`]: tagged raw-signal union → canonical error objects
//! - [`mechanism`]: capture-mechanism tagging (`handled: false`, mode, type)
//! - [`gate`]: per-signal suppression check, evaluated before any other work
//! - [`handlers`]: the registrar wiring every hook to the chain exactly once
//! - [`hub`] / [`integration`]: pipeline access and the id → instance registry
//! - [`platform`] / [`pipeline`] / [`convert`]: collaborator trait boundaries
//!
//! ## Key Guarantees
//!
//! - **Normalization never raises**: malformed, empty, or unclassifiable
//!   input always terminates in a valid error object, never in a secondary
//!   failure that could itself go uncaught.
//! - **Suppressed signals cost nothing**: the gate runs before allocation,
//!   normalization, or any pipeline call.
//! - **Handlers wire once** and stay active for process lifetime.
//!
//! Delivery, batching, rate limiting, retry, scope stacks, and raw
//! stack-text parsing belong to external collaborators, reachable only
//! through the traits in [`pipeline`], [`platform`], and [`convert`].

pub mod classification;
pub mod convert;
pub mod errors;
pub mod gate;
pub mod handlers;
pub mod hub;
pub mod integration;
pub mod mechanism;
pub mod normalize;
pub mod pipeline;
pub mod platform;

// Re-export the shared event shapes
pub use faultline_protocol as protocol;

// Re-export common types for convenience
pub use classification::{classify, Fingerprint};
pub use convert::{DefaultConverter, StacktraceConverter};
pub use errors::RegistryError;
pub use gate::{should_capture, NoopPolicy, SuppressionPolicy};
pub use handlers::{GlobalHandlers, HandlerConfig};
pub use hub::Hub;
pub use integration::{Integration, IntegrationRegistry};
pub use mechanism::tag_mechanism;
pub use normalize::{normalize, synthesize, ErrorSignal};
pub use pipeline::{CaptureContext, CapturePipeline, ChannelPipeline, EventHint};
pub use platform::{ErrorHandler, HostContext, PageNotFoundHandler, Platform, StackFeed, StackHandler};
