//! Host platform and stack-trace feed boundaries.
//!
//! The bridge never talks to native hook registration directly. Platforms
//! implement [`HostContext`] over whatever global hooks they actually have;
//! capability is feature-detected through the install return value, never
//! assumed. The independent stack-tracking subsystem is abstracted as
//! [`StackFeed`].
//!
//! Handlers are installed once at setup and stay wired for process
//! lifetime - there is no unregister path. They must be `Send + Sync`
//! because the platform owns them from then on; invocation itself is
//! sequential per the platform's callback contract.

use std::sync::Arc;

use faultline_protocol::RawStacktrace;

use crate::normalize::ErrorSignal;

/// Callback installed on the platform's global error hook.
pub type ErrorHandler = Box<dyn Fn(ErrorSignal) + Send + Sync>;

/// Callback installed on the platform's page-not-found hook. Receives the
/// raw navigation result as the platform reported it.
pub type PageNotFoundHandler = Box<dyn Fn(serde_json::Value) + Send + Sync>;

/// Callback subscribed to the stack-trace feed. Receives the structured
/// trace and, when the feed still has it, the original raw signal text.
pub type StackHandler = Box<dyn Fn(&RawStacktrace, Option<&str>) + Send + Sync>;

/// Host platform context exposing native uncaught-error hooks.
///
/// Each install method returns whether the hook was actually wired. A
/// `false` return means the platform lacks the capability; the caller
/// skips that path without treating it as an error.
pub trait HostContext: Send + Sync {
    /// Install a global error handler. Returns false when the platform has
    /// no such hook.
    fn on_error(&self, handler: ErrorHandler) -> bool;

    /// Install a page-not-found handler. Returns false when the platform
    /// has no such hook.
    fn on_page_not_found(&self, handler: PageNotFoundHandler) -> bool;
}

/// Independent stack-tracking subsystem delivering structured traces
/// whenever the platform signals an uncaught condition.
pub trait StackFeed: Send + Sync {
    /// Subscribe to the feed. Subscriptions last for process lifetime.
    fn subscribe(&self, handler: StackHandler);
}

/// Bundle of platform collaborators handed to integrations at setup.
#[derive(Clone)]
pub struct Platform {
    /// Host context with the native hooks.
    pub ctx: Arc<dyn HostContext>,
    /// Stack-trace feed.
    pub feed: Arc<dyn StackFeed>,
}

impl Platform {
    #[must_use]
    pub fn new(ctx: Arc<dyn HostContext>, feed: Arc<dyn StackFeed>) -> Self {
        Self { ctx, feed }
    }
}
