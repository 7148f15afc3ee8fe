//! Wires the capture bridge to a scripted host platform and prints every
//! event the pipeline receives.
//!
//! Run with: `RUST_LOG=debug cargo run --example console`

use std::sync::{Arc, Mutex};

use anyhow::Result;
use crossbeam_channel::unbounded;
use faultline::protocol::RawStacktrace;
use faultline::{
    ChannelPipeline, ErrorHandler, ErrorSignal, GlobalHandlers, HandlerConfig, HostContext, Hub,
    Integration, PageNotFoundHandler, Platform, StackFeed, StackHandler,
};
use serde_json::json;

/// Host platform stand-in: supports both hooks and lets us fire signals.
#[derive(Default)]
struct ScriptedHost {
    error_handler: Mutex<Option<ErrorHandler>>,
    page_not_found_handler: Mutex<Option<PageNotFoundHandler>>,
}

impl ScriptedHost {
    fn fire_error(&self, signal: ErrorSignal) {
        if let Ok(guard) = self.error_handler.lock() {
            if let Some(handler) = guard.as_ref() {
                handler(signal);
            }
        }
    }

    fn fire_page_not_found(&self, res: serde_json::Value) {
        if let Ok(guard) = self.page_not_found_handler.lock() {
            if let Some(handler) = guard.as_ref() {
                handler(res);
            }
        }
    }
}

impl HostContext for ScriptedHost {
    fn on_error(&self, handler: ErrorHandler) -> bool {
        if let Ok(mut guard) = self.error_handler.lock() {
            *guard = Some(handler);
            return true;
        }
        false
    }

    fn on_page_not_found(&self, handler: PageNotFoundHandler) -> bool {
        if let Ok(mut guard) = self.page_not_found_handler.lock() {
            *guard = Some(handler);
            return true;
        }
        false
    }
}

#[derive(Default)]
struct ScriptedFeed {
    handlers: Mutex<Vec<StackHandler>>,
}

impl ScriptedFeed {
    fn deliver(&self, stacktrace: &RawStacktrace, original_signal: Option<&str>) {
        if let Ok(handlers) = self.handlers.lock() {
            for handler in handlers.iter() {
                handler(stacktrace, original_signal);
            }
        }
    }
}

impl StackFeed for ScriptedFeed {
    fn subscribe(&self, handler: StackHandler) {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.push(handler);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let (tx, rx) = unbounded();
    let hub = Arc::new(Hub::without_suppression(Arc::new(ChannelPipeline::new(tx))));
    let host = Arc::new(ScriptedHost::default());
    let feed = Arc::new(ScriptedFeed::default());

    let handlers = Arc::new(GlobalHandlers::new(HandlerConfig::default()));
    hub.register_integration(handlers.clone())?;
    handlers.setup_once(&hub, &Platform::new(host.clone(), feed.clone()));

    // Scripted signals standing in for real platform callbacks
    host.fire_error(ErrorSignal::from(
        "TypeError: cannot read property 'user' of undefined\n  at render (pages/home.js:42)",
    ));
    host.fire_page_not_found(json!({ "path": "/missing" }));
    feed.deliver(
        &RawStacktrace {
            mode: Some("stacktrace".to_string()),
            mechanism: "generic".to_string(),
            name: Some("ReferenceError".to_string()),
            message: Some("x is not defined".to_string()),
            ..RawStacktrace::default()
        },
        Some("ReferenceError: x is not defined"),
    );

    for event in rx.try_iter() {
        println!("{}", serde_json::to_string_pretty(&event)?);
    }
    Ok(())
}
