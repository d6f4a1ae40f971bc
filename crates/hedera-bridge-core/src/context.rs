//! Execution context for one inbound request.
//!
//! [`ExecutionContext`] is passed explicitly through every resolver, loader
//! and tool call: it carries the request id, the effective configuration and
//! the request-scoped cache.
//!
//! The harness additionally marks the active plugin in a thread-local frame
//! via [`ContextScope`]. The previous frame is restored when the scope is
//! dropped, so nesting and unwinding both leave the thread as they found it.

use std::cell::RefCell;

use hedera_types::BridgeConfig;
use uuid::Uuid;

use crate::cache::RequestCache;

#[derive(Debug)]
pub struct ExecutionContext {
    pub request_id: Uuid,
    pub config: BridgeConfig,
    pub cache: RequestCache,
}

impl ExecutionContext {
    /// Fresh context with a new request id and an empty cache.
    pub fn new(config: BridgeConfig) -> Self {
        Self::with_request_id(config, Uuid::new_v4())
    }

    pub fn with_request_id(config: BridgeConfig, request_id: Uuid) -> Self {
        Self {
            request_id,
            config,
            cache: RequestCache::new(),
        }
    }
}

// =============================================================================
// Thread-local plugin frame
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
    pub plugin: String,
    pub request_id: Uuid,
}

thread_local! {
    static CURRENT_FRAME: RefCell<Option<ScopeFrame>> = const { RefCell::new(None) };
}

/// Guard that installs a [`ScopeFrame`] and restores the previous one on drop.
#[must_use = "the frame is restored as soon as the scope is dropped"]
pub struct ContextScope {
    previous: Option<ScopeFrame>,
}

impl ContextScope {
    pub fn enter(plugin: &str, request_id: Uuid) -> Self {
        let frame = ScopeFrame {
            plugin: plugin.to_string(),
            request_id,
        };
        let previous = CURRENT_FRAME.with(|current| current.borrow_mut().replace(frame));
        Self { previous }
    }
}

impl Drop for ContextScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_FRAME.with(|current| *current.borrow_mut() = previous);
    }
}

/// The frame installed by the innermost active [`ContextScope`] on this thread.
pub fn current_frame() -> Option<ScopeFrame> {
    CURRENT_FRAME.with(|current| current.borrow().clone())
}

pub fn current_plugin() -> Option<String> {
    current_frame().map(|frame| frame.plugin)
}
