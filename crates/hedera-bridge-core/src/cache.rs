//! Request-scoped document cache.
//!
//! One [`RequestCache`] lives for exactly one inbound request (a resolution
//! call, a substitution pass, a form load). It memoises gateway responses by
//! `(kind, primary id, secondary id)` so each distinct document is fetched at
//! most once per request, including documents that turned out to be missing.
//!
//! The cache is owned by its request and never shared between threads, so it
//! uses `RefCell` rather than a lock.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Arc;

use hedera_transport::DocumentSource;
use serde_json::Value;
use tracing::{debug, trace};

use crate::kind::EntityKind;
use crate::tables::is_not_found;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: EntityKind,
    pub primary: String,
    /// Only set when the secondary id selects its own document.
    pub secondary: Option<String>,
}

impl CacheKey {
    pub fn new(kind: EntityKind, primary: impl Into<String>, secondary: Option<String>) -> Self {
        Self {
            kind,
            primary: primary.into(),
            secondary,
        }
    }
}

/// Outcome of one gateway fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedDocument {
    Found(Arc<Value>),
    /// The mirror answered with its `_status` envelope.
    NotFound,
    /// Transport failure, timeout or unparsable body.
    Unavailable,
}

impl CachedDocument {
    fn from_response(response: Option<Value>) -> Self {
        match response {
            Some(doc) if is_not_found(&doc) => CachedDocument::NotFound,
            Some(doc) => CachedDocument::Found(Arc::new(doc)),
            None => CachedDocument::Unavailable,
        }
    }
}

/// Per-request memo of fetched documents.
#[derive(Debug, Default)]
pub struct RequestCache {
    entries: RefCell<HashMap<CacheKey, CachedDocument>>,
    fetches: Cell<usize>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached document for `key`, fetching `path` from `source` on a miss.
    pub fn get_or_fetch(
        &self,
        key: CacheKey,
        source: &dyn DocumentSource,
        path: &str,
    ) -> CachedDocument {
        if let Some(hit) = self.entries.borrow().get(&key) {
            trace!(kind = %key.kind, id = %key.primary, "request cache hit");
            return hit.clone();
        }

        self.fetches.set(self.fetches.get() + 1);
        let fetched = CachedDocument::from_response(source.get(path));
        debug!(
            kind = %key.kind,
            id = %key.primary,
            path,
            found = matches!(fetched, CachedDocument::Found(_)),
            "request cache miss"
        );
        self.entries.borrow_mut().insert(key, fetched.clone());
        fetched
    }

    /// Number of remote fetches issued through this cache.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
