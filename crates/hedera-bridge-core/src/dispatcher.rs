//! Variable Syntax Dispatcher
//!
//! Routes a variable path to the entity kind owning its prefix and runs the
//! attribute resolver through the harness. Also performs whole-text
//! substitution of `#hedera-<kind>.<path>#` variables.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use hedera_transport::ClientFactory;
use regex::{Captures, Regex};
use tracing::debug;

use crate::context::ExecutionContext;
use crate::error::BridgeError;
use crate::harness::{Harness, Outcome};
use crate::kind::EntityKind;
use crate::resolver::AttributeResolver;

const HASH_VARIABLE_PATTERN: &str = r"#(hedera-[a-z]+\.[^#\s]+)#";

static HASH_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HASH_VARIABLE_PATTERN).expect("hash variable pattern compiles"));

/// Result of resolving one variable path.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Not a path this dispatcher understands (SoftMiss).
    NoMatch,
    /// Resolved; `None` means the attribute is unknown or the data unavailable.
    Resolved(Option<String>),
    Failed(BridgeError),
}

impl Resolution {
    /// The value, treating every non-value outcome as `None`.
    pub fn value(self) -> Option<String> {
        match self {
            Resolution::Resolved(value) => value,
            _ => None,
        }
    }
}

/// Rendered text plus the variables whose invocation failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub text: String,
    /// One entry per distinct failed path, in order of first appearance.
    pub failures: Vec<(String, BridgeError)>,
}

impl Substitution {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Clone)]
pub struct VariableDispatcher {
    harness: Harness,
}

impl VariableDispatcher {
    pub fn new(harness: Harness) -> Self {
        Self { harness }
    }

    pub fn with_factory(factory: Arc<dyn ClientFactory + Send + Sync>) -> Self {
        Self::new(Harness::new(factory))
    }

    pub fn harness(&self) -> &Harness {
        &self.harness
    }

    pub fn resolve(&self, path: &str, ctx: &ExecutionContext) -> Resolution {
        let path = path.trim();
        let Some(kind) = EntityKind::for_path(path) else {
            debug!(request_id = %ctx.request_id, path, "no entity prefix matches");
            return Resolution::NoMatch;
        };

        match self.harness.execute(&AttributeResolver::new(kind, path), ctx) {
            Outcome::Completed(value) => Resolution::Resolved(value),
            Outcome::Aborted(_) => Resolution::NoMatch,
            Outcome::Failed(err) => Resolution::Failed(err),
        }
    }

    pub fn resolve_value(&self, path: &str, ctx: &ExecutionContext) -> Option<String> {
        self.resolve(path, ctx).value()
    }

    /// Replace every resolvable `#hedera-...#` variable in `text`.
    ///
    /// Unresolvable variables are left untouched. Each distinct path is
    /// resolved once and all lookups share the context's request cache.
    /// Failed invocations are reported in [`Substitution::failures`].
    pub fn substitute(&self, text: &str, ctx: &ExecutionContext) -> Substitution {
        let mut values: HashMap<String, Option<String>> = HashMap::new();
        let mut failures = Vec::new();
        let rendered = HASH_VARIABLE
            .replace_all(text, |caps: &Captures| {
                let path = &caps[1];
                let value = values.entry(path.to_string()).or_insert_with(|| {
                    match self.resolve(path, ctx) {
                        Resolution::Resolved(value) => value,
                        Resolution::NoMatch => None,
                        Resolution::Failed(err) => {
                            failures.push((path.to_string(), err));
                            None
                        }
                    }
                });
                value.clone().unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned();
        Substitution {
            text: rendered,
            failures,
        }
    }

    /// The distinct variable paths in `text`, in order of first appearance.
    pub fn variables_in(text: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for caps in HASH_VARIABLE.captures_iter(text) {
            let path = caps[1].to_string();
            if !seen.contains(&path) {
                seen.push(path);
            }
        }
        seen
    }
}
