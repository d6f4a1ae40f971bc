//! Execution Harness
//!
//! Every resolver, form loader and transaction tool runs through the same
//! control flow:
//!
//! ```text
//! Idle ─validates──► InputValidated ─acquire──► ClientAcquired ─validates_with_client──► ClientValidated ─runs──► Completed
//!   │                                  │                          │                                        │
//!   └─► Aborted (debug)                └─► Failed                 ├─► Aborted                              └─► Failed
//!                                                                 └─► Failed
//! ```
//!
//! Plugins are values implementing small capability traits ([`Validates`],
//! [`Runs`], [`ProducesRows`]); the harness composes them. Guarantees:
//!
//! - the offline precheck never touches the network
//! - once acquired, the [`NetworkClient`] is released exactly once on every path,
//!   including errors and panics inside the plugin
//! - a panic in any step, the offline precheck and client acquisition included,
//!   becomes an `Unclassified` failure
//! - the thread-local plugin frame is restored on every path
//! - failures are classified and logged once, with the request id and plugin name
//! - `SoftMiss` and `DataUnavailable` end as [`Outcome::Aborted`], never as failures

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::Result;
use hedera_transport::{ClientFactory, ClientRequirement, NetworkClient};
use tracing::{debug, info_span};

use crate::context::{ContextScope, ExecutionContext};
use crate::error::{classify, BridgeError};
use crate::form::FormRow;

/// Result of a precheck step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precheck {
    Proceed,
    /// Stop without error; the reason is logged at debug.
    Abort(String),
}

impl Precheck {
    pub fn abort(reason: impl Into<String>) -> Self {
        Precheck::Abort(reason.into())
    }
}

/// Input validation, before and after a client is available.
pub trait Validates {
    /// Name used in logs and the thread-local frame.
    fn plugin_name(&self) -> &str;

    fn client_requirement(&self) -> ClientRequirement {
        ClientRequirement::ReadOnly
    }

    /// Offline check of caller-supplied input. Must not do network I/O.
    fn validates(&self, ctx: &ExecutionContext) -> Precheck;

    /// Optional read-only queries that rule out a doomed operation.
    fn validates_with_client(
        &self,
        _client: &NetworkClient,
        _ctx: &ExecutionContext,
    ) -> Result<Precheck> {
        Ok(Precheck::Proceed)
    }
}

/// The plugin's actual work.
pub trait Runs: Validates {
    type Output;

    fn runs(&self, client: &NetworkClient, ctx: &ExecutionContext) -> Result<Self::Output>;
}

/// Plugins whose output binds to form rows.
pub trait ProducesRows: Runs {
    fn produces_rows(&self, output: Self::Output) -> Vec<FormRow>;
}

/// Terminal state of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    Aborted(String),
    Failed(BridgeError),
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Completed(value) => Outcome::Completed(f(value)),
            Outcome::Aborted(reason) => Outcome::Aborted(reason),
            Outcome::Failed(err) => Outcome::Failed(err),
        }
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            _ => None,
        }
    }
}

enum Step<T> {
    Ran(T),
    Aborted(String),
}

/// Runs plugins with a fresh client per invocation.
#[derive(Clone)]
pub struct Harness {
    factory: Arc<dyn ClientFactory + Send + Sync>,
}

impl Harness {
    pub fn new(factory: Arc<dyn ClientFactory + Send + Sync>) -> Self {
        Self { factory }
    }

    /// Drive `plugin` through the full state machine.
    pub fn execute<P: Runs + ?Sized>(&self, plugin: &P, ctx: &ExecutionContext) -> Outcome<P::Output> {
        let name = plugin.plugin_name();
        let _scope = ContextScope::enter(name, ctx.request_id);
        let span = info_span!("invocation", request_id = %ctx.request_id, plugin = name);
        let _entered = span.enter();

        // A panic after acquisition unwinds through `drive`, whose client
        // releases itself on drop.
        match catch_unwind(AssertUnwindSafe(|| self.drive(plugin, ctx, name))) {
            Ok(Ok(Step::Ran(output))) => {
                debug!(request_id = %ctx.request_id, plugin = name, "invocation completed");
                Outcome::Completed(output)
            }
            Ok(Ok(Step::Aborted(reason))) => Outcome::Aborted(reason),
            Ok(Err(err)) => failed(classify(&err), ctx, name),
            Err(payload) => {
                let message = if let Some(s) = payload.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic payload".to_string()
                };
                failed(
                    BridgeError::Unclassified {
                        message: format!("plugin panicked: {}", message),
                    },
                    ctx,
                    name,
                )
            }
        }
    }

    fn drive<P: Runs + ?Sized>(
        &self,
        plugin: &P,
        ctx: &ExecutionContext,
        name: &str,
    ) -> Result<Step<P::Output>> {
        if let Precheck::Abort(reason) = plugin.validates(ctx) {
            debug!(request_id = %ctx.request_id, plugin = name, %reason, "input precheck aborted");
            return Ok(Step::Aborted(reason));
        }

        let mut client = self.factory.acquire(&ctx.config, plugin.client_requirement())?;
        debug!(request_id = %ctx.request_id, plugin = name, network = %client.network(), "client acquired");

        let result = match plugin.validates_with_client(&client, ctx) {
            Ok(Precheck::Abort(reason)) => {
                debug!(request_id = %ctx.request_id, plugin = name, %reason, "client precheck aborted");
                Ok(Step::Aborted(reason))
            }
            Ok(Precheck::Proceed) => plugin.runs(&client, ctx).map(Step::Ran),
            Err(err) => Err(err),
        };
        client.release();
        result
    }

    /// Execute a row-producing plugin and bind its output to rows.
    pub fn load_rows<P: ProducesRows + ?Sized>(
        &self,
        plugin: &P,
        ctx: &ExecutionContext,
    ) -> Outcome<Vec<FormRow>> {
        self.execute(plugin, ctx).map(|output| plugin.produces_rows(output))
    }
}

fn failed<T>(err: BridgeError, ctx: &ExecutionContext, plugin: &str) -> Outcome<T> {
    err.log(ctx.request_id, plugin);
    if err.is_recoverable() {
        return Outcome::Aborted(err.to_string());
    }
    Outcome::Failed(err)
}
