//! Hedera Bridge Core
//!
//! The variable-path resolution engine and everything that runs through the
//! shared execution harness.
//!
//! ## Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`path`] | Entity Reference Parser (`hedera-topic.[0.0.9].message[3].messageContent`) |
//! | [`kind`] / [`tables`] | Entity descriptors and their attribute tables |
//! | [`coerce`] | JSON field to display string coercions, exact amount scaling |
//! | [`cache`] | Request-scoped document cache |
//! | [`context`] | Per-request execution context and the thread-local plugin frame |
//! | [`harness`] | Validate / acquire / run / release state machine |
//! | [`resolver`] | Generic table-driven attribute resolver |
//! | [`dispatcher`] | Prefix routing and `#hedera-...#` text substitution |
//! | [`form`] | Form-loading binder |
//! | [`tools`] | Transaction tools |
//! | [`error`] | Failure taxonomy and classification |
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hedera_bridge_core::{ExecutionContext, VariableDispatcher};
//! use hedera_transport::MirrorClientFactory;
//! use hedera_types::BridgeConfig;
//!
//! let dispatcher = VariableDispatcher::with_factory(Arc::new(MirrorClientFactory::new()));
//! let ctx = ExecutionContext::new(BridgeConfig::load(None)?);
//! let balance = dispatcher.resolve_value("hedera-account.[0.0.98].hbarBalance", &ctx);
//! ```

pub mod cache;
pub mod coerce;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod form;
pub mod harness;
pub mod kind;
pub mod path;
pub mod resolver;
pub mod tables;
pub mod tools;

pub use cache::{CacheKey, CachedDocument, RequestCache};
pub use context::{current_plugin, ContextScope, ExecutionContext};
pub use dispatcher::{Resolution, Substitution, VariableDispatcher};
pub use error::{classify, BridgeError, ErrorKind};
pub use form::{FormLoader, FormRow};
pub use harness::{Harness, Outcome, Precheck, ProducesRows, Runs, Validates};
pub use kind::{EntityKind, IdSyntax};
pub use path::EntityReference;
pub use resolver::AttributeResolver;
pub use tools::{
    AssociationAction, HbarTransferTool, ScheduleSignTool, TokenAssociationTool, TokenTransferTool,
    TopicMessageTool, TransactionRecord, MAX_CHUNKS, MESSAGE_CHUNK_SIZE,
};
