//! Hedera Bridge
//!
//! Resolves ledger variables such as `hedera-account.[0.0.1234].hbarBalance`
//! against the Hedera mirror node and runs ledger operations through one
//! execution harness.
//!
//! | Crate | Re-exported as | Contents |
//! |-------|----------------|----------|
//! | `hedera-types` | [`types`] | ids, networks, [`BridgeConfig`] |
//! | `hedera-transport` | [`transport`] | mirror gateway, network client, operator credentials |
//! | `hedera-bridge-core` | crate root | parser, attribute tables, cache, harness, dispatcher, tools |
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hedera_bridge::{BridgeConfig, ExecutionContext, VariableDispatcher};
//! use hedera_bridge::transport::MirrorClientFactory;
//!
//! let dispatcher = VariableDispatcher::with_factory(Arc::new(MirrorClientFactory::new()));
//! let ctx = ExecutionContext::new(BridgeConfig::load(None)?);
//! let balance = dispatcher.resolve_value("hedera-account.[0.0.98].hbarBalance", &ctx);
//! ```

pub use hedera_bridge_core::*;
pub use hedera_transport as transport;
pub use hedera_types as types;
pub use hedera_types::{BridgeConfig, Network};
