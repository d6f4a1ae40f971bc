//! Shared types for the hedera-bridge workspace.
//!
//! This crate holds the foundational pieces every other crate in the workspace
//! needs and that never touch the network:
//!
//! - [`ids`] - entity ids (`shard.realm.num`), transaction ids, serial numbers
//! - [`network`] - ledger network partitions and mirror provider selection
//! - [`config`] - [`BridgeConfig`], layered from file and environment
//! - [`env_utils`] - typed environment variable parsing
//! - [`encoding`] - base64/hex helpers

pub mod config;
pub mod encoding;
pub mod env_utils;
pub mod ids;
pub mod network;

pub use config::BridgeConfig;
pub use env_utils::{env_opt_string, env_var};
pub use ids::{parse_positive, AccountRef, EntityId, TransactionId};
pub use network::{MirrorProvider, Network};
