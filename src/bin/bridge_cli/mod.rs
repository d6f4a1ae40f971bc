//! CLI subcommand implementations for hedera-bridge

pub mod config;
pub mod load;
pub mod output;
pub mod resolve;
pub mod substitute;

use std::sync::Arc;

use hedera_bridge::transport::MirrorClientFactory;
use hedera_bridge::VariableDispatcher;

/// Dispatcher backed by the live mirror node. The CLI only reads, so no
/// transaction submitter is wired in.
pub fn mirror_dispatcher() -> VariableDispatcher {
    VariableDispatcher::with_factory(Arc::new(MirrorClientFactory::new()))
}
