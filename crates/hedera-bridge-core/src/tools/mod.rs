//! Transaction-submitting tools.
//!
//! Each tool is a plain input value (deserialisable from the host's step
//! configuration) implementing the harness capabilities:
//!
//! | Tool | Offline precheck | Client precheck |
//! |------|------------------|-----------------|
//! | [`HbarTransferTool`] | ids, positive amount, memo length | none |
//! | [`TokenAssociationTool`] | ids | account already (dis)associated |
//! | [`TokenTransferTool`] | ids, positive amount | token decimals, receiver associated |
//! | [`TopicMessageTool`] | topic id, message size | none |
//! | [`ScheduleSignTool`] | schedule id | schedule executed or deleted |
//!
//! All tools acquire an operator client; a malformed operator credential fails
//! the invocation before any network access.

use std::sync::Arc;

use hedera_transport::{NetworkClient, SubmitReceipt, TransactionRequest};
use hedera_types::{EntityId, Network};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ExecutionContext;
use crate::kind::EntityKind;
use crate::resolver::fetch_entity;

mod hbar_transfer;
mod schedule_sign;
mod token_association;
mod token_transfer;
mod topic_message;

pub use hbar_transfer::HbarTransferTool;
pub use schedule_sign::ScheduleSignTool;
pub use token_association::{AssociationAction, TokenAssociationTool};
pub use token_transfer::TokenTransferTool;
pub use topic_message::{TopicMessageTool, MAX_CHUNKS, MESSAGE_CHUNK_SIZE};

/// What a tool reports back to the host after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub status: String,
    pub network: Network,
    /// Transaction type, e.g. `token_associate`.
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus_timestamp: Option<String>,
}

impl TransactionRecord {
    pub fn from_receipt(receipt: SubmitReceipt, network: Network, request: &TransactionRequest) -> Self {
        Self {
            transaction_id: receipt.transaction_id,
            status: receipt.status,
            network,
            kind: request.kind().to_string(),
            consensus_timestamp: receipt.consensus_timestamp,
        }
    }
}

/// Submit `request` through the client and wrap the receipt.
pub(crate) fn submit(client: &NetworkClient, request: TransactionRequest) -> anyhow::Result<TransactionRecord> {
    let receipt = client.submit(&request)?;
    tracing::info!(
        kind = request.kind(),
        transaction_id = %receipt.transaction_id,
        status = %receipt.status,
        "transaction submitted"
    );
    Ok(TransactionRecord::from_receipt(receipt, client.network(), &request))
}

/// Read an entity document through the request cache.
pub(crate) fn read_entity(
    client: &NetworkClient,
    ctx: &ExecutionContext,
    kind: EntityKind,
    id: &EntityId,
) -> Option<Arc<Value>> {
    fetch_entity(kind.descriptor(), &id.to_string(), None, client.mirror(), &ctx.cache)
}

/// Whether an account document lists `token` among its token balances.
pub(crate) fn holds_token(account: &Value, token: &EntityId) -> bool {
    let token = token.to_string();
    account
        .pointer("/balance/tokens")
        .and_then(Value::as_array)
        .is_some_and(|tokens| {
            tokens
                .iter()
                .any(|entry| entry.get("token_id").and_then(Value::as_str) == Some(token.as_str()))
        })
}

fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid {}", raw.trim(), what))
}
