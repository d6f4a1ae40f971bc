//! `hedera-transaction` attributes over `/transactions/{id}`.
//!
//! The mirror returns `{"transactions": [...]}`; attributes read the first entry.

use crate::coerce::Coercion::*;
use crate::kind::{AttributeSpec as A, EntityDescriptor, EntityKind, IdSyntax};
use crate::tables::NONE;

pub static TRANSACTION: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Transaction,
    prefix: "hedera-transaction",
    path_template: "/transactions/{id}",
    document_root: Some("transactions.0"),
    id_syntax: IdSyntax::Transaction,
    attributes: ATTRIBUTES,
    families: &[],
};

const ATTRIBUTES: &[A] = &[
    A::new("transactionId", "transaction_id", Text),
    A::new("result", "result", Text),
    A::new("type", "name", Text),
    A::new("node", "node", Text),
    A::new("transactionHash", "transaction_hash", Text),
    A::new("nonce", "nonce", Text),
    A::new("entityId", "entity_id", Text).or(NONE),
    A::new("consensusTimestamp", "consensus_timestamp", Timestamp),
    A::new("validStartTimestamp", "valid_start_timestamp", Timestamp),
    A::new("parentConsensusTimestamp", "parent_consensus_timestamp", Timestamp).or(NONE),
    A::new("chargedTxFee", "charged_tx_fee", Hbar),
    A::new("maxFee", "max_fee", Hbar),
    A::new("memo", "memo_base64", Base64).or(NONE),
    A::new("scheduled", "scheduled", Bool),
    A::new("validDurationSeconds", "valid_duration_seconds", Text),
    A::new("transfers", "transfers", Json).or(NONE),
    A::new("tokenTransfers", "token_transfers", Json).or(NONE),
    A::new("nftTransfers", "nft_transfers", Json).or(NONE),
    A::new("stakingRewardTransfers", "staking_reward_transfers", Json).or(NONE),
];
