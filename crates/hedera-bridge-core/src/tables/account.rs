//! `hedera-account` attributes over `/accounts/{id}`.

use crate::coerce::Coercion::*;
use crate::kind::{
    AttributeSpec as A, CollectionScan, EntityDescriptor, EntityKind, FamilySource, FamilyTable,
    IdSyntax,
};
use crate::tables::{BALANCE_NOT_FOUND, DOES_NOT_EXIST};

pub static ACCOUNT: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Account,
    prefix: "hedera-account",
    path_template: "/accounts/{id}",
    document_root: None,
    id_syntax: IdSyntax::Account,
    attributes: ATTRIBUTES,
    families: FAMILIES,
};

const ATTRIBUTES: &[A] = &[
    A::new("accountId", "account", Text),
    A::new("hbarBalance", "balance.balance", Hbar),
    A::new("tinybarBalance", "balance.balance", Text),
    A::new("balanceTimestamp", "balance.timestamp", Timestamp),
    A::new("tokenBalances", "balance.tokens", Json),
    A::new("accountMemo", "memo", Text),
    A::new("alias", "alias", Text).or(DOES_NOT_EXIST),
    A::new("evmAddress", "evm_address", Text).or(DOES_NOT_EXIST),
    A::new("key", "key.key", Text).or(DOES_NOT_EXIST),
    A::new("keyType", "key._type", Text).or(DOES_NOT_EXIST),
    A::new("autoRenewPeriod", "auto_renew_period", Days),
    A::new("createdTimestamp", "created_timestamp", Timestamp),
    A::new("expiryTimestamp", "expiry_timestamp", Timestamp).or(DOES_NOT_EXIST),
    A::new("isDeleted", "deleted", Bool),
    A::new("receiverSigRequired", "receiver_sig_required", Bool).or(DOES_NOT_EXIST),
    A::new("declineReward", "decline_reward", Bool),
    A::new("maxAutomaticTokenAssociations", "max_automatic_token_associations", Text),
    A::new("ethereumNonce", "ethereum_nonce", Text),
    A::new("pendingReward", "pending_reward", Hbar),
    A::new("stakedAccountId", "staked_account_id", Text).or(DOES_NOT_EXIST),
    A::new("stakedNodeId", "staked_node_id", Text).or(DOES_NOT_EXIST),
    A::new("stakePeriodStart", "stake_period_start", Timestamp).or(DOES_NOT_EXIST),
    A::new("recentTransactions", "transactions", Json),
];

const FAMILIES: &[FamilyTable] = &[FamilyTable {
    marker: "tokenBalance",
    secondary: IdSyntax::Entity,
    source: FamilySource::Scan(CollectionScan {
        collection: "balance.tokens",
        key_field: "token_id",
        value_field: "balance",
        coercion: Text,
        missing: BALANCE_NOT_FOUND,
    }),
}];
