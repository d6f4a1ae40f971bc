//! `hedera-schedule` attributes over `/schedules/{id}`.

use crate::coerce::Coercion::*;
use crate::kind::{AttributeSpec as A, EntityDescriptor, EntityKind, IdSyntax};
use crate::tables::{DOES_NOT_EXIST, NONE};

pub static SCHEDULE: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Schedule,
    prefix: "hedera-schedule",
    path_template: "/schedules/{id}",
    document_root: None,
    id_syntax: IdSyntax::Entity,
    attributes: ATTRIBUTES,
    families: &[],
};

const ATTRIBUTES: &[A] = &[
    A::new("scheduleId", "schedule_id", Text),
    A::new("creatorAccountId", "creator_account_id", Text),
    A::new("payerAccountId", "payer_account_id", Text),
    A::new("scheduleMemo", "memo", Text),
    A::new("isDeleted", "deleted", Bool),
    A::new("waitForExpiry", "wait_for_expiry", Bool),
    A::new("isExecuted", "executed_timestamp", IsSet),
    A::new("consensusTimestamp", "consensus_timestamp", Timestamp),
    A::new("executedTimestamp", "executed_timestamp", Timestamp).or(DOES_NOT_EXIST),
    A::new("expirationTime", "expiration_time", Timestamp).or(DOES_NOT_EXIST),
    A::new("adminKey", "admin_key.key", Text).or(NONE),
    A::new("signatures", "signatures", Json),
    A::new("transactionBody", "transaction_body", Text),
];
