//! `hedera-topic` attributes over the newest page of `/topics/{id}/messages`,
//! plus the `message[seq]` family over `/topics/{id}/messages/{seq}`.
//!
//! The page is requested with `order=desc`, so element 0 is the latest message.

use crate::coerce::Coercion::*;
use crate::kind::{AttributeSpec as A, EntityDescriptor, EntityKind, FamilySource, FamilyTable, IdSyntax};
use crate::tables::NONE;

pub static TOPIC: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Topic,
    prefix: "hedera-topic",
    path_template: "/topics/{id}/messages?order=desc",
    document_root: None,
    id_syntax: IdSyntax::Entity,
    attributes: ATTRIBUTES,
    families: FAMILIES,
};

const ATTRIBUTES: &[A] = &[
    A::new("messages", "messages", Json),
    A::new("messageCount", "messages", Count),
    A::new("latestMessage", "messages.0.message", Base64),
    A::new("latestSequenceNumber", "messages.0.sequence_number", Text),
];

const MESSAGE_ATTRIBUTES: &[A] = &[
    A::new("messageContent", "message", Base64),
    A::new("rawMessage", "message", Text),
    A::new("consensusTimestamp", "consensus_timestamp", Timestamp),
    A::new("payerAccountId", "payer_account_id", Text),
    A::new("runningHash", "running_hash", Text),
    A::new("runningHashVersion", "running_hash_version", Text),
    A::new("sequenceNumber", "sequence_number", Text),
    A::new("topicId", "topic_id", Text),
    A::new("chunkInfo", "chunk_info", Json).or(NONE),
];

const FAMILIES: &[FamilyTable] = &[FamilyTable {
    marker: "message",
    secondary: IdSyntax::Positive,
    source: FamilySource::Document {
        path_template: "/topics/{id}/messages/{secondary}",
        attributes: MESSAGE_ATTRIBUTES,
    },
}];
