//! Entity kinds and their static descriptors.
//!
//! Each [`EntityKind`] is bound at compile time to an [`EntityDescriptor`]:
//! variable prefix, REST path template, identifier syntax and attribute table.
//! The descriptors themselves live in [`crate::tables`].

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use hedera_types::{parse_positive, AccountRef, EntityId, TransactionId};
use serde::{Deserialize, Serialize};

use crate::coerce::Coercion;
use crate::tables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Account,
    Token,
    Topic,
    Transaction,
    Schedule,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Account,
        EntityKind::Token,
        EntityKind::Topic,
        EntityKind::Transaction,
        EntityKind::Schedule,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Token => "token",
            EntityKind::Topic => "topic",
            EntityKind::Transaction => "transaction",
            EntityKind::Schedule => "schedule",
        }
    }

    pub fn descriptor(&self) -> &'static EntityDescriptor {
        match self {
            EntityKind::Account => &tables::account::ACCOUNT,
            EntityKind::Token => &tables::token::TOKEN,
            EntityKind::Topic => &tables::topic::TOPIC,
            EntityKind::Transaction => &tables::transaction::TRANSACTION,
            EntityKind::Schedule => &tables::schedule::SCHEDULE,
        }
    }

    /// Variable prefix, e.g. `hedera-account`.
    pub fn prefix(&self) -> &'static str {
        self.descriptor().prefix
    }

    /// The kind whose prefix `path` starts with (followed by `.`).
    pub fn for_path(path: &str) -> Option<EntityKind> {
        Self::ALL.into_iter().find(|kind| {
            path.strip_prefix(kind.prefix())
                .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let name = lower.strip_prefix("hedera-").unwrap_or(&lower);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| {
                anyhow!(
                    "Unknown entity kind '{}'. Expected one of: account, token, topic, transaction, schedule",
                    s
                )
            })
    }
}

// =============================================================================
// Identifier syntax
// =============================================================================

/// Identifier grammar for a bracketed id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSyntax {
    /// `shard.realm.num`
    Entity,
    /// `shard.realm.num` or an EVM address
    Account,
    /// SDK or mirror transaction id
    Transaction,
    /// Positive integer (serial, sequence number)
    Positive,
}

impl IdSyntax {
    /// Validate `raw` and return the canonical form used in REST paths.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match self {
            IdSyntax::Entity => raw.parse::<EntityId>().ok().map(|id| id.to_string()),
            IdSyntax::Account => raw.parse::<AccountRef>().ok().map(|id| id.to_string()),
            IdSyntax::Transaction => raw
                .parse::<TransactionId>()
                .ok()
                .map(|id| id.to_mirror_string()),
            IdSyntax::Positive => parse_positive(raw).map(|n| n.to_string()),
        }
    }
}

// =============================================================================
// Attribute tables
// =============================================================================

/// One attribute: name, JSON field, coercion and optional fallback literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Matched case-insensitively.
    pub name: &'static str,
    /// Dotted path into the entity document.
    pub field: &'static str,
    pub coercion: Coercion,
    /// Rendered when the field is absent or null.
    pub fallback: Option<&'static str>,
}

impl AttributeSpec {
    pub const fn new(name: &'static str, field: &'static str, coercion: Coercion) -> Self {
        Self {
            name,
            field,
            coercion,
            fallback: None,
        }
    }

    pub const fn or(self, fallback: &'static str) -> Self {
        Self {
            fallback: Some(fallback),
            ..self
        }
    }
}

/// Linear scan of a collection in the primary document, keyed by the secondary id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionScan {
    pub collection: &'static str,
    pub key_field: &'static str,
    pub value_field: &'static str,
    pub coercion: Coercion,
    /// Rendered when no element matches.
    pub missing: &'static str,
}

/// Where a composite attribute family reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilySource {
    /// One element of a collection inside the primary document.
    Scan(CollectionScan),
    /// A separate document addressed by both ids.
    Document {
        /// `{id}` and `{secondary}` are substituted.
        path_template: &'static str,
        attributes: &'static [AttributeSpec],
    },
}

/// A two-keyed attribute family, e.g. `message[3].messageContent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyTable {
    /// Matched case-insensitively at the start of the attribute path.
    pub marker: &'static str,
    pub secondary: IdSyntax,
    pub source: FamilySource,
}

/// Everything the generic resolver needs to know about one entity kind.
#[derive(Debug)]
pub struct EntityDescriptor {
    pub kind: EntityKind,
    pub prefix: &'static str,
    /// `{id}` is substituted.
    pub path_template: &'static str,
    /// Dotted path to the entity inside the fetched body, if nested.
    pub document_root: Option<&'static str>,
    pub id_syntax: IdSyntax,
    pub attributes: &'static [AttributeSpec],
    pub families: &'static [FamilyTable],
}

impl EntityDescriptor {
    pub fn rest_path(&self, id: &str) -> String {
        self.path_template.replace("{id}", id)
    }

    pub fn attribute(&self, name: &str) -> Option<&'static AttributeSpec> {
        find_attribute(self.attributes, name)
    }

    pub fn family(&self, marker: &str) -> Option<&'static FamilyTable> {
        self.families
            .iter()
            .find(|family| family.marker.eq_ignore_ascii_case(marker))
    }
}

pub(crate) fn find_attribute(
    table: &'static [AttributeSpec],
    name: &str,
) -> Option<&'static AttributeSpec> {
    table.iter().find(|spec| spec.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_lookup() {
        assert_eq!(
            EntityKind::for_path("hedera-account.[0.0.1].hbarBalance"),
            Some(EntityKind::Account)
        );
        assert_eq!(
            EntityKind::for_path("hedera-transaction.[0.0.1@1.1].result"),
            Some(EntityKind::Transaction)
        );
        assert_eq!(EntityKind::for_path("hedera-accounts.[0.0.1].x"), None);
        assert_eq!(EntityKind::for_path("hedera-nft.[0.0.1].x"), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("token".parse::<EntityKind>().unwrap(), EntityKind::Token);
        assert_eq!("hedera-Schedule".parse::<EntityKind>().unwrap(), EntityKind::Schedule);
        assert!("contract".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_id_syntax() {
        assert_eq!(IdSyntax::Entity.normalize(" 0.0.5 ").as_deref(), Some("0.0.5"));
        assert_eq!(IdSyntax::Entity.normalize(""), None);
        assert_eq!(
            IdSyntax::Transaction.normalize("0.0.2@1700000000.1").as_deref(),
            Some("0.0.2-1700000000-000000001")
        );
        assert_eq!(IdSyntax::Positive.normalize("0"), None);
        assert!(IdSyntax::Account
            .normalize("0x00000000000000000000000000000000000004d2")
            .is_some());
    }

    #[test]
    fn test_every_descriptor_matches_its_kind() {
        for kind in EntityKind::ALL {
            let descriptor = kind.descriptor();
            assert_eq!(descriptor.kind, kind);
            assert_eq!(descriptor.prefix, format!("hedera-{}", kind));
            assert!(descriptor.path_template.contains("{id}"));
        }
    }

    #[test]
    fn test_attribute_names_unique_per_table() {
        for kind in EntityKind::ALL {
            let descriptor = kind.descriptor();
            let mut names: Vec<String> = descriptor
                .attributes
                .iter()
                .map(|spec| spec.name.to_lowercase())
                .collect();
            names.sort();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len(), "duplicate attribute in {}", kind);
        }
    }
}
