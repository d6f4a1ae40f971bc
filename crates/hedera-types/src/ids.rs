//! Ledger identifier parsing.
//!
//! | Identifier | Accepted forms |
//! |------------|----------------|
//! | [`EntityId`] | `shard.realm.num` |
//! | [`AccountRef`] | an [`EntityId`] or a 40-hex-digit EVM address |
//! | [`TransactionId`] | `0.0.1234@1700000000.000000123` or `0.0.1234-1700000000-000000123` |
//! | serial / sequence number | positive decimal integer |
//!
//! Parsing is strict: anything that does not match is rejected, which is what
//! lets the variable dispatcher treat a bad identifier as "not mine".

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

use crate::encoding::is_hex_of_len;

// =============================================================================
// EntityId
// =============================================================================

/// A ledger entity id (`shard.realm.num`) for accounts, tokens, topics and schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    pub shard: u64,
    pub realm: u64,
    pub num: u64,
}

impl EntityId {
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }
}

fn parse_digits(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for EntityId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut parts = s.split('.');
        let (Some(shard), Some(realm), Some(num), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            bail!("Invalid entity id '{}': expected shard.realm.num", s);
        };
        match (parse_digits(shard), parse_digits(realm), parse_digits(num)) {
            (Some(shard), Some(realm), Some(num)) => Ok(Self { shard, realm, num }),
            _ => Err(anyhow!("Invalid entity id '{}': components must be digits", s)),
        }
    }
}

impl TryFrom<String> for EntityId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
    }
}

// =============================================================================
// AccountRef
// =============================================================================

/// An account reference: either a native entity id or an EVM address.
///
/// The mirror node accepts both in `/accounts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccountRef {
    Id(EntityId),
    /// Lowercase, `0x`-prefixed, 40 hex digits.
    Evm(String),
}

impl AccountRef {
    pub fn entity_id(&self) -> Option<EntityId> {
        match self {
            AccountRef::Id(id) => Some(*id),
            AccountRef::Evm(_) => None,
        }
    }
}

impl FromStr for AccountRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if is_hex_of_len(s, 40) {
            let digits = s
                .strip_prefix("0x")
                .or_else(|| s.strip_prefix("0X"))
                .unwrap_or(s);
            return Ok(AccountRef::Evm(format!("0x{}", digits.to_lowercase())));
        }
        s.parse::<EntityId>()
            .map(AccountRef::Id)
            .map_err(|_| anyhow!("Invalid account '{}': expected shard.realm.num or EVM address", s))
    }
}

impl Serialize for AccountRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRef::Id(id) => write!(f, "{}", id),
            AccountRef::Evm(addr) => f.write_str(addr),
        }
    }
}

// =============================================================================
// TransactionId
// =============================================================================

/// A transaction id: payer account plus valid-start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId {
    pub payer: EntityId,
    pub seconds: u64,
    pub nanos: u32,
}

impl TransactionId {
    /// The dash-separated form used in mirror node REST paths.
    ///
    /// ```
    /// use hedera_types::TransactionId;
    ///
    /// let id: TransactionId = "0.0.2@1700000000.5".parse().unwrap();
    /// assert_eq!(id.to_mirror_string(), "0.0.2-1700000000-000000005");
    /// ```
    pub fn to_mirror_string(&self) -> String {
        format!("{}-{}-{:09}", self.payer, self.seconds, self.nanos)
    }

    /// The `@`-separated form used by ledger SDKs.
    pub fn to_sdk_string(&self) -> String {
        format!("{}@{}.{:09}", self.payer, self.seconds, self.nanos)
    }
}

fn parse_nanos(part: &str) -> Option<u32> {
    let nanos = parse_digits(part)?;
    (nanos < 1_000_000_000).then_some(nanos as u32)
}

impl FromStr for TransactionId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || anyhow!("Invalid transaction id '{}'", s);

        if let Some((payer, valid_start)) = s.split_once('@') {
            let (seconds, nanos) = valid_start.split_once('.').ok_or_else(invalid)?;
            return Ok(Self {
                payer: payer.parse().map_err(|_| invalid())?,
                seconds: parse_digits(seconds).ok_or_else(invalid)?,
                nanos: parse_nanos(nanos).ok_or_else(invalid)?,
            });
        }

        let mut parts = s.split('-');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(payer), Some(seconds), Some(nanos), None) => Ok(Self {
                payer: payer.parse().map_err(|_| invalid())?,
                seconds: parse_digits(seconds).ok_or_else(invalid)?,
                nanos: parse_nanos(nanos).ok_or_else(invalid)?,
            }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sdk_string())
    }
}

// =============================================================================
// Serial / sequence numbers
// =============================================================================

/// Parse a strictly positive decimal integer (NFT serials, topic sequence numbers).
pub fn parse_positive(s: &str) -> Option<u64> {
    parse_digits(s.trim()).filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_parse_and_display() {
        let id: EntityId = "0.0.1234".parse().unwrap();
        assert_eq!(id, EntityId::new(0, 0, 1234));
        assert_eq!(id.to_string(), "0.0.1234");
    }

    #[test]
    fn test_entity_id_rejects_malformed() {
        for bad in ["", "0.0", "0.0.1.2", "0.0.x", "0..1", "-1.0.1", "0.0.+1", "[0.0.1]"] {
            assert!(bad.parse::<EntityId>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_entity_id_serde_as_string() {
        let id = EntityId::new(0, 0, 98);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0.0.98\"");
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_account_ref_accepts_evm_address() {
        let evm: AccountRef = "0x00000000000000000000000000000000000004D2".parse().unwrap();
        assert_eq!(
            evm,
            AccountRef::Evm("0x00000000000000000000000000000000000004d2".to_string())
        );
        assert_eq!(evm.entity_id(), None);

        let native: AccountRef = "0.0.7".parse().unwrap();
        assert_eq!(native.entity_id(), Some(EntityId::new(0, 0, 7)));
    }

    #[test]
    fn test_transaction_id_both_forms() {
        let sdk: TransactionId = "0.0.1234@1700000000.123456789".parse().unwrap();
        let mirror: TransactionId = "0.0.1234-1700000000-123456789".parse().unwrap();
        assert_eq!(sdk, mirror);
        assert_eq!(sdk.to_mirror_string(), "0.0.1234-1700000000-123456789");
        assert_eq!(mirror.to_sdk_string(), "0.0.1234@1700000000.123456789");
    }

    #[test]
    fn test_transaction_id_rejects_malformed() {
        for bad in [
            "0.0.1234",
            "0.0.1234@1700000000",
            "0.0.1234-1700000000",
            "0.0.1234@abc.1",
            "0.0.1234@1.1000000000",
        ] {
            assert!(bad.parse::<TransactionId>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("5"), Some(5));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-3"), None);
        assert_eq!(parse_positive(""), None);
    }
}
