//! Operator credential parsing.
//!
//! Transaction tools act on behalf of an operator account. The host stores the
//! operator's account id and either a private key (raw or DER-encoded hex) or a
//! BIP-39 style mnemonic. This module only checks the *shape* of that input so
//! that a malformed credential is rejected before any network access; key
//! derivation and signing belong to the ledger SDK behind
//! [`TransactionSubmitter`](crate::client::TransactionSubmitter).

use std::fmt;

use hedera_types::encoding::parse_hex_bytes;
use hedera_types::EntityId;

/// DER prefix of a PKCS#8 Ed25519 private key (followed by 32 key bytes).
const ED25519_DER_PREFIX: &str = "302e020100300506032b657004220420";
/// DER prefix of a secp256k1 private key (followed by 32 key bytes).
const ECDSA_DER_PREFIX: &str = "3030020100300706052b8104000a04220420";

const RAW_KEY_LEN: usize = 32;
const MNEMONIC_WORD_COUNTS: [usize; 2] = [12, 24];

/// Why a credential could not be parsed. Never contains key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialError {
    pub reason: String,
}

impl CredentialError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed operator credential: {}", self.reason)
    }
}

impl std::error::Error for CredentialError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Ed25519,
    EcdsaSecp256k1,
}

#[derive(Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    PrivateKey {
        algorithm: KeyAlgorithm,
        bytes: Vec<u8>,
    },
    Mnemonic(Vec<String>),
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::PrivateKey { algorithm, .. } => f
                .debug_struct("PrivateKey")
                .field("algorithm", algorithm)
                .field("bytes", &"<redacted>")
                .finish(),
            KeyMaterial::Mnemonic(words) => write!(f, "Mnemonic(<{} words redacted>)", words.len()),
        }
    }
}

impl KeyMaterial {
    /// Parse a private key (raw 32-byte hex, or DER hex) or a 12/24-word mnemonic.
    ///
    /// Raw 32-byte keys are taken as Ed25519, the ledger's default key type.
    pub fn parse(input: &str) -> Result<Self, CredentialError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CredentialError::new("operator key is empty"));
        }

        if input.split_whitespace().count() > 1 {
            return Self::parse_mnemonic(input);
        }

        let lower = input.to_lowercase();
        let hex = lower.strip_prefix("0x").unwrap_or(&lower);
        let bytes = parse_hex_bytes(hex, "operator key")
            .map_err(|_| CredentialError::new("operator key is not valid hex"))?;

        if let Some(key) = hex.strip_prefix(ED25519_DER_PREFIX) {
            return Self::from_der_body(KeyAlgorithm::Ed25519, key.len() / 2, &bytes);
        }
        if let Some(key) = hex.strip_prefix(ECDSA_DER_PREFIX) {
            return Self::from_der_body(KeyAlgorithm::EcdsaSecp256k1, key.len() / 2, &bytes);
        }
        if bytes.len() == RAW_KEY_LEN {
            return Ok(KeyMaterial::PrivateKey {
                algorithm: KeyAlgorithm::Ed25519,
                bytes,
            });
        }
        Err(CredentialError::new(format!(
            "operator key has {} bytes; expected a 32-byte key or a DER-encoded key",
            bytes.len()
        )))
    }

    fn from_der_body(
        algorithm: KeyAlgorithm,
        body_len: usize,
        der: &[u8],
    ) -> Result<Self, CredentialError> {
        if body_len != RAW_KEY_LEN {
            return Err(CredentialError::new(format!(
                "DER-encoded {:?} key body has {} bytes; expected {}",
                algorithm, body_len, RAW_KEY_LEN
            )));
        }
        Ok(KeyMaterial::PrivateKey {
            algorithm,
            bytes: der[der.len() - RAW_KEY_LEN..].to_vec(),
        })
    }

    fn parse_mnemonic(input: &str) -> Result<Self, CredentialError> {
        let words: Vec<String> = input.split_whitespace().map(str::to_lowercase).collect();
        if !MNEMONIC_WORD_COUNTS.contains(&words.len()) {
            return Err(CredentialError::new(format!(
                "mnemonic has {} words; expected 12 or 24",
                words.len()
            )));
        }
        if let Some(position) = words
            .iter()
            .position(|w| !w.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(CredentialError::new(format!(
                "mnemonic word {} contains non-alphabetic characters",
                position + 1
            )));
        }
        Ok(KeyMaterial::Mnemonic(words))
    }
}

/// Operator account plus key material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorCredential {
    pub account: EntityId,
    pub key: KeyMaterial,
}

impl OperatorCredential {
    pub fn parse(account: &str, key: &str) -> Result<Self, CredentialError> {
        let account = account
            .parse::<EntityId>()
            .map_err(|_| CredentialError::new(format!("operator id '{}' is not shard.realm.num", account.trim())))?;
        Ok(Self {
            account,
            key: KeyMaterial::parse(key)?,
        })
    }

    /// Parse from optional configured values; a missing half is a credential error.
    pub fn from_parts(account: Option<&str>, key: Option<&str>) -> Result<Self, CredentialError> {
        match (account, key) {
            (Some(account), Some(key)) => Self::parse(account, key),
            (None, _) => Err(CredentialError::new("operator id is not configured")),
            (_, None) => Err(CredentialError::new("operator key is not configured")),
        }
    }
}
