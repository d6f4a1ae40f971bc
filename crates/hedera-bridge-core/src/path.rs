//! Entity Reference Parser.
//!
//! Splits a variable path into its identifiers and attribute:
//!
//! ```text
//! hedera-topic.[0.0.777].message[5].messageContent
//! └─ prefix ──┘ └primary┘ └marker┘└┘ └ attribute ─┘
//!                                 secondary
//! ```
//!
//! Anything that does not fit the kind's grammar is a SoftMiss: the same text
//! is tried against every prefix, so a non-match must never be an error.

use std::fmt;

use crate::error::BridgeError;
use crate::kind::{EntityKind, FamilySource, FamilyTable};

/// Secondary identifier of a composite attribute family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryId {
    /// Canonical marker spelling from the kind's family table.
    pub marker: &'static str,
    pub id: String,
}

/// A parsed variable path. Identifiers are in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityReference {
    pub kind: EntityKind,
    pub primary: String,
    pub secondary: Option<SecondaryId>,
    /// Residual attribute path; empty for scan families such as `tokenBalance[...]`.
    pub attribute: String,
}

impl EntityReference {
    /// Parse `raw` as a path of `kind`.
    pub fn parse(kind: EntityKind, raw: &str) -> Result<Self, BridgeError> {
        let descriptor = kind.descriptor();
        let raw = raw.trim();
        let rest = raw
            .strip_prefix(descriptor.prefix)
            .and_then(|r| r.strip_prefix('.'))
            .ok_or_else(|| miss(raw, "prefix does not match"))?;

        let (primary_raw, residual) = split_bracket(rest).ok_or_else(|| miss(raw, "no [id] bracket"))?;
        let primary = descriptor
            .id_syntax
            .normalize(primary_raw)
            .ok_or_else(|| miss(raw, "malformed primary identifier"))?;

        let residual = residual.strip_prefix('.').unwrap_or(residual);
        if residual.is_empty() {
            return Err(miss(raw, "no attribute"));
        }

        let Some(family) = composite_family(kind, residual) else {
            return Ok(Self {
                kind,
                primary,
                secondary: None,
                attribute: residual.to_string(),
            });
        };

        // The secondary bracket is the last one in the path and must follow the marker.
        let open = residual.rfind('[').ok_or_else(|| miss(raw, "no secondary bracket"))?;
        let between = &residual[family.marker.len()..open];
        if !(between.is_empty() || between == ".") {
            return Err(miss(raw, "secondary bracket does not follow its marker"));
        }
        let (secondary_raw, tail) =
            split_bracket(&residual[open..]).ok_or_else(|| miss(raw, "unterminated secondary bracket"))?;
        let secondary = family
            .secondary
            .normalize(secondary_raw)
            .ok_or_else(|| miss(raw, "malformed secondary identifier"))?;

        let attribute = tail.strip_prefix('.').unwrap_or(tail);
        if attribute.is_empty() && matches!(family.source, FamilySource::Document { .. }) {
            return Err(miss(raw, "no attribute after secondary identifier"));
        }

        Ok(Self {
            kind,
            primary,
            secondary: Some(SecondaryId {
                marker: family.marker,
                id: secondary,
            }),
            attribute: attribute.to_string(),
        })
    }

    /// Parse a path of any kind, selecting the kind by prefix.
    pub fn parse_any(raw: &str) -> Result<Self, BridgeError> {
        let kind = EntityKind::for_path(raw.trim())
            .ok_or_else(|| miss(raw, "unknown prefix"))?;
        Self::parse(kind, raw)
    }

    pub fn family(&self) -> Option<&'static FamilyTable> {
        let secondary = self.secondary.as_ref()?;
        self.kind.descriptor().family(secondary.marker)
    }

    /// Serialise back to a variable path.
    pub fn to_path(&self) -> String {
        let mut path = format!("{}.[{}]", self.kind.prefix(), self.primary);
        if let Some(secondary) = &self.secondary {
            path.push('.');
            path.push_str(secondary.marker);
            path.push('[');
            path.push_str(&secondary.id);
            path.push(']');
        }
        if !self.attribute.is_empty() {
            path.push('.');
            path.push_str(&self.attribute);
        }
        path
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn miss(raw: &str, reason: &str) -> BridgeError {
    BridgeError::soft_miss(format!("{}: '{}'", reason, raw))
}

/// `"[id]rest"` → `("id", "rest")`. The input must start with `[`.
fn split_bracket(input: &str) -> Option<(&str, &str)> {
    let inner = input.strip_prefix('[')?;
    let close = inner.find(']')?;
    let id = &inner[..close];
    if id.contains('[') {
        return None;
    }
    Some((id, &inner[close + 1..]))
}

/// The family whose marker starts `residual`, followed by `[` or `.[`.
fn composite_family(kind: EntityKind, residual: &str) -> Option<&'static FamilyTable> {
    kind.descriptor().families.iter().find(|family| {
        residual
            .get(..family.marker.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(family.marker))
            && {
                let after = &residual[family.marker.len()..];
                after.starts_with('[') || after.starts_with(".[")
            }
    })
}
