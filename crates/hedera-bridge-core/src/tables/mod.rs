//! Attribute resolver tables, one per entity kind.
//!
//! Tables are plain data: the generic resolver in [`crate::resolver`] walks
//! them. Adding an attribute means adding one [`AttributeSpec`] line.
//!
//! [`AttributeSpec`]: crate::kind::AttributeSpec

use serde_json::Value;

pub mod account;
pub mod schedule;
pub mod token;
pub mod topic;
pub mod transaction;

/// Fallback for nullable account and schedule fields.
pub const DOES_NOT_EXIST: &str = "Does Not Exist";
/// Fallback for nullable token, topic and transaction fields.
pub const NONE: &str = "none";
/// Result of a token balance scan with no matching token.
pub const BALANCE_NOT_FOUND: &str = "Balance Not Found";

/// Top-level key of the mirror node's error envelope.
const STATUS_KEY: &str = "_status";

/// Whether a fetched document is the mirror's structured "not found" payload,
/// e.g. `{"_status": {"messages": [{"message": "Not found"}]}}`.
pub fn is_not_found(document: &Value) -> bool {
    document.get(STATUS_KEY).is_some()
}
