//! Encoding utilities for hex and base64.
//!
//! Mirror node documents carry topic messages, memos and NFT metadata as
//! standard base64; operator keys arrive as hex. These helpers centralise the
//! decoding and the error wording.

use anyhow::{anyhow, Result};
use base64::Engine;

// =============================================================================
// Base64
// =============================================================================

/// Decode base64 into bytes, returning None on failure.
pub fn try_base64_decode(b64: &str) -> Option<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .ok()
}

/// Decode base64 into text. Invalid UTF-8 sequences are replaced, not rejected,
/// since topic messages are arbitrary bytes.
///
/// ```
/// use hedera_types::encoding::base64_to_text;
///
/// assert_eq!(base64_to_text("aGVsbG8=").as_deref(), Some("hello"));
/// assert_eq!(base64_to_text("not base64!"), None);
/// ```
pub fn base64_to_text(b64: &str) -> Option<String> {
    try_base64_decode(b64).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

// =============================================================================
// Hex
// =============================================================================

/// Parse a hex string (with or without `0x`) into raw bytes.
///
/// # Arguments
/// * `hex_str` - Hex string
/// * `context` - Description for error messages
pub fn parse_hex_bytes(hex_str: &str, context: &str) -> Result<Vec<u8>> {
    let trimmed = hex_str.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).map_err(|e| anyhow!("Invalid {} hex: {}", context, e))
}

/// Check whether a string is exactly `len` hex digits after an optional `0x`.
pub fn is_hex_of_len(value: &str, len: usize) -> bool {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    digits.len() == len && digits.chars().all(|c| c.is_ascii_hexdigit())
}
