//! Value coercions from mirror JSON fields to display strings.
//!
//! Amounts are rendered with exact integer arithmetic; no floating point is
//! involved anywhere between the atomic amount and the displayed string.

use chrono::{Local, TimeZone};
use hedera_types::encoding::base64_to_text;
use serde_json::Value;

/// Tinybars per hbar.
pub const HBAR_DECIMALS: u32 = 8;

/// Largest decimal scale accepted for rendering or parsing amounts.
pub const MAX_DECIMALS: u32 = 32;

const SECONDS_PER_DAY: u64 = 86_400;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How a raw JSON field becomes an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Strings verbatim, scalars via their JSON rendering.
    Text,
    /// `true` / `false`.
    Bool,
    /// Tinybars to hbar.
    Hbar,
    /// Atomic units scaled by the document's own `decimals` field.
    Scaled,
    /// `seconds.nanos` string to local date-time.
    Timestamp,
    /// Epoch nanoseconds to local date-time.
    Nanos,
    /// Duration in seconds to whole days.
    Days,
    /// Base64 payload decoded to text.
    Base64,
    /// Literal JSON serialisation.
    Json,
    /// Length of an array.
    Count,
    /// Whether the field is set (non-null).
    IsSet,
}

impl Coercion {
    /// Apply to `value`, a field read from `document`.
    ///
    /// Returns `None` when the value cannot be coerced; the caller decides
    /// between a fallback literal and null.
    pub fn apply(&self, value: &Value, document: &Value) -> Option<String> {
        match self {
            Coercion::IsSet => Some((!value.is_null()).to_string()),
            _ if value.is_null() => None,
            Coercion::Text => render_text(value),
            Coercion::Bool => match value {
                Value::Bool(b) => Some(b.to_string()),
                Value::String(s) if s == "true" || s == "false" => Some(s.clone()),
                _ => None,
            },
            Coercion::Hbar => format_scaled(&raw_integer(value)?, HBAR_DECIMALS),
            Coercion::Scaled => {
                let decimals = token_decimals(document)?;
                format_scaled(&raw_integer(value)?, decimals)
            }
            Coercion::Timestamp => format_timestamp(value.as_str()?),
            Coercion::Nanos => format_nanos(&raw_integer(value)?),
            Coercion::Days => format_days(&raw_integer(value)?),
            Coercion::Base64 => base64_to_text(value.as_str()?),
            Coercion::Json => serde_json::to_string(value).ok(),
            Coercion::Count => value.as_array().map(|items| items.len().to_string()),
        }
    }
}

fn render_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => serde_json::to_string(other).ok(),
    }
}

/// Integer amounts arrive either as JSON numbers or numeric strings.
fn raw_integer(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        Value::String(s) => {
            let digits = s.strip_prefix('-').unwrap_or(s);
            (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then(|| s.clone())
        }
        _ => None,
    }
}

/// The `decimals` field of a token document, as a number or numeric string.
/// Scales above [`MAX_DECIMALS`] are treated as absent.
pub fn token_decimals(document: &Value) -> Option<u32> {
    let decimals = match document.get("decimals")? {
        Value::Number(n) => n.as_u64().and_then(|d| u32::try_from(d).ok())?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (decimals <= MAX_DECIMALS).then_some(decimals)
}

/// Look up a dotted path. Numeric segments index arrays.
pub fn field_at<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(document);
    }
    path.split('.').try_fold(document, |current, segment| match current {
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        Value::Object(map) => map.get(segment),
        _ => None,
    })
}

// =============================================================================
// Amounts
// =============================================================================

/// Render an integer atomic amount divided by `10^decimals`.
///
/// ```
/// use hedera_bridge_core::coerce::format_scaled;
///
/// assert_eq!(format_scaled("250000000", 8).as_deref(), Some("2.5"));
/// assert_eq!(format_scaled("1234", 2).as_deref(), Some("12.34"));
/// assert_eq!(format_scaled("-5", 2).as_deref(), Some("-0.05"));
/// ```
///
/// Returns `None` when `decimals` exceeds [`MAX_DECIMALS`].
pub fn format_scaled(raw: &str, decimals: u32) -> Option<String> {
    if decimals > MAX_DECIMALS {
        return None;
    }
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = digits.trim_start_matches('0');
    let decimals = decimals as usize;
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    let mut rendered = whole.to_string();
    if !fraction.is_empty() {
        rendered.push('.');
        rendered.push_str(fraction);
    }
    if negative && rendered != "0" {
        rendered.insert(0, '-');
    }
    Some(rendered)
}

/// Parse a non-negative decimal display amount into atomic units.
///
/// Rejects more fractional digits than `decimals` allows, signs, exponents
/// and values that overflow `i64`.
pub fn parse_scaled(amount: &str, decimals: u32) -> Result<i64, String> {
    if decimals > MAX_DECIMALS {
        return Err(format!("{} decimal places is not a supported scale", decimals));
    }
    let amount = amount.trim();
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(format!("'{}' is not a decimal amount", amount));
    }
    if fraction.len() > decimals as usize {
        return Err(format!(
            "'{}' has {} decimal places; at most {} allowed",
            amount,
            fraction.len(),
            decimals
        ));
    }

    let atomic = format!("{}{:0<width$}", whole, fraction, width = decimals as usize);
    let atomic = atomic.trim_start_matches('0');
    if atomic.is_empty() {
        return Ok(0);
    }
    atomic
        .parse::<i64>()
        .map_err(|_| format!("'{}' is too large", amount))
}

/// Whether `amount` is a plain decimal (digits, at most one `.`) greater than zero.
pub fn is_positive_decimal(amount: &str) -> bool {
    let amount = amount.trim();
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    digits(whole) && digits(fraction) && amount.bytes().any(|b| (b'1'..=b'9').contains(&b))
}

// =============================================================================
// Time
// =============================================================================

/// `"1700000000.123456789"` to local `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(raw: &str) -> Option<String> {
    let (seconds, fraction) = raw.trim().split_once('.').unwrap_or((raw.trim(), ""));
    let seconds: i64 = seconds.parse().ok()?;
    let nanos = if fraction.is_empty() {
        0
    } else {
        let fraction: String = fraction.chars().take(9).collect();
        format!("{:0<9}", fraction).parse().ok()?
    };
    render_local(seconds, nanos)
}

/// Epoch nanoseconds to local `YYYY-MM-DD HH:MM:SS`.
pub fn format_nanos(raw: &str) -> Option<String> {
    let nanos: u128 = raw.trim().parse().ok()?;
    let seconds = i64::try_from(nanos / NANOS_PER_SECOND).ok()?;
    render_local(seconds, (nanos % NANOS_PER_SECOND) as u32)
}

fn render_local(seconds: i64, nanos: u32) -> Option<String> {
    Local
        .timestamp_opt(seconds, nanos)
        .single()
        .map(|dt| dt.format(DATE_TIME_FORMAT).to_string())
}

/// Duration in seconds to whole days.
pub fn format_days(raw: &str) -> Option<String> {
    let seconds: u64 = raw.trim().parse().ok()?;
    Some((seconds / SECONDS_PER_DAY).to_string())
}
