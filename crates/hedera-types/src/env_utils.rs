//! Environment variable parsing utilities.
//!
//! The bridge reads its network, operator and mirror settings from `HEDERA_*`
//! environment variables. These helpers keep that parsing typed and quiet:
//! a variable that is unset, blank or unparsable behaves as if it were absent.
//!
//! # Example
//!
//! ```
//! use hedera_types::env_utils::{env_opt_string, env_var};
//!
//! let timeout: u64 = env_var("HEDERA_MIRROR_TIMEOUT_SECS").unwrap_or(30);
//! let operator: Option<String> = env_opt_string("HEDERA_OPERATOR_ID");
//! # let _ = (timeout, operator);
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed. Surrounding
/// whitespace is ignored.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Get an environment variable as a trimmed string, treating blank values as unset.
///
/// Secrets such as `HEDERA_OPERATOR_KEY` are commonly exported as empty strings
/// by deployment tooling; those must not count as configured.
pub fn env_opt_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
