//! Failure taxonomy shared by every resolver, loader and tool.
//!
//! | Kind | Recovered locally | Log level |
//! |------|-------------------|-----------|
//! | `SoftMiss` | yes, "no match" sentinel | debug |
//! | `DataUnavailable` | yes, fallback literal or null | warn |
//! | `Timeout` | no | error |
//! | `PrecheckRejected` | no | error |
//! | `MalformedCredential` | no | error |
//! | `Unclassified` | no | error |

use std::time::Duration;

use hedera_transport::{CredentialError, PrecheckStatus, TimeoutError};
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Coarse classification of a [`BridgeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SoftMiss,
    DataUnavailable,
    Timeout,
    PrecheckRejected,
    MalformedCredential,
    Unclassified,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SoftMiss => "soft_miss",
            ErrorKind::DataUnavailable => "data_unavailable",
            ErrorKind::Timeout => "timeout",
            ErrorKind::PrecheckRejected => "precheck_rejected",
            ErrorKind::MalformedCredential => "malformed_credential",
            ErrorKind::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure of one harness invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Input does not belong to this plugin, or failed its offline precheck.
    SoftMiss { reason: String },

    /// Remote document missing or unreachable.
    DataUnavailable {
        /// REST path that was requested
        path: String,
        reason: String,
    },

    /// A network call exceeded its deadline.
    Timeout {
        operation: String,
        after: Option<Duration>,
    },

    /// The ledger rejected the transaction before execution.
    PrecheckRejected {
        status: String,
        transaction_id: Option<String>,
    },

    /// Operator key or mnemonic could not be parsed.
    MalformedCredential { reason: String },

    /// Anything else; `message` carries the full error chain.
    Unclassified { message: String },
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeError::SoftMiss { reason } => write!(f, "No match: {}", reason),
            BridgeError::DataUnavailable { path, reason } => {
                write!(f, "Data unavailable for {}: {}", path, reason)
            }
            BridgeError::Timeout { operation, after } => {
                write!(f, "Timeout: {}", operation)?;
                if let Some(after) = after {
                    write!(f, " after {:?}", after)?;
                }
                Ok(())
            }
            BridgeError::PrecheckRejected {
                status,
                transaction_id,
            } => {
                write!(f, "PRECHECK_REJECTED: {}", status)?;
                if let Some(id) = transaction_id {
                    write!(f, " (transaction {})", id)?;
                }
                Ok(())
            }
            BridgeError::MalformedCredential { reason } => {
                write!(f, "Malformed operator credential: {}", reason)
            }
            BridgeError::Unclassified { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for BridgeError {}

impl BridgeError {
    pub fn soft_miss(reason: impl Into<String>) -> Self {
        BridgeError::SoftMiss {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::SoftMiss { .. } => ErrorKind::SoftMiss,
            BridgeError::DataUnavailable { .. } => ErrorKind::DataUnavailable,
            BridgeError::Timeout { .. } => ErrorKind::Timeout,
            BridgeError::PrecheckRejected { .. } => ErrorKind::PrecheckRejected,
            BridgeError::MalformedCredential { .. } => ErrorKind::MalformedCredential,
            BridgeError::Unclassified { .. } => ErrorKind::Unclassified,
        }
    }

    /// SoftMiss and DataUnavailable produce a sentinel result instead of a failed invocation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BridgeError::SoftMiss { .. } | BridgeError::DataUnavailable { .. }
        )
    }

    /// Emit one log line at the level the taxonomy assigns to this kind.
    pub fn log(&self, request_id: Uuid, plugin: &str) {
        let kind = self.kind().as_str();
        match self.kind() {
            ErrorKind::SoftMiss => {
                debug!(%request_id, plugin, kind, error = %self, "invocation skipped")
            }
            ErrorKind::DataUnavailable => {
                warn!(%request_id, plugin, kind, error = %self, "data unavailable")
            }
            _ => error!(%request_id, plugin, kind, error = %self, "invocation failed"),
        }
    }
}

/// Map an error raised anywhere below the harness onto the taxonomy.
///
/// The whole chain is searched, so context layers added with
/// `anyhow::Context` do not hide the typed cause.
pub fn classify(err: &anyhow::Error) -> BridgeError {
    for cause in err.chain() {
        if let Some(bridge) = cause.downcast_ref::<BridgeError>() {
            return bridge.clone();
        }
        if let Some(timeout) = cause.downcast_ref::<TimeoutError>() {
            return BridgeError::Timeout {
                operation: timeout.operation.clone(),
                after: Some(timeout.after),
            };
        }
        if let Some(precheck) = cause.downcast_ref::<PrecheckStatus>() {
            return BridgeError::PrecheckRejected {
                status: precheck.status.clone(),
                transaction_id: precheck.transaction_id.clone(),
            };
        }
        if let Some(credential) = cause.downcast_ref::<CredentialError>() {
            return BridgeError::MalformedCredential {
                reason: credential.reason.clone(),
            };
        }
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                return BridgeError::Timeout {
                    operation: err.to_string(),
                    after: None,
                };
            }
        }
    }
    BridgeError::Unclassified {
        message: format!("{:#}", err),
    }
}
