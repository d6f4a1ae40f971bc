//! Network client seam.
//!
//! A [`NetworkClient`] is the session one harness invocation works with: a
//! mirror [`DocumentSource`] for reads plus, for transaction tools, an
//! operator credential and a [`TransactionSubmitter`] (the wrapped ledger SDK).
//!
//! ## Ownership
//!
//! ```text
//! ClientFactory::acquire ──► NetworkClient ──► (invocation body) ──► release()
//!                                 │                                     ▲
//!                                 └──────────── Drop ───────────────────┘
//! ```
//!
//! A client is owned by exactly one invocation and is released exactly once:
//! explicitly via [`NetworkClient::release`], or by `Drop` on any early exit
//! or unwind. Releasing twice is a no-op.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use hedera_types::{AccountRef, BridgeConfig, EntityId, Network};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credential::OperatorCredential;
use crate::mirror::{DocumentSource, MirrorGateway};

// =============================================================================
// Errors raised across the seam
// =============================================================================

/// The network rejected a transaction before executing it.
///
/// Submitters return this (inside `anyhow::Error`) so the harness can classify
/// the failure without knowing the SDK's own error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecheckStatus {
    /// Ledger status code, e.g. `INSUFFICIENT_PAYER_BALANCE`.
    pub status: String,
    pub transaction_id: Option<String>,
}

impl fmt::Display for PrecheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transaction rejected at precheck: {}", self.status)?;
        if let Some(id) = &self.transaction_id {
            write!(f, " ({})", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for PrecheckStatus {}

/// A network call exceeded its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutError {
    pub operation: String,
    pub after: Duration,
}

impl fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} timed out after {:?}", self.operation, self.after)
    }
}

impl std::error::Error for TimeoutError {}

// =============================================================================
// Transactions
// =============================================================================

/// A ledger write, described independently of any SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionRequest {
    HbarTransfer {
        sender: EntityId,
        receiver: AccountRef,
        tinybars: i64,
        memo: Option<String>,
    },
    TokenAssociate {
        account: EntityId,
        token: EntityId,
    },
    TokenDissociate {
        account: EntityId,
        token: EntityId,
    },
    TokenTransfer {
        token: EntityId,
        sender: EntityId,
        receiver: EntityId,
        /// Atomic units.
        amount: i64,
        decimals: u32,
    },
    TopicMessageSubmit {
        topic: EntityId,
        message: Vec<u8>,
        chunk_size: usize,
    },
    ScheduleSign {
        schedule: EntityId,
    },
}

impl TransactionRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            TransactionRequest::HbarTransfer { .. } => "hbar_transfer",
            TransactionRequest::TokenAssociate { .. } => "token_associate",
            TransactionRequest::TokenDissociate { .. } => "token_dissociate",
            TransactionRequest::TokenTransfer { .. } => "token_transfer",
            TransactionRequest::TopicMessageSubmit { .. } => "topic_message_submit",
            TransactionRequest::ScheduleSign { .. } => "schedule_sign",
        }
    }
}

/// What the submitter reports back after the network reached consensus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub transaction_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus_timestamp: Option<String>,
}

/// The ledger SDK: builds, signs and submits transactions.
pub trait TransactionSubmitter {
    fn submit(
        &self,
        operator: &OperatorCredential,
        request: &TransactionRequest,
    ) -> Result<SubmitReceipt>;

    /// Release SDK resources (channels, threads). Called exactly once.
    fn close(&mut self) {}
}

/// Opens a submitter session for one network and operator.
pub trait SubmitterFactory {
    fn open(
        &self,
        network: Network,
        operator: &OperatorCredential,
    ) -> Result<Box<dyn TransactionSubmitter>>;
}

// =============================================================================
// NetworkClient
// =============================================================================

/// What an invocation needs from its client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRequirement {
    /// Mirror reads only.
    ReadOnly,
    /// Mirror reads plus an operator able to submit transactions.
    Operator,
}

/// Session against one network partition, owned by a single invocation.
pub struct NetworkClient {
    network: Network,
    mirror: Box<dyn DocumentSource>,
    operator: Option<OperatorCredential>,
    submitter: Option<Box<dyn TransactionSubmitter>>,
    released: bool,
}

impl fmt::Debug for NetworkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkClient")
            .field("network", &self.network)
            .field("operator", &self.operator.as_ref().map(|o| o.account))
            .field("can_submit", &self.submitter.is_some())
            .field("released", &self.released)
            .finish()
    }
}

impl NetworkClient {
    pub fn read_only(network: Network, mirror: Box<dyn DocumentSource>) -> Self {
        Self {
            network,
            mirror,
            operator: None,
            submitter: None,
            released: false,
        }
    }

    pub fn with_operator(
        network: Network,
        mirror: Box<dyn DocumentSource>,
        operator: OperatorCredential,
        submitter: Box<dyn TransactionSubmitter>,
    ) -> Self {
        Self {
            network,
            mirror,
            operator: Some(operator),
            submitter: Some(submitter),
            released: false,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn mirror(&self) -> &dyn DocumentSource {
        self.mirror.as_ref()
    }

    pub fn operator(&self) -> Option<&OperatorCredential> {
        self.operator.as_ref()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Submit a transaction as the configured operator.
    pub fn submit(&self, request: &TransactionRequest) -> Result<SubmitReceipt> {
        if self.released {
            bail!("Network client for {} has already been released", self.network);
        }
        match (&self.operator, &self.submitter) {
            (Some(operator), Some(submitter)) => submitter.submit(operator, request),
            _ => bail!(
                "Network client for {} was acquired read-only; cannot submit {}",
                self.network,
                request.kind()
            ),
        }
    }

    /// Close the SDK session. Idempotent.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(submitter) = self.submitter.as_mut() {
            submitter.close();
        }
        debug!(network = %self.network, "network client released");
    }
}

impl Drop for NetworkClient {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// Factories
// =============================================================================

/// Constructs a fresh [`NetworkClient`] per invocation.
pub trait ClientFactory {
    fn acquire(&self, config: &BridgeConfig, requirement: ClientRequirement) -> Result<NetworkClient>;
}

/// Production factory: a [`MirrorGateway`] for reads and, when an operator is
/// required, a submitter from the configured [`SubmitterFactory`].
#[derive(Clone, Default)]
pub struct MirrorClientFactory {
    submitters: Option<Arc<dyn SubmitterFactory + Send + Sync>>,
}

impl MirrorClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submitter(submitters: Arc<dyn SubmitterFactory + Send + Sync>) -> Self {
        Self {
            submitters: Some(submitters),
        }
    }
}

impl ClientFactory for MirrorClientFactory {
    fn acquire(&self, config: &BridgeConfig, requirement: ClientRequirement) -> Result<NetworkClient> {
        let gateway = MirrorGateway::from_config(config)?;
        let mirror: Box<dyn DocumentSource> = Box::new(gateway);

        match requirement {
            ClientRequirement::ReadOnly => Ok(NetworkClient::read_only(config.network, mirror)),
            ClientRequirement::Operator => {
                let operator = OperatorCredential::from_parts(
                    config.operator_id.as_deref(),
                    config.operator_key.as_deref(),
                )?;
                let Some(submitters) = &self.submitters else {
                    bail!("No transaction submitter is configured for {}", config.network);
                };
                let submitter = submitters.open(config.network, &operator)?;
                Ok(NetworkClient::with_operator(
                    config.network,
                    mirror,
                    operator,
                    submitter,
                ))
            }
        }
    }
}
