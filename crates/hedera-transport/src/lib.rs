//! Hedera Transport Layer
//!
//! Everything in the bridge that crosses the network boundary lives here:
//!
//! - [`mirror`]: the read-only REST gateway ([`MirrorGateway`]) behind the
//!   [`DocumentSource`] seam
//! - [`network`]: mirror base URLs per network partition and provider
//! - [`client`]: [`NetworkClient`], the per-invocation session handed out by a
//!   [`ClientFactory`], and the [`TransactionSubmitter`] seam the ledger SDK plugs into
//! - [`credential`]: operator credential parsing
//!
//! # Example
//!
//! ```ignore
//! use hedera_transport::{DocumentSource, MirrorGateway};
//! use hedera_types::BridgeConfig;
//!
//! let gateway = MirrorGateway::from_config(&BridgeConfig::default())?;
//! let account = gateway.get("/accounts/0.0.98");
//! ```

pub mod client;
pub mod credential;
pub mod mirror;
pub mod network;

pub use client::{
    ClientFactory, ClientRequirement, MirrorClientFactory, NetworkClient, PrecheckStatus,
    SubmitReceipt, SubmitterFactory, TimeoutError, TransactionRequest, TransactionSubmitter,
};
pub use credential::{CredentialError, KeyAlgorithm, KeyMaterial, OperatorCredential};
pub use mirror::{DocumentSource, MirrorGateway};
