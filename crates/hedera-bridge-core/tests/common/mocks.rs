//! In-memory stand-ins for the mirror node and the ledger SDK.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use hedera_bridge_core::ExecutionContext;
use hedera_transport::{
    ClientFactory, ClientRequirement, DocumentSource, NetworkClient, OperatorCredential,
    PrecheckStatus, SubmitReceipt, TransactionRequest, TransactionSubmitter,
};
use hedera_types::BridgeConfig;
use serde_json::Value;

pub const OPERATOR_ID: &str = "0.0.1001";
pub const OPERATOR_KEY: &str = "db484b828e64b2d8f12ce3c0a0e93a0b8cce7af1bb8f39c97732394482538e10";

/// Mirror documents by REST path, counting every request.
#[derive(Default)]
pub struct MockMirror {
    documents: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl MockMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, document: Value) -> Self {
        self.documents.insert(path.to_string(), document);
        self
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == path)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl DocumentSource for MockMirror {
    fn get(&self, path: &str) -> Option<Value> {
        self.requests.lock().unwrap().push(path.to_string());
        self.documents.get(path).cloned()
    }
}

/// Records submitted requests; optionally rejects them at precheck.
#[derive(Clone, Default)]
pub struct MockSubmitter {
    pub submitted: Arc<Mutex<Vec<TransactionRequest>>>,
    pub closes: Arc<AtomicUsize>,
    pub reject_with: Option<String>,
    pub panic_on_submit: bool,
}

impl MockSubmitter {
    pub fn rejecting(status: &str) -> Self {
        Self {
            reject_with: Some(status.to_string()),
            ..Self::default()
        }
    }

    pub fn submitted(&self) -> Vec<TransactionRequest> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl TransactionSubmitter for MockSubmitter {
    fn submit(
        &self,
        operator: &OperatorCredential,
        request: &TransactionRequest,
    ) -> Result<SubmitReceipt> {
        if self.panic_on_submit {
            panic!("sdk exploded");
        }
        let transaction_id = format!("{}@1700000000.000000001", operator.account);
        if let Some(status) = &self.reject_with {
            return Err(anyhow::Error::new(PrecheckStatus {
                status: status.clone(),
                transaction_id: Some(transaction_id),
            }));
        }
        self.submitted.lock().unwrap().push(request.clone());
        Ok(SubmitReceipt {
            transaction_id,
            status: "SUCCESS".to_string(),
            consensus_timestamp: Some("1700000001.000000000".to_string()),
        })
    }

    fn close(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Hands out clients backed by the shared mock mirror and submitter.
pub struct StubFactory {
    pub mirror: Arc<MockMirror>,
    pub submitter: MockSubmitter,
    pub acquisitions: AtomicUsize,
}

impl StubFactory {
    pub fn new(mirror: MockMirror) -> Self {
        Self::with_submitter(mirror, MockSubmitter::default())
    }

    pub fn with_submitter(mirror: MockMirror, submitter: MockSubmitter) -> Self {
        Self {
            mirror: Arc::new(mirror),
            submitter,
            acquisitions: AtomicUsize::new(0),
        }
    }

    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

impl ClientFactory for StubFactory {
    fn acquire(&self, config: &BridgeConfig, requirement: ClientRequirement) -> Result<NetworkClient> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        let mirror: Box<dyn DocumentSource> = Box::new(self.mirror.clone());
        match requirement {
            ClientRequirement::ReadOnly => Ok(NetworkClient::read_only(config.network, mirror)),
            ClientRequirement::Operator => {
                let operator = OperatorCredential::from_parts(
                    config.operator_id.as_deref(),
                    config.operator_key.as_deref(),
                )?;
                Ok(NetworkClient::with_operator(
                    config.network,
                    mirror,
                    operator,
                    Box::new(self.submitter.clone()),
                ))
            }
        }
    }
}

pub fn operator_config() -> BridgeConfig {
    BridgeConfig {
        operator_id: Some(OPERATOR_ID.to_string()),
        operator_key: Some(OPERATOR_KEY.to_string()),
        ..BridgeConfig::default()
    }
}

pub fn context() -> ExecutionContext {
    ExecutionContext::new(BridgeConfig::default())
}
