use anyhow::anyhow;
use hedera_transport::{ClientRequirement, NetworkClient, TransactionRequest};
use hedera_types::EntityId;
use serde::{Deserialize, Serialize};

use super::{parse_id, submit, TransactionRecord};
use crate::context::ExecutionContext;
use crate::harness::{Precheck, Runs, Validates};

/// Bytes per consensus message chunk.
pub const MESSAGE_CHUNK_SIZE: usize = 1024;
/// Most chunks a single submission may be split into.
pub const MAX_CHUNKS: usize = 20;

/// Submit a message to a consensus topic, chunked as the ledger requires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicMessageTool {
    pub topic: String,
    pub message: String,
}

impl TopicMessageTool {
    fn topic_id(&self) -> Result<EntityId, String> {
        parse_id(&self.topic, "topic id")
    }

    pub fn chunk_count(&self) -> usize {
        self.message.len().div_ceil(MESSAGE_CHUNK_SIZE)
    }

    fn check(&self) -> Result<EntityId, String> {
        let topic = self.topic_id()?;
        if self.message.is_empty() {
            return Err("message is empty".to_string());
        }
        if self.chunk_count() > MAX_CHUNKS {
            return Err(format!(
                "message is {} bytes; at most {} allowed",
                self.message.len(),
                MESSAGE_CHUNK_SIZE * MAX_CHUNKS
            ));
        }
        Ok(topic)
    }
}

impl Validates for TopicMessageTool {
    fn plugin_name(&self) -> &str {
        "topic-message"
    }

    fn client_requirement(&self) -> ClientRequirement {
        ClientRequirement::Operator
    }

    fn validates(&self, _ctx: &ExecutionContext) -> Precheck {
        match self.check() {
            Ok(_) => Precheck::Proceed,
            Err(reason) => Precheck::Abort(reason),
        }
    }
}

impl Runs for TopicMessageTool {
    type Output = TransactionRecord;

    fn runs(&self, client: &NetworkClient, _ctx: &ExecutionContext) -> anyhow::Result<TransactionRecord> {
        let topic = self.check().map_err(|reason| anyhow!(reason))?;
        submit(
            client,
            TransactionRequest::TopicMessageSubmit {
                topic,
                message: self.message.as_bytes().to_vec(),
                chunk_size: MESSAGE_CHUNK_SIZE,
            },
        )
    }
}
