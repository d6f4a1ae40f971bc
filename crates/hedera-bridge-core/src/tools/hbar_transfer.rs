use anyhow::anyhow;
use hedera_transport::{ClientRequirement, NetworkClient, TransactionRequest};
use hedera_types::{AccountRef, EntityId};
use serde::{Deserialize, Serialize};

use super::{parse_id, submit, TransactionRecord};
use crate::coerce::{parse_scaled, HBAR_DECIMALS};
use crate::context::ExecutionContext;
use crate::harness::{Precheck, Runs, Validates};

/// Ledger limit on transaction memos, in bytes.
const MAX_MEMO_BYTES: usize = 100;

/// Transfer hbar from the sender to a receiver (entity id or EVM address).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HbarTransferTool {
    pub sender: String,
    pub receiver: String,
    /// Display units (ℏ), at most 8 decimal places.
    pub amount: String,
    #[serde(default)]
    pub memo: Option<String>,
}

struct Transfer {
    sender: EntityId,
    receiver: AccountRef,
    tinybars: i64,
}

impl HbarTransferTool {
    fn transfer(&self) -> Result<Transfer, String> {
        let sender: EntityId = parse_id(&self.sender, "sender account id")?;
        let receiver: AccountRef = parse_id(&self.receiver, "receiver account")?;
        if receiver.entity_id() == Some(sender) {
            return Err("sender and receiver are the same account".to_string());
        }
        let tinybars = parse_scaled(&self.amount, HBAR_DECIMALS)?;
        if tinybars <= 0 {
            return Err("transfer amount must be positive".to_string());
        }
        if let Some(memo) = &self.memo {
            if memo.len() > MAX_MEMO_BYTES {
                return Err(format!(
                    "memo is {} bytes; at most {} allowed",
                    memo.len(),
                    MAX_MEMO_BYTES
                ));
            }
        }
        Ok(Transfer {
            sender,
            receiver,
            tinybars,
        })
    }
}

impl Validates for HbarTransferTool {
    fn plugin_name(&self) -> &str {
        "hbar-transfer"
    }

    fn client_requirement(&self) -> ClientRequirement {
        ClientRequirement::Operator
    }

    fn validates(&self, _ctx: &ExecutionContext) -> Precheck {
        match self.transfer() {
            Ok(_) => Precheck::Proceed,
            Err(reason) => Precheck::Abort(reason),
        }
    }
}

impl Runs for HbarTransferTool {
    type Output = TransactionRecord;

    fn runs(&self, client: &NetworkClient, _ctx: &ExecutionContext) -> anyhow::Result<TransactionRecord> {
        let transfer = self.transfer().map_err(|reason| anyhow!(reason))?;
        submit(
            client,
            TransactionRequest::HbarTransfer {
                sender: transfer.sender,
                receiver: transfer.receiver,
                tinybars: transfer.tinybars,
                memo: self.memo.clone().filter(|m| !m.is_empty()),
            },
        )
    }
}
