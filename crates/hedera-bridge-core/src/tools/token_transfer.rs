use anyhow::anyhow;
use hedera_transport::{ClientRequirement, NetworkClient, TransactionRequest};
use hedera_types::EntityId;
use serde::{Deserialize, Serialize};

use super::{holds_token, parse_id, read_entity, submit, TransactionRecord};
use crate::coerce::{is_positive_decimal, parse_scaled, token_decimals};
use crate::context::ExecutionContext;
use crate::error::BridgeError;
use crate::harness::{Precheck, Runs, Validates};
use crate::kind::EntityKind;

/// Transfer a fungible token. The amount is given in display units and
/// converted with the token's own `decimals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenTransferTool {
    pub token: String,
    pub sender: String,
    pub receiver: String,
    pub amount: String,
}

struct Parties {
    token: EntityId,
    sender: EntityId,
    receiver: EntityId,
}

impl TokenTransferTool {
    fn parties(&self) -> Result<Parties, String> {
        let parties = Parties {
            token: parse_id(&self.token, "token id")?,
            sender: parse_id(&self.sender, "sender account id")?,
            receiver: parse_id(&self.receiver, "receiver account id")?,
        };
        if parties.sender == parties.receiver {
            return Err("sender and receiver are the same account".to_string());
        }
        Ok(parties)
    }

    fn decimals(
        &self,
        client: &NetworkClient,
        ctx: &ExecutionContext,
        token: &EntityId,
    ) -> Option<u32> {
        token_decimals(read_entity(client, ctx, EntityKind::Token, token)?.as_ref())
    }
}

impl Validates for TokenTransferTool {
    fn plugin_name(&self) -> &str {
        "token-transfer"
    }

    fn client_requirement(&self) -> ClientRequirement {
        ClientRequirement::Operator
    }

    fn validates(&self, _ctx: &ExecutionContext) -> Precheck {
        if let Err(reason) = self.parties() {
            return Precheck::Abort(reason);
        }
        if !is_positive_decimal(&self.amount) {
            return Precheck::abort(format!("'{}' is not a positive amount", self.amount.trim()));
        }
        Precheck::Proceed
    }

    fn validates_with_client(
        &self,
        client: &NetworkClient,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<Precheck> {
        let parties = self.parties().map_err(|reason| anyhow!(reason))?;
        let Some(decimals) = self.decimals(client, ctx, &parties.token) else {
            return Ok(Precheck::abort(format!(
                "token {} not found or has no usable decimals",
                parties.token
            )));
        };
        if let Err(reason) = parse_scaled(&self.amount, decimals) {
            return Ok(Precheck::Abort(reason));
        }
        let Some(receiver) = read_entity(client, ctx, EntityKind::Account, &parties.receiver) else {
            return Ok(Precheck::abort(format!("receiver {} not found", parties.receiver)));
        };
        if !holds_token(&receiver, &parties.token) {
            return Ok(Precheck::abort(format!(
                "receiver {} is not associated with {}",
                parties.receiver, parties.token
            )));
        }
        Ok(Precheck::Proceed)
    }
}

impl Runs for TokenTransferTool {
    type Output = TransactionRecord;

    fn runs(&self, client: &NetworkClient, ctx: &ExecutionContext) -> anyhow::Result<TransactionRecord> {
        let parties = self.parties().map_err(|reason| anyhow!(reason))?;
        let decimals = self
            .decimals(client, ctx, &parties.token)
            .ok_or_else(|| BridgeError::DataUnavailable {
                path: format!("/tokens/{}", parties.token),
                reason: "token decimals unavailable".to_string(),
            })?;
        let amount = parse_scaled(&self.amount, decimals).map_err(|reason| anyhow!(reason))?;
        submit(
            client,
            TransactionRequest::TokenTransfer {
                token: parties.token,
                sender: parties.sender,
                receiver: parties.receiver,
                amount,
                decimals,
            },
        )
    }
}
