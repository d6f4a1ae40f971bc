use anyhow::anyhow;
use hedera_transport::{ClientRequirement, NetworkClient, TransactionRequest};
use hedera_types::EntityId;
use serde::{Deserialize, Serialize};

use super::{holds_token, parse_id, read_entity, submit, TransactionRecord};
use crate::context::ExecutionContext;
use crate::harness::{Precheck, Runs, Validates};
use crate::kind::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssociationAction {
    #[default]
    Associate,
    Dissociate,
}

/// Associate a token with an account, or dissociate it.
///
/// The account document is checked first so that associating an already
/// associated token (or dissociating one that is not) is skipped instead of
/// submitted and rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenAssociationTool {
    pub account: String,
    pub token: String,
    #[serde(default)]
    pub action: AssociationAction,
}

impl TokenAssociationTool {
    fn ids(&self) -> Result<(EntityId, EntityId), String> {
        Ok((
            parse_id(&self.account, "account id")?,
            parse_id(&self.token, "token id")?,
        ))
    }
}

impl Validates for TokenAssociationTool {
    fn plugin_name(&self) -> &str {
        match self.action {
            AssociationAction::Associate => "token-associate",
            AssociationAction::Dissociate => "token-dissociate",
        }
    }

    fn client_requirement(&self) -> ClientRequirement {
        ClientRequirement::Operator
    }

    fn validates(&self, _ctx: &ExecutionContext) -> Precheck {
        match self.ids() {
            Ok(_) => Precheck::Proceed,
            Err(reason) => Precheck::Abort(reason),
        }
    }

    fn validates_with_client(
        &self,
        client: &NetworkClient,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<Precheck> {
        let (account, token) = self.ids().map_err(|reason| anyhow!(reason))?;
        let Some(document) = read_entity(client, ctx, EntityKind::Account, &account) else {
            return Ok(Precheck::abort(format!("account {} not found", account)));
        };
        let associated = holds_token(&document, &token);
        Ok(match (self.action, associated) {
            (AssociationAction::Associate, true) => {
                Precheck::abort(format!("{} is already associated with {}", account, token))
            }
            (AssociationAction::Dissociate, false) => {
                Precheck::abort(format!("{} is not associated with {}", account, token))
            }
            _ => Precheck::Proceed,
        })
    }
}

impl Runs for TokenAssociationTool {
    type Output = TransactionRecord;

    fn runs(&self, client: &NetworkClient, _ctx: &ExecutionContext) -> anyhow::Result<TransactionRecord> {
        let (account, token) = self.ids().map_err(|reason| anyhow!(reason))?;
        let request = match self.action {
            AssociationAction::Associate => TransactionRequest::TokenAssociate { account, token },
            AssociationAction::Dissociate => TransactionRequest::TokenDissociate { account, token },
        };
        submit(client, request)
    }
}
