use anyhow::anyhow;
use hedera_transport::{ClientRequirement, NetworkClient, TransactionRequest};
use hedera_types::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{parse_id, read_entity, submit, TransactionRecord};
use crate::context::ExecutionContext;
use crate::harness::{Precheck, Runs, Validates};
use crate::kind::EntityKind;

/// Add the operator's signature to a scheduled transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSignTool {
    pub schedule: String,
}

impl ScheduleSignTool {
    fn schedule_id(&self) -> Result<EntityId, String> {
        parse_id(&self.schedule, "schedule id")
    }
}

impl Validates for ScheduleSignTool {
    fn plugin_name(&self) -> &str {
        "schedule-sign"
    }

    fn client_requirement(&self) -> ClientRequirement {
        ClientRequirement::Operator
    }

    fn validates(&self, _ctx: &ExecutionContext) -> Precheck {
        match self.schedule_id() {
            Ok(_) => Precheck::Proceed,
            Err(reason) => Precheck::Abort(reason),
        }
    }

    fn validates_with_client(
        &self,
        client: &NetworkClient,
        ctx: &ExecutionContext,
    ) -> anyhow::Result<Precheck> {
        let schedule = self.schedule_id().map_err(|reason| anyhow!(reason))?;
        let Some(document) = read_entity(client, ctx, EntityKind::Schedule, &schedule) else {
            return Ok(Precheck::abort(format!("schedule {} not found", schedule)));
        };
        if document.get("executed_timestamp").is_some_and(|ts| !ts.is_null()) {
            return Ok(Precheck::abort(format!("schedule {} has already executed", schedule)));
        }
        if document.get("deleted").and_then(Value::as_bool) == Some(true) {
            return Ok(Precheck::abort(format!("schedule {} is deleted", schedule)));
        }
        Ok(Precheck::Proceed)
    }
}

impl Runs for ScheduleSignTool {
    type Output = TransactionRecord;

    fn runs(&self, client: &NetworkClient, _ctx: &ExecutionContext) -> anyhow::Result<TransactionRecord> {
        let schedule = self.schedule_id().map_err(|reason| anyhow!(reason))?;
        submit(client, TransactionRequest::ScheduleSign { schedule })
    }
}
