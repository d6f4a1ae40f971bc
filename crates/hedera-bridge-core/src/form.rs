//! Form-loading binder.
//!
//! Binds one ledger entity to a set of form fields: each field names an
//! attribute of the entity (composite attributes included, e.g.
//! `tokenBalance[0.0.2]`). The entity document is fetched once through the
//! request cache and every field is resolved from it.

use anyhow::Result;
use hedera_transport::NetworkClient;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::context::ExecutionContext;
use crate::harness::{Precheck, ProducesRows, Runs, Validates};
use crate::kind::EntityKind;
use crate::path::EntityReference;
use crate::resolver::{fetch_entity, resolve_reference};

/// One bound row: the entity id plus form field values in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRow {
    pub key: String,
    pub values: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormLoader {
    pub kind: EntityKind,
    pub entity_id: String,
    /// Form field name to attribute path.
    pub fields: IndexMap<String, String>,
}

impl FormLoader {
    pub fn new(kind: EntityKind, entity_id: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.fields.insert(name.into(), attribute.into());
        self
    }

    fn reference_for(&self, attribute: &str) -> Option<EntityReference> {
        let path = format!(
            "{}.[{}].{}",
            self.kind.prefix(),
            self.entity_id.trim(),
            attribute.trim()
        );
        EntityReference::parse(self.kind, &path).ok()
    }
}

impl Validates for FormLoader {
    fn plugin_name(&self) -> &str {
        "form-loader"
    }

    fn validates(&self, _ctx: &ExecutionContext) -> Precheck {
        if self.kind.descriptor().id_syntax.normalize(&self.entity_id).is_none() {
            return Precheck::abort(format!(
                "'{}' is not a valid {} id",
                self.entity_id, self.kind
            ));
        }
        if self.fields.is_empty() {
            return Precheck::abort("no form fields to load");
        }
        Precheck::Proceed
    }
}

impl Runs for FormLoader {
    /// `None` when the entity document is missing or unavailable.
    type Output = Option<FormRow>;

    fn runs(&self, client: &NetworkClient, ctx: &ExecutionContext) -> Result<Option<FormRow>> {
        let descriptor = self.kind.descriptor();
        let Some(primary) = descriptor.id_syntax.normalize(&self.entity_id) else {
            return Ok(None);
        };
        if fetch_entity(descriptor, &primary, None, client.mirror(), &ctx.cache).is_none() {
            return Ok(None);
        }

        let values = self
            .fields
            .iter()
            .map(|(field, attribute)| {
                let value = self
                    .reference_for(attribute)
                    .and_then(|reference| resolve_reference(&reference, client.mirror(), &ctx.cache))
                    .unwrap_or_default();
                (field.clone(), value)
            })
            .collect();

        Ok(Some(FormRow {
            key: primary,
            values,
        }))
    }
}

impl ProducesRows for FormLoader {
    fn produces_rows(&self, output: Option<FormRow>) -> Vec<FormRow> {
        output.into_iter().collect()
    }
}
