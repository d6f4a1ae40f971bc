//! Generic table-driven attribute resolver.
//!
//! One resolver serves all five entity kinds; the [`EntityDescriptor`] of the
//! parsed reference supplies the REST path, the document root and the
//! attribute table. Results:
//!
//! - `Some(value)`: the coerced attribute, or its documented fallback literal
//! - `None`: unknown attribute, or the entity document is missing/unavailable

use std::sync::Arc;

use anyhow::Result;
use hedera_transport::{DocumentSource, NetworkClient};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{CacheKey, CachedDocument, RequestCache};
use crate::coerce::field_at;
use crate::context::ExecutionContext;
use crate::error::BridgeError;
use crate::harness::{Precheck, Runs, Validates};
use crate::kind::{
    find_attribute, AttributeSpec, CollectionScan, EntityDescriptor, EntityKind, FamilySource,
    FamilyTable,
};
use crate::path::EntityReference;

/// Resolves one variable path; runs inside the [`Harness`](crate::harness::Harness).
#[derive(Debug, Clone)]
pub struct AttributeResolver {
    raw: String,
    parsed: Result<EntityReference, BridgeError>,
}

impl AttributeResolver {
    pub fn new(kind: EntityKind, raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            parsed: EntityReference::parse(kind, raw),
        }
    }

    pub fn reference(&self) -> Option<&EntityReference> {
        self.parsed.as_ref().ok()
    }
}

impl Validates for AttributeResolver {
    fn plugin_name(&self) -> &str {
        match &self.parsed {
            Ok(reference) => reference.kind.prefix(),
            Err(_) => "attribute-resolver",
        }
    }

    fn validates(&self, _ctx: &ExecutionContext) -> Precheck {
        match &self.parsed {
            Ok(_) => Precheck::Proceed,
            Err(err) => Precheck::abort(err.to_string()),
        }
    }
}

impl Runs for AttributeResolver {
    type Output = Option<String>;

    fn runs(&self, client: &NetworkClient, ctx: &ExecutionContext) -> Result<Option<String>> {
        let reference = self.parsed.clone()?;
        debug!(path = %self.raw, "resolving attribute");
        Ok(resolve_reference(&reference, client.mirror(), &ctx.cache))
    }
}

/// Resolve a parsed reference against `source`, memoising documents in `cache`.
pub fn resolve_reference(
    reference: &EntityReference,
    source: &dyn DocumentSource,
    cache: &RequestCache,
) -> Option<String> {
    let descriptor = reference.kind.descriptor();

    let Some(family) = reference.family() else {
        let spec = known_attribute(descriptor.attributes, reference)?;
        let document = fetch_entity(descriptor, &reference.primary, None, source, cache)?;
        return apply_spec(spec, entity_root(descriptor, &document)?);
    };

    let secondary = reference.secondary.as_ref()?;
    match &family.source {
        FamilySource::Scan(scan) => {
            if !reference.attribute.is_empty() {
                debug!(path = %reference, "attribute after a scan family is not supported");
                return None;
            }
            let document = fetch_entity(descriptor, &reference.primary, None, source, cache)?;
            Some(scan_collection(scan, entity_root(descriptor, &document)?, &secondary.id))
        }
        FamilySource::Document { attributes, .. } => {
            let spec = known_attribute(attributes, reference)?;
            let document = fetch_entity(
                descriptor,
                &reference.primary,
                Some((family, secondary.id.as_str())),
                source,
                cache,
            )?;
            apply_spec(spec, &document)
        }
    }
}

fn known_attribute(
    table: &'static [AttributeSpec],
    reference: &EntityReference,
) -> Option<&'static AttributeSpec> {
    let spec = find_attribute(table, &reference.attribute);
    if spec.is_none() {
        debug!(path = %reference, attribute = %reference.attribute, "unknown attribute");
    }
    spec
}

/// Fetch the document for an entity (or one of its families) through the cache.
///
/// Not-found and unavailable documents are logged at warn and yield `None`.
pub fn fetch_entity(
    descriptor: &EntityDescriptor,
    primary: &str,
    family: Option<(&FamilyTable, &str)>,
    source: &dyn DocumentSource,
    cache: &RequestCache,
) -> Option<Arc<Value>> {
    let (path, secondary) = match family {
        Some((
            FamilyTable {
                source: FamilySource::Document { path_template, .. },
                ..
            },
            secondary,
        )) => (
            path_template
                .replace("{id}", primary)
                .replace("{secondary}", secondary),
            Some(secondary.to_string()),
        ),
        _ => (descriptor.rest_path(primary), None),
    };

    let key = CacheKey::new(descriptor.kind, primary, secondary);
    match cache.get_or_fetch(key, source, &path) {
        CachedDocument::Found(document) => Some(document),
        CachedDocument::NotFound => {
            warn!(kind = %descriptor.kind, id = primary, path = %path, "entity not found");
            None
        }
        CachedDocument::Unavailable => {
            warn!(kind = %descriptor.kind, id = primary, path = %path, "entity data unavailable");
            None
        }
    }
}

/// The entity object inside a fetched body (`transactions.0` for transactions).
pub fn entity_root<'a>(descriptor: &EntityDescriptor, document: &'a Value) -> Option<&'a Value> {
    match descriptor.document_root {
        None => Some(document),
        Some(root) => {
            let entity = field_at(document, root);
            if entity.is_none() {
                warn!(kind = %descriptor.kind, root, "document has no entity at its root path");
            }
            entity
        }
    }
}

/// Read, coerce and fall back for one attribute.
pub fn apply_spec(spec: &AttributeSpec, document: &Value) -> Option<String> {
    let value = field_at(document, spec.field).unwrap_or(&Value::Null);
    match spec.coercion.apply(value, document) {
        Some(rendered) => Some(rendered),
        None => {
            if !value.is_null() {
                debug!(attribute = spec.name, field = spec.field, "value could not be coerced");
            }
            spec.fallback.map(str::to_string)
        }
    }
}

/// Find the element of `scan.collection` whose key equals `key`.
///
/// Returns on the first match; the `missing` literal only after the whole
/// collection has been scanned.
pub fn scan_collection(scan: &CollectionScan, document: &Value, key: &str) -> String {
    let items = field_at(document, scan.collection)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for item in items {
        if item.get(scan.key_field).and_then(Value::as_str) == Some(key) {
            let value = item.get(scan.value_field).unwrap_or(&Value::Null);
            return scan
                .coercion
                .apply(value, document)
                .unwrap_or_else(|| scan.missing.to_string());
        }
    }
    scan.missing.to_string()
}
