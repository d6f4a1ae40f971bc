//! Mirror Node REST Gateway
//!
//! Read-only access to ledger state as JSON documents. The gateway is
//! deliberately dumb: it issues one authenticated GET, normalises the body
//! into a JSON object and hands it back. Deciding whether a document means
//! "not found" is the attribute tables' job.
//!
//! ## Endpoints consumed
//!
//! - `/accounts/{id}`
//! - `/tokens/{id}` and `/tokens/{id}/nfts/{serial}`
//! - `/topics/{id}/messages?order=desc` and `/topics/{id}/messages/{seq}`
//! - `/transactions/{id}`
//! - `/schedules/{id}`
//!
//! ## Failure contract
//!
//! [`DocumentSource::get`] returns `None` for transport failures, timeouts and
//! bodies that are not JSON. HTTP error statuses whose body is JSON (the
//! mirror's `{"_status": ...}` envelope) are returned as documents.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use hedera_types::BridgeConfig;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::client::TimeoutError;
use crate::network::{resolve_api_key, resolve_mirror_endpoint, API_KEY_HEADER};

/// Key used when a bare JSON array body is wrapped into an object.
pub const ARRAY_WRAPPER_KEY: &str = "data";

/// Anything that can serve mirror documents by REST path.
///
/// [`MirrorGateway`] is the production implementation; tests substitute
/// in-memory sources.
pub trait DocumentSource {
    /// GET `path` (relative to the source's base URL, starting with `/`).
    fn get(&self, path: &str) -> Option<Value>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for &T {
    fn get(&self, path: &str) -> Option<Value> {
        (**self).get(path)
    }
}

impl<T: DocumentSource + ?Sized> DocumentSource for std::sync::Arc<T> {
    fn get(&self, path: &str) -> Option<Value> {
        (**self).get(path)
    }
}

/// Blocking HTTP gateway to a mirror node.
#[derive(Clone)]
pub struct MirrorGateway {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    agent: ureq::Agent,
}

impl std::fmt::Debug for MirrorGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorGateway")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl MirrorGateway {
    fn build_agent(timeout: Duration, connect_timeout: Duration) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .build()
    }

    /// Create a gateway for the network, provider and timeouts in `config`.
    ///
    /// Fails for an endpoint that is not an `http` or `https` URL.
    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        config.validate().context("Invalid mirror configuration")?;
        let endpoint = resolve_mirror_endpoint(config);
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            bail!("Unsupported mirror URL scheme: {}", endpoint);
        }
        Ok(Self::with_timeouts(
            &endpoint,
            resolve_api_key(config),
            config.timeout(),
            config.connect_timeout(),
        ))
    }

    /// Create a gateway with an explicit base URL and default timeouts.
    pub fn new(base_url: &str) -> Self {
        let defaults = BridgeConfig::default();
        Self::with_timeouts(base_url, None, defaults.timeout(), defaults.connect_timeout())
    }

    pub fn with_timeouts(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
            agent: Self::build_agent(timeout, connect_timeout),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// GET `path` and return the normalised document, with a typed error on failure.
    ///
    /// A timeout surfaces as [`TimeoutError`] in the error chain.
    pub fn fetch(&self, path: &str) -> Result<Value> {
        let url = self.url_for(path);
        let mut request = self.agent.get(&url).set("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.set(API_KEY_HEADER, key);
        }

        let body = match request.call() {
            Ok(response) => response
                .into_string()
                .with_context(|| format!("Failed to read mirror response body from {}", url))?,
            Err(ureq::Error::Status(code, response)) => {
                debug!(url = %url, status = code, "mirror returned error status");
                response
                    .into_string()
                    .with_context(|| format!("Failed to read mirror error body from {}", url))?
            }
            Err(err) if is_timeout(&err) => {
                return Err(anyhow::Error::new(TimeoutError {
                    operation: format!("GET {}", url),
                    after: self.timeout,
                }));
            }
            Err(err) => return Err(anyhow!("Mirror request to {} failed: {}", url, err)),
        };

        parse_document(&body).with_context(|| format!("Malformed mirror response from {}", url))
    }
}

impl DocumentSource for MirrorGateway {
    fn get(&self, path: &str) -> Option<Value> {
        match self.fetch(path) {
            Ok(document) => Some(document),
            Err(err) if err.downcast_ref::<TimeoutError>().is_some() => {
                error!(path, error = %err, "mirror request timed out");
                None
            }
            Err(err) => {
                warn!(path, error = %format!("{:#}", err), "mirror request failed");
                None
            }
        }
    }
}

/// Parse a response body into a JSON object, wrapping a bare array as
/// `{"data": [...]}` so every caller sees the same document shape.
pub fn parse_document(body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body.trim())?;
    match value {
        Value::Array(items) => {
            let mut wrapped = serde_json::Map::new();
            wrapped.insert(ARRAY_WRAPPER_KEY.to_string(), Value::Array(items));
            Ok(Value::Object(wrapped))
        }
        other => Ok(other),
    }
}

fn is_timeout(err: &ureq::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(current) = source {
        if let Some(io) = current.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ) {
                return true;
            }
        }
        source = current.source();
    }
    err.to_string().to_lowercase().contains("timed out")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedera_types::{MirrorProvider, Network};
    use serde_json::json;

    #[test]
    fn test_parse_document_wraps_arrays() {
        let doc = parse_document(r#" [{"a": 1}, {"a": 2}] "#).unwrap();
        assert_eq!(doc, json!({"data": [{"a": 1}, {"a": 2}]}));
    }

    #[test]
    fn test_parse_document_keeps_objects() {
        let doc = parse_document(r#"{"_status": {"messages": [{"message": "Not found"}]}}"#).unwrap();
        assert!(doc.get("_status").is_some());
    }

    #[test]
    fn test_parse_document_rejects_garbage() {
        assert!(parse_document("<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_url_joining() {
        let gateway = MirrorGateway::new("https://testnet.mirrornode.hedera.com/api/v1/");
        assert_eq!(
            gateway.url_for("/accounts/0.0.2"),
            "https://testnet.mirrornode.hedera.com/api/v1/accounts/0.0.2"
        );
        assert_eq!(
            gateway.url_for("tokens/0.0.5"),
            "https://testnet.mirrornode.hedera.com/api/v1/tokens/0.0.5"
        );
    }

    #[test]
    fn test_from_config_selects_provider() {
        let config = BridgeConfig {
            network: Network::Previewnet,
            mirror_provider: MirrorProvider::Arkhia,
            mirror_api_key: Some("key".to_string()),
            ..BridgeConfig::default()
        };
        let gateway = MirrorGateway::from_config(&config).unwrap();
        assert_eq!(gateway.base_url(), "https://pool.arkhia.io/hedera/previewnet/api/v1");
        assert!(!format!("{:?}", gateway).contains("\"key\""));
    }

    #[test]
    fn test_from_config_rejects_non_http_endpoint() {
        let config = BridgeConfig {
            mirror_url: Some("ftp://mirror.invalid/api/v1".to_string()),
            ..BridgeConfig::default()
        };
        let err = MirrorGateway::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("Unsupported mirror URL scheme"));

        let config = BridgeConfig {
            mirror_url: Some("http://localhost:5551/api/v1".to_string()),
            ..BridgeConfig::default()
        };
        assert!(MirrorGateway::from_config(&config).is_ok());
    }

    #[test]
    fn test_unreachable_host_is_none() {
        let gateway = MirrorGateway::with_timeouts(
            "http://127.0.0.1:1",
            None,
            Duration::from_millis(500),
            Duration::from_millis(500),
        );
        assert!(gateway.get("/accounts/0.0.2").is_none());
    }

    /// Run with: cargo test -p hedera-transport test_fetch_testnet_account -- --ignored --nocapture
    #[test]
    #[ignore = "requires network access to the testnet mirror node"]
    fn test_fetch_testnet_account() {
        let gateway = MirrorGateway::from_config(&BridgeConfig::default()).unwrap();
        let doc = gateway.get("/accounts/0.0.98").expect("account document");
        assert_eq!(doc.get("account").and_then(|a| a.as_str()), Some("0.0.98"));
    }
}
