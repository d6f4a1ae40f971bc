//! Bridge configuration.
//!
//! The host platform owns the settings (network selector, operator credential,
//! alternate mirror provider); this module gives them one typed shape and the
//! layering rules:
//!
//! 1. Built-in defaults (`testnet`, public mirror, 30s/10s timeouts)
//! 2. A JSON config file (explicit path, else `<config_dir>/hedera-bridge/config.json`)
//! 3. `HEDERA_*` environment variables
//!
//! | Field | Environment variable |
//! |-------|----------------------|
//! | `network` | `HEDERA_NETWORK` |
//! | `operator_id` | `HEDERA_OPERATOR_ID` |
//! | `operator_key` | `HEDERA_OPERATOR_KEY` |
//! | `mirror_provider` | `HEDERA_MIRROR_PROVIDER` |
//! | `mirror_api_key` | `HEDERA_MIRROR_API_KEY` |
//! | `mirror_url` | `HEDERA_MIRROR_URL` |
//! | `timeout_secs` | `HEDERA_MIRROR_TIMEOUT_SECS` |
//! | `connect_timeout_secs` | `HEDERA_MIRROR_CONNECT_TIMEOUT_SECS` |

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::env_utils::{env_opt_string, env_var};
use crate::network::{MirrorProvider, Network};

pub const ENV_NETWORK: &str = "HEDERA_NETWORK";
pub const ENV_OPERATOR_ID: &str = "HEDERA_OPERATOR_ID";
pub const ENV_OPERATOR_KEY: &str = "HEDERA_OPERATOR_KEY";
pub const ENV_MIRROR_PROVIDER: &str = "HEDERA_MIRROR_PROVIDER";
pub const ENV_MIRROR_API_KEY: &str = "HEDERA_MIRROR_API_KEY";
pub const ENV_MIRROR_URL: &str = "HEDERA_MIRROR_URL";
pub const ENV_TIMEOUT_SECS: &str = "HEDERA_MIRROR_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "HEDERA_MIRROR_CONNECT_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const CONFIG_DIR_NAME: &str = "hedera-bridge";
const CONFIG_FILE_NAME: &str = "config.json";

/// Effective configuration for one bridge instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub network: Network,
    pub operator_id: Option<String>,
    pub operator_key: Option<String>,
    pub mirror_provider: MirrorProvider,
    pub mirror_api_key: Option<String>,
    /// Explicit mirror base URL; overrides the provider/network table when set.
    pub mirror_url: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            operator_id: None,
            operator_key: None,
            mirror_provider: MirrorProvider::default(),
            mirror_api_key: None,
            mirror_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("network", &self.network)
            .field("operator_id", &self.operator_id)
            .field("operator_key", &self.operator_key.as_ref().map(|_| "<redacted>"))
            .field("mirror_provider", &self.mirror_provider)
            .field("mirror_api_key", &self.mirror_api_key.as_ref().map(|_| "<redacted>"))
            .field("mirror_url", &self.mirror_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl BridgeConfig {
    /// Defaults overridden by the `HEDERA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Layer defaults, a config file and the environment.
    ///
    /// An explicit `path` must exist; the default location is used only if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(default_path) => Self::from_file(default_path)?,
                None => Self::default(),
            },
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// `<config_dir>/hedera-bridge/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(network) = env_opt_string(ENV_NETWORK) {
            self.network = network
                .parse()
                .with_context(|| format!("Invalid {}", ENV_NETWORK))?;
        }
        if let Some(provider) = env_opt_string(ENV_MIRROR_PROVIDER) {
            self.mirror_provider = provider
                .parse()
                .with_context(|| format!("Invalid {}", ENV_MIRROR_PROVIDER))?;
        }
        if let Some(id) = env_opt_string(ENV_OPERATOR_ID) {
            self.operator_id = Some(id);
        }
        if let Some(key) = env_opt_string(ENV_OPERATOR_KEY) {
            self.operator_key = Some(key);
        }
        if let Some(api_key) = env_opt_string(ENV_MIRROR_API_KEY) {
            self.mirror_api_key = Some(api_key);
        }
        if let Some(url) = env_opt_string(ENV_MIRROR_URL) {
            self.mirror_url = Some(url);
        }
        if let Some(secs) = env_var(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs;
        }
        if let Some(secs) = env_var(ENV_CONNECT_TIMEOUT_SECS) {
            self.connect_timeout_secs = secs;
        }
        Ok(())
    }

    /// Reject combinations the gateway cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.mirror_provider.requires_api_key()
            && self.mirror_url.is_none()
            && self.mirror_api_key.as_deref().map_or(true, str::is_empty)
        {
            bail!(
                "Mirror provider '{}' requires an API key ({})",
                self.mirror_provider,
                ENV_MIRROR_API_KEY
            );
        }
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            bail!("Mirror timeouts must be greater than zero");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn has_operator(&self) -> bool {
        self.operator_id.is_some() && self.operator_key.is_some()
    }

    /// JSON rendering with secrets masked, for `config` style diagnostics.
    pub fn redacted_json(&self) -> serde_json::Value {
        let mut shown = self.clone();
        if shown.operator_key.is_some() {
            shown.operator_key = Some("<redacted>".to_string());
        }
        if shown.mirror_api_key.is_some() {
            shown.mirror_api_key = Some("<redacted>".to_string());
        }
        serde_json::to_value(shown).unwrap_or(serde_json::Value::Null)
    }
}
