//! Mirror node endpoints per network partition.

use hedera_types::{BridgeConfig, MirrorProvider, Network};

const MAINNET_MIRROR: &str = "https://mainnet-public.mirrornode.hedera.com/api/v1";
const TESTNET_MIRROR: &str = "https://testnet.mirrornode.hedera.com/api/v1";
const PREVIEWNET_MIRROR: &str = "https://previewnet.mirrornode.hedera.com/api/v1";

const ARKHIA_MIRROR_TEMPLATE: &str = "https://pool.arkhia.io/hedera/{network}/api/v1";

/// Header carrying the alternate provider's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

pub fn default_mirror_endpoint(network: Network) -> &'static str {
    match network {
        Network::Mainnet => MAINNET_MIRROR,
        Network::Testnet => TESTNET_MIRROR,
        Network::Previewnet => PREVIEWNET_MIRROR,
    }
}

pub fn provider_mirror_endpoint(network: Network, provider: MirrorProvider) -> String {
    match provider {
        MirrorProvider::Public => default_mirror_endpoint(network).to_string(),
        MirrorProvider::Arkhia => ARKHIA_MIRROR_TEMPLATE.replace("{network}", network.as_str()),
    }
}

/// Base URL the gateway should use, honouring an explicit `mirror_url` override.
///
/// Trailing slashes are trimmed so callers can always append `/accounts/...`.
pub fn resolve_mirror_endpoint(config: &BridgeConfig) -> String {
    let base = match config.mirror_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => provider_mirror_endpoint(config.network, config.mirror_provider),
    };
    base.trim_end_matches('/').to_string()
}

/// The API key to attach, if the selected provider authenticates.
pub fn resolve_api_key(config: &BridgeConfig) -> Option<String> {
    if !config.mirror_provider.requires_api_key() {
        return None;
    }
    config
        .mirror_api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}
