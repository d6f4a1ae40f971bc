//! Ledger network partitions and mirror provider selection.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// One of the three isolated ledger environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Previewnet,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Testnet, Network::Previewnet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Previewnet => "previewnet",
        }
    }
}

impl FromStr for Network {
    type Err = anyhow::Error;

    /// Accepts the short forms (`main`, `test`, `preview`) that host platforms
    /// tend to store in plugin settings, as well as the full names.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            "previewnet" | "preview" => Ok(Network::Previewnet),
            other => Err(anyhow!(
                "Unknown network '{}': expected mainnet, testnet or previewnet",
                other
            )),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which REST mirror the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorProvider {
    /// The public mirror node operated for each network.
    #[default]
    Public,
    /// Arkhia's hosted mirror, authenticated with an `x-api-key` header.
    Arkhia,
}

impl MirrorProvider {
    pub fn requires_api_key(&self) -> bool {
        matches!(self, MirrorProvider::Arkhia)
    }
}

impl FromStr for MirrorProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "public" | "hedera" | "" => Ok(MirrorProvider::Public),
            "arkhia" => Ok(MirrorProvider::Arkhia),
            other => Err(anyhow!("Unknown mirror provider '{}'", other)),
        }
    }
}

impl fmt::Display for MirrorProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorProvider::Public => f.write_str("public"),
            MirrorProvider::Arkhia => f.write_str("arkhia"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_short_and_long_names() {
        assert_eq!("main".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("TESTNET".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!(" preview ".parse::<Network>().unwrap(), Network::Previewnet);
        assert!("devnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_network_serde_lowercase() {
        let json = serde_json::to_string(&Network::Previewnet).unwrap();
        assert_eq!(json, "\"previewnet\"");
        assert_eq!(Network::default(), Network::Testnet);
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!("Arkhia".parse::<MirrorProvider>().unwrap(), MirrorProvider::Arkhia);
        assert_eq!("public".parse::<MirrorProvider>().unwrap(), MirrorProvider::Public);
        assert!(MirrorProvider::Arkhia.requires_api_key());
        assert!("blockdaemon".parse::<MirrorProvider>().is_err());
    }
}
