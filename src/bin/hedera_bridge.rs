//! hedera-bridge: resolve Hedera ledger variables from the command line
//!
//! ## Commands
//!
//! - **resolve**: Resolve one or more variable paths
//! - **substitute**: Replace `#hedera-...#` variables inside a text
//! - **load**: Bind entity attributes to named form fields
//! - **config**: Print the effective configuration (secrets redacted)
//!
//! ## Example Usage
//!
//! ```bash
//! # Balance of an account in ℏ
//! hedera-bridge resolve 'hedera-account.[0.0.98].hbarBalance'
//!
//! # Token supply on mainnet, as JSON
//! hedera-bridge --network mainnet --json resolve 'hedera-token.[0.0.456858].totalSupply'
//!
//! # Fill a template
//! hedera-bridge substitute --text 'Memo: #hedera-account.[0.0.98].accountMemo#'
//!
//! # Load several fields at once
//! hedera-bridge load account 0.0.98 --field balance=hbarBalance --field memo=accountMemo
//! ```
//!
//! Logs go to stderr (`RUST_LOG` overrides the level); stdout carries only results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hedera_bridge::{BridgeConfig, Network};
use tracing_subscriber::EnvFilter;

mod bridge_cli;

use bridge_cli::{config::ConfigCmd, load::LoadCmd, resolve::ResolveCmd, substitute::SubstituteCmd};

#[derive(Parser)]
#[command(
    name = "hedera-bridge",
    author,
    version,
    about = "Resolve Hedera ledger variables",
    long_about = "Resolve variables such as hedera-account.[0.0.98].hbarBalance against the \
                  Hedera mirror node.\n\n\
                  Configuration is read from --config (or the default config file) and \
                  overridden by HEDERA_* environment variables."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Network partition: mainnet, testnet or previewnet (overrides config)
    #[arg(long, global = true)]
    network: Option<String>,

    /// JSON config file (default: <config dir>/hedera-bridge/config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Debug-level logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one or more variable paths
    Resolve(ResolveCmd),

    /// Replace #hedera-...# variables in a text
    Substitute(SubstituteCmd),

    /// Load entity attributes into named form fields
    Load(LoadCmd),

    /// Print the effective configuration
    Config(ConfigCmd),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(path: Option<&PathBuf>, network: Option<&str>) -> Result<BridgeConfig> {
    let mut config = BridgeConfig::load(path.map(PathBuf::as_path))?;
    if let Some(network) = network {
        config.network = network
            .parse::<Network>()
            .context("Invalid --network")?;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let Cli {
        command,
        network,
        config,
        json,
        verbose,
    } = Cli::parse();
    init_tracing(verbose);

    let config = load_config(config.as_ref(), network.as_deref())?;
    tracing::debug!(config = ?config, "configuration loaded");

    match command {
        Commands::Resolve(cmd) => cmd.execute(config, json),
        Commands::Substitute(cmd) => cmd.execute(config, json),
        Commands::Load(cmd) => cmd.execute(config, json),
        Commands::Config(cmd) => cmd.execute(&config, json),
    }
}
