//! `resolve` - resolve variable paths one by one.

use anyhow::{bail, Result};
use clap::Parser;
use hedera_bridge::{BridgeConfig, ExecutionContext, Resolution};

use super::{mirror_dispatcher, output::format_value};

#[derive(Parser, Debug)]
pub struct ResolveCmd {
    /// Variable paths, e.g. hedera-account.[0.0.98].hbarBalance
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<String>,
}

impl ResolveCmd {
    pub fn execute(&self, config: BridgeConfig, json_output: bool) -> Result<()> {
        let dispatcher = mirror_dispatcher();
        let ctx = ExecutionContext::new(config);

        let mut failures = 0;
        for path in &self.paths {
            let value = match dispatcher.resolve(path, &ctx) {
                Resolution::Resolved(value) => value,
                Resolution::NoMatch => None,
                Resolution::Failed(err) => {
                    eprintln!("{}: {}", path, err);
                    failures += 1;
                    None
                }
            };
            println!("{}", format_value(value.as_deref(), json_output)?);
        }

        if failures > 0 {
            bail!("{} of {} variables failed to resolve", failures, self.paths.len());
        }
        Ok(())
    }
}
