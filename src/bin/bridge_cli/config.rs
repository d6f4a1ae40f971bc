//! `config` - show the effective configuration.

use anyhow::Result;
use clap::Parser;
use hedera_bridge::BridgeConfig;
use serde_json::Value;

use super::output::print_json;

#[derive(Parser, Debug)]
pub struct ConfigCmd {
    /// Also print where the default config file is looked up
    #[arg(long)]
    pub show_path: bool,
}

impl ConfigCmd {
    pub fn execute(&self, config: &BridgeConfig, json_output: bool) -> Result<()> {
        let shown = config.redacted_json();
        if json_output {
            return print_json(&shown);
        }

        if let Value::Object(fields) = &shown {
            for (key, value) in fields {
                let rendered = match value {
                    Value::Null => "-".to_string(),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                println!("{:<22} {}", key, rendered);
            }
        }
        if self.show_path {
            match BridgeConfig::default_path() {
                Some(path) => println!("{:<22} {}", "config_file", path.display()),
                None => println!("{:<22} -", "config_file"),
            }
        }
        Ok(())
    }
}
