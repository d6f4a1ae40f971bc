//! `substitute` - fill `#hedera-...#` variables in a text.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use hedera_bridge::{BridgeConfig, ExecutionContext, VariableDispatcher};
use serde::Serialize;

use super::{mirror_dispatcher, output::print_json};

#[derive(Parser, Debug)]
pub struct SubstituteCmd {
    /// Text to fill
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file (stdin when neither --text nor --file is given)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Serialize)]
struct SubstituteOutput {
    text: String,
    variables: Vec<String>,
    unresolved: Vec<String>,
    failed: Vec<FailedVariable>,
}

#[derive(Serialize)]
struct FailedVariable {
    path: String,
    kind: String,
    error: String,
}

impl SubstituteCmd {
    fn input(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()));
        }
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read text from stdin")?;
        Ok(text)
    }

    pub fn execute(&self, config: BridgeConfig, json_output: bool) -> Result<()> {
        let text = self.input()?;
        let dispatcher = mirror_dispatcher();
        let ctx = ExecutionContext::new(config);
        let substitution = dispatcher.substitute(&text, &ctx);

        if json_output {
            print_json(&SubstituteOutput {
                variables: VariableDispatcher::variables_in(&text),
                unresolved: VariableDispatcher::variables_in(&substitution.text),
                failed: substitution
                    .failures
                    .iter()
                    .map(|(path, err)| FailedVariable {
                        path: path.clone(),
                        kind: err.kind().to_string(),
                        error: err.to_string(),
                    })
                    .collect(),
                text: substitution.text.clone(),
            })?;
        } else {
            print!("{}", substitution.text);
            if !substitution.text.ends_with('\n') {
                println!();
            }
        }

        for (path, err) in &substitution.failures {
            eprintln!("{}: {}", path, err);
        }
        if !substitution.is_clean() {
            bail!(
                "{} of {} variables failed to resolve",
                substitution.failures.len(),
                VariableDispatcher::variables_in(&text).len()
            );
        }
        Ok(())
    }
}
