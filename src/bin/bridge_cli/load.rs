//! `load` - bind entity attributes to named form fields.

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use hedera_bridge::{BridgeConfig, EntityKind, ExecutionContext, FormLoader, Outcome};

use super::{mirror_dispatcher, output::print_json};

#[derive(Parser, Debug)]
pub struct LoadCmd {
    /// Entity kind: account, token, topic, transaction or schedule
    pub kind: String,

    /// Entity id
    pub id: String,

    /// Form field binding as NAME=ATTRIBUTE (repeatable)
    #[arg(long = "field", value_name = "NAME=ATTRIBUTE", required = true)]
    pub fields: Vec<String>,
}

fn parse_field(raw: &str) -> Result<(&str, &str)> {
    let (name, attribute) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid --field '{}': expected NAME=ATTRIBUTE", raw))?;
    let (name, attribute) = (name.trim(), attribute.trim());
    if name.is_empty() || attribute.is_empty() {
        bail!("Invalid --field '{}': expected NAME=ATTRIBUTE", raw);
    }
    Ok((name, attribute))
}

impl LoadCmd {
    fn loader(&self) -> Result<FormLoader> {
        let kind: EntityKind = self.kind.parse()?;
        let mut loader = FormLoader::new(kind, self.id.as_str());
        for raw in &self.fields {
            let (name, attribute) = parse_field(raw)?;
            loader = loader.field(name, attribute);
        }
        Ok(loader)
    }

    pub fn execute(&self, config: BridgeConfig, json_output: bool) -> Result<()> {
        let loader = self.loader()?;
        let dispatcher = mirror_dispatcher();
        let ctx = ExecutionContext::new(config);

        let rows = match dispatcher.harness().load_rows(&loader, &ctx) {
            Outcome::Completed(rows) => rows,
            Outcome::Aborted(reason) => {
                tracing::debug!(%reason, "form load skipped");
                Vec::new()
            }
            Outcome::Failed(err) => bail!("Failed to load {} {}: {}", loader.kind, loader.entity_id, err),
        };

        if json_output {
            return print_json(&rows);
        }
        for row in &rows {
            for (field, value) in &row.values {
                println!("{}\t{}", field, value);
            }
        }
        Ok(())
    }
}
