//! Output formatting shared by the subcommands.

use anyhow::Result;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One resolved value per line; null renders as an empty line (or `null` in JSON).
pub fn format_value(value: Option<&str>, json_output: bool) -> Result<String> {
    if json_output {
        return Ok(serde_json::to_string(&value)?);
    }
    Ok(value.unwrap_or_default().to_string())
}
