//! Call command implementation

use anyhow::Result;
use colored::Colorize as _;
use fx_probe::Target;
use fx_probe::config::TargetConfig;
use fx_probe::verify::verify_once;

pub fn call(config: &TargetConfig) -> Result<()> {
    let target = Target::from_config(config)?;
    println!("{} `{}` from {}", "Calling".green().bold(), config.symbol, target.describe());

    let entry = target.entry_point(&config.symbol)?;
    let value = verify_once(&entry, config.expected)?;

    println!("  {} returned {}", "✓".green(), value.to_string().bold());
    Ok(())
}
