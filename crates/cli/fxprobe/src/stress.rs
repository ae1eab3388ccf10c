//! Stress command implementation

use anyhow::Result;
use colored::Colorize as _;
use fx_probe::Target;
use fx_probe::config::{StressConfig, TargetConfig};
use fx_probe::verify::verify_concurrent;

pub fn stress(config: &TargetConfig, settings: &StressConfig) -> Result<()> {
    let target = Target::from_config(config)?;
    println!(
        "{} `{}` from {} ({} calls)",
        "Stressing".green().bold(),
        config.symbol,
        target.describe(),
        settings.calls
    );

    let entry = target.entry_point(&config.symbol)?;
    let report = verify_concurrent(&entry, config.expected, settings)?;

    println!(
        "  {} {} calls on {} threads returned {} in {:?}",
        "✓".green(),
        report.calls,
        report.threads,
        report.value.to_string().bold(),
        report.elapsed
    );
    Ok(())
}
