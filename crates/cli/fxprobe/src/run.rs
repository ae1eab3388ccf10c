//! Run command implementation

use anyhow::{Context as _, Result};
use colored::Colorize as _;
use fx_probe::config::ProbeConfig;
use std::env;
use std::path::Path;

pub fn run(config_path: Option<&Path>, project_dir: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, project_dir)?;

    println!("{} `{}`", "Probing".green().bold(), config.target.symbol);
    let report = fx_probe::run(&config)?;

    println!("  {} target: {}", "✓".green(), report.target);
    println!("  {} single call returned {}", "✓".green(), report.value.to_string().bold());
    println!(
        "  {} {} concurrent calls on {} threads agreed in {:?}",
        "✓".green(),
        report.stress.calls,
        report.stress.threads,
        report.stress.elapsed
    );
    println!("{} probe passed", "Finished".green().bold());

    Ok(())
}

fn load_config(config_path: Option<&Path>, project_dir: Option<&Path>) -> Result<ProbeConfig> {
    if let Some(path) = config_path {
        return Ok(ProbeConfig::from_file(path)?);
    }

    let dir = project_dir.map_or_else(
        || env::current_dir().context("Failed to determine current directory"),
        |dir| Ok(dir.to_path_buf()),
    )?;
    Ok(ProbeConfig::find_in_dir(&dir)?)
}
