//! fx probe CLI
//!
//! Calls the native entry point fixture, linked or loaded from a shared
//! library, and checks what it returns.

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "CLI tool needs to print to stdout/stderr"
)]

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use fx_probe::config::{StressConfig, TargetConfig};
use std::path::PathBuf;

mod call;
mod logger;
mod run;
mod stress;

#[derive(Parser)]
#[command(name = "fxprobe")]
#[command(about = "Probe a C-ABI entry point across the language boundary", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output (`RUST_LOG` takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Call the entry point once
    Call {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Call the entry point many times concurrently
    Stress {
        #[command(flatten)]
        target: TargetArgs,

        /// Number of calls
        #[arg(long, default_value_t = 1000)]
        calls: usize,

        /// Worker threads (default: one per core)
        #[arg(long)]
        threads: Option<usize>,
    },

    /// Run a full probe from a Probe.toml
    Run {
        /// Config file to use
        #[arg(long, conflicts_with = "project_dir")]
        config: Option<PathBuf>,

        /// Directory containing Probe.toml
        #[arg(long, short = 'C')]
        project_dir: Option<PathBuf>,
    },
}

/// Flags that pick the entry point
#[derive(Args)]
struct TargetArgs {
    /// Shared library to load instead of the linked fixture
    #[arg(long)]
    library: Option<PathBuf>,

    /// Symbol to resolve
    #[arg(long, default_value = fx_answer::ENTRY_POINT_SYMBOL)]
    symbol: String,

    /// Value every call must return
    #[arg(long, default_value_t = fx_answer::ANSWER, allow_negative_numbers = true)]
    expected: i32,
}

impl From<TargetArgs> for TargetConfig {
    fn from(args: TargetArgs) -> Self {
        Self {
            library: args.library,
            symbol: args.symbol,
            expected: args.expected,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match cli.command {
        Commands::Call { target } => call::call(&TargetConfig::from(target))?,
        Commands::Stress { target, calls, threads } => {
            stress::stress(&TargetConfig::from(target), &StressConfig { calls, threads })?;
        }
        Commands::Run { config, project_dir } => run::run(config.as_deref(), project_dir.as_deref())?,
    }

    Ok(())
}
