//! Interop probe for the native entry point fixture
//!
//! Obtains a `int32_t (void)` entry point, either the one statically linked
//! from `fx-answer` or one resolved from a shared library at runtime, then
//! calls it once and concurrently and checks every result.
//!
//! ```no_run
//! use fx_probe::config::ProbeConfig;
//!
//! let report = fx_probe::run(&ProbeConfig::default())?;
//! assert_eq!(report.value, 42);
//! # Ok::<(), fx_probe::error::ProbeError>(())
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod library;
pub mod verify;

use config::{ProbeConfig, TargetConfig};
use entry::EntryPoint;
use error::Result;
use library::NativeLibrary;
use tracing::info;
use verify::StressReport;

/// Where an entry point is taken from
pub enum Target {
    /// The fixture linked into this binary
    Linked,

    /// A shared library loaded at runtime
    Dynamic(NativeLibrary),
}

impl Target {
    /// Opens the target described by `config`
    ///
    /// # Errors
    ///
    /// Returns [`error::ProbeError::LibraryLoad`] if a configured library
    /// cannot be loaded.
    pub fn from_config(config: &TargetConfig) -> Result<Self> {
        config
            .library
            .as_ref()
            .map_or_else(|| Ok(Self::Linked), |path| NativeLibrary::open(path).map(Self::Dynamic))
    }

    /// Resolves `symbol` in this target
    ///
    /// The linked target only exports the fixture, so asking it for any symbol
    /// other than `fixture_entry_point` is a configuration error.
    ///
    /// # Errors
    ///
    /// Returns [`error::ProbeError::InvalidConfig`] for an unknown symbol on the
    /// linked target and [`error::ProbeError::SymbolMissing`] for one missing
    /// from a library.
    pub fn entry_point(&self, symbol: &str) -> Result<EntryPoint<'_>> {
        match self {
            Self::Linked if symbol == fx_answer::ENTRY_POINT_SYMBOL => Ok(EntryPoint::linked()),
            Self::Linked => Err(error::ProbeError::invalid_config(format!(
                "symbol `{symbol}` is not available without a library; only `{}` is linked",
                fx_answer::ENTRY_POINT_SYMBOL
            ))),
            Self::Dynamic(library) => library.entry_point(symbol),
        }
    }

    /// Short description for reports
    pub fn describe(&self) -> String {
        match self {
            Self::Linked => "linked fixture".to_string(),
            Self::Dynamic(library) => library.path().display().to_string(),
        }
    }
}

/// Result of a full probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// Description of the probed target
    pub target: String,

    /// Symbol that was called
    pub symbol: String,

    /// Value returned by the single call
    pub value: i32,

    /// Concurrent check outcome
    pub stress: StressReport,
}

/// Runs a complete probe: validate, open, call once, call concurrently
///
/// # Errors
///
/// Returns the first [`error::ProbeError`] encountered.
pub fn run(config: &ProbeConfig) -> Result<ProbeReport> {
    config.validate()?;

    let target = Target::from_config(&config.target)?;
    let entry = target.entry_point(&config.target.symbol)?;
    info!(origin = %target.describe(), symbol = %config.target.symbol, "probing entry point");

    let value = verify::verify_once(&entry, config.target.expected)?;
    let stress = verify::verify_concurrent(&entry, config.target.expected, &config.stress)?;
    info!(calls = stress.calls, threads = stress.threads, "probe passed");

    Ok(ProbeReport {
        target: target.describe(),
        symbol: config.target.symbol.clone(),
        value,
        stress,
    })
}
