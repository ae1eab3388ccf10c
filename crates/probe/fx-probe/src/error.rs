//! Errors raised while probing an entry point

use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use std::result;
use thiserror::Error;
use toml::de;

/// Result alias used throughout the probe
pub type Result<T> = result::Result<T, ProbeError>;

/// Probe failure with diagnostic information
#[derive(Error, Debug, Diagnostic)]
pub enum ProbeError {
    /// The configuration file could not be read
    #[error("failed to read config file {}", .path.display())]
    #[diagnostic(code(probe::config_read))]
    ConfigRead {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML or has unknown keys
    #[error("failed to parse config file {origin}")]
    #[diagnostic(code(probe::config_parse), help("see `Probe.toml` in the repository root for the layout"))]
    ConfigParse {
        /// Where the contents came from
        origin: String,
        /// Underlying TOML error
        #[source]
        source: de::Error,
    },

    /// The configuration parsed but describes an impossible probe
    #[error("invalid configuration: {reason}")]
    #[diagnostic(code(probe::invalid_config))]
    InvalidConfig {
        /// What is wrong with it
        reason: String,
    },

    /// The shared library could not be loaded
    #[error("failed to load library {}", .path.display())]
    #[diagnostic(
        code(probe::library_load),
        help("build the fixture with `cargo build -p fx-answer` and point at the cdylib it produces")
    )]
    LibraryLoad {
        /// Library path given to the loader
        path: PathBuf,
        /// Loader error
        #[source]
        source: libloading::Error,
    },

    /// The library loaded but does not export the symbol
    #[error("symbol `{symbol}` not found in {}", .path.display())]
    #[diagnostic(code(probe::symbol_missing))]
    SymbolMissing {
        /// Symbol that was looked up
        symbol: String,
        /// Library that was searched
        path: PathBuf,
        /// Loader error
        #[source]
        source: libloading::Error,
    },

    /// A single call returned the wrong value
    #[error("call {call} returned {actual}, expected {expected}")]
    #[diagnostic(code(probe::unexpected_value))]
    UnexpectedValue {
        /// Index of the offending call
        call: usize,
        /// Value the probe was configured to expect
        expected: i32,
        /// Value the entry point returned
        actual: i32,
    },

    /// One or more concurrent calls returned the wrong value
    #[error(
        "{mismatches} of {calls} concurrent calls disagreed with {expected} (first: call {first_call} returned {first_value})"
    )]
    #[diagnostic(code(probe::concurrent_mismatch))]
    ConcurrentMismatch {
        /// Number of calls that returned something else
        mismatches: usize,
        /// Total number of calls made
        calls: usize,
        /// Value the probe was configured to expect
        expected: i32,
        /// Lowest call index that disagreed
        first_call: usize,
        /// Value returned by that call
        first_value: i32,
    },

    /// The worker pool for concurrent calls could not be created
    #[error("failed to build thread pool")]
    #[diagnostic(code(probe::thread_pool))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ProbeError {
    /// Shorthand for [`ProbeError::InvalidConfig`]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig { reason: reason.into() }
    }
}
