//! Integration test utilities for the fx probe

use anyhow::{Context as _, Result};
use fx_probe::config::{CONFIG_FILE_NAME, ProbeConfig};
use fx_probe::library::library_file_name;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory holding a `Probe.toml`
pub struct ConfigFixture {
    dir: TempDir,
}

impl ConfigFixture {
    /// Creates an empty fixture directory
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("Failed to create fixture directory")?;
        Ok(Self { dir })
    }

    /// Writes `contents` as the fixture's `Probe.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn with_config(self, contents: &str) -> Result<Self> {
        fs::write(self.config_path(), contents).context("Failed to write Probe.toml")?;
        Ok(self)
    }

    /// Directory of the fixture
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the fixture's `Probe.toml`
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(CONFIG_FILE_NAME)
    }

    /// Loads the fixture's configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or parsed
    pub fn load(&self) -> Result<ProbeConfig> {
        ProbeConfig::find_in_dir(self.dir()).context("Failed to load fixture config")
    }
}

/// Path of the fixture cdylib
///
/// Cargo writes the cdylib of a dependency into the same `deps` directory as
/// the test executable that depends on it.
///
/// # Errors
///
/// Returns an error if the running executable cannot be located
pub fn fixture_cdylib_path() -> Result<PathBuf> {
    let exe = env::current_exe().context("Failed to locate test executable")?;
    let deps = exe.parent().context("Test executable has no parent directory")?;
    Ok(deps.join(library_file_name("fx_answer")))
}

/// Shared library exporting a `int32_t (void)` symbol on this platform
///
/// Returns the library name and symbol. Only known for glibc Linux, where
/// `getpid` fits the signature.
pub fn system_library_with_int_symbol() -> Option<(&'static str, &'static str)> {
    cfg!(all(target_os = "linux", target_env = "gnu")).then_some(("libc.so.6", "getpid"))
}

#[allow(unsafe_code, reason = "declaring the C wrapper compiled by build.rs")]
unsafe extern "C" {
    safe fn fx_call_fixture_entry_point() -> i32;
}

/// Calls the fixture from C and from Rust, in that order
///
/// The C side is `wrappers/call_fixture.c`, compiled against
/// `fx-answer/include/fx_answer.h` and resolved to the Rust export at link
/// time.
pub fn call_fixture_both_ways() -> (i32, i32) {
    (fx_call_fixture_entry_point(), fx_answer::fixture_entry_point())
}
