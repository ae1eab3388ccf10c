//! Probe configuration (`Probe.toml`)

use crate::error::{ProbeError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for by [`ProbeConfig::find_in_dir`]
pub const CONFIG_FILE_NAME: &str = "Probe.toml";

/// Full probe configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// What to call
    #[serde(default)]
    pub target: TargetConfig,

    /// How hard to call it
    #[serde(default)]
    pub stress: StressConfig,
}

/// Where the entry point comes from and what it should return
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Shared library to load; `None` probes the statically linked fixture
    #[serde(default)]
    pub library: Option<PathBuf>,

    /// Exported symbol to resolve
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Value every call must return
    #[serde(default = "default_expected")]
    pub expected: i32,
}

fn default_symbol() -> String {
    fx_answer::ENTRY_POINT_SYMBOL.to_string()
}

fn default_expected() -> i32 {
    fx_answer::ANSWER
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            library: None,
            symbol: default_symbol(),
            expected: default_expected(),
        }
    }
}

/// Concurrent call settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StressConfig {
    /// Total number of calls
    #[serde(default = "default_calls")]
    pub calls: usize,

    /// Worker threads; `None` lets the pool pick one per core
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_calls() -> usize {
    1000
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            calls: default_calls(),
            threads: None,
        }
    }
}

impl StressConfig {
    /// Checks the settings describe at least one call on at least one thread
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidConfig`] otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.calls == 0 {
            return Err(ProbeError::invalid_config("stress.calls must be at least 1"));
        }
        if self.threads == Some(0) {
            return Err(ProbeError::invalid_config("stress.threads must be at least 1"));
        }
        Ok(())
    }
}

impl ProbeConfig {
    /// Parses configuration from TOML text
    ///
    /// `origin` names the source in error messages. Relative library paths
    /// are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ConfigParse`] on malformed TOML or unknown keys.
    pub fn parse(contents: &str, origin: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|source| ProbeError::ConfigParse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Loads configuration from a file
    ///
    /// A relative `target.library` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::ConfigRead`] or [`ProbeError::ConfigParse`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ProbeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse(&contents, &path.display().to_string())?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Loads `Probe.toml` from a directory
    ///
    /// # Errors
    ///
    /// See [`ProbeConfig::from_file`].
    pub fn find_in_dir(dir: &Path) -> Result<Self> {
        Self::from_file(&dir.join(CONFIG_FILE_NAME))
    }

    /// Makes a relative library path absolute with respect to `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        if let Some(library) = self.target.library.as_ref().filter(|library| library.is_relative()) {
            self.target.library = Some(base.join(library));
        }
    }

    /// Checks the configuration describes a probe that can run
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidConfig`] for an empty symbol, zero calls
    /// or zero threads.
    pub fn validate(&self) -> Result<()> {
        if self.target.symbol.trim().is_empty() {
            return Err(ProbeError::invalid_config("target.symbol must not be empty"));
        }
        self.stress.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ProbeConfig::parse("", "<empty>").unwrap();

        assert_eq!(config, ProbeConfig::default());
        assert_eq!(config.target.symbol, "fixture_entry_point");
        assert_eq!(config.target.expected, 42);
        assert_eq!(config.target.library, None);
        assert_eq!(config.stress.calls, 1000);
        assert_eq!(config.stress.threads, None);
    }

    #[test]
    fn parses_all_fields() {
        let config = ProbeConfig::parse(
            r#"
            [target]
            library = "/opt/fx/libfx_answer.so"
            symbol = "other_entry"
            expected = 7

            [stress]
            calls = 64
            threads = 4
            "#,
            "<inline>",
        )
        .unwrap();

        assert_eq!(config.target.library, Some(PathBuf::from("/opt/fx/libfx_answer.so")));
        assert_eq!(config.target.symbol, "other_entry");
        assert_eq!(config.target.expected, 7);
        assert_eq!(config.stress.calls, 64);
        assert_eq!(config.stress.threads, Some(4));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ProbeConfig::parse("[target]\nsymbl = \"typo\"\n", "<typo>").unwrap_err();
        assert!(matches!(err, ProbeError::ConfigParse { ref origin, .. } if origin == "<typo>"));
    }

    #[test]
    fn validation_rejects_impossible_probes() {
        let mut config = ProbeConfig::default();
        assert!(config.validate().is_ok());

        config.stress.calls = 0;
        assert!(matches!(config.validate(), Err(ProbeError::InvalidConfig { .. })));

        config.stress.calls = 10;
        config.stress.threads = Some(0);
        assert!(matches!(config.validate(), Err(ProbeError::InvalidConfig { .. })));

        config.stress.threads = Some(2);
        config.target.symbol = "  ".to_string();
        assert!(matches!(config.validate(), Err(ProbeError::InvalidConfig { .. })));
    }

    #[test]
    fn relative_library_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[target]\nlibrary = \"lib/libfx_answer.so\"\n",
        )
        .unwrap();

        let config = ProbeConfig::find_in_dir(dir.path()).unwrap();
        assert_eq!(config.target.library, Some(dir.path().join("lib/libfx_answer.so")));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProbeConfig::find_in_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigRead { .. }));
    }
}
