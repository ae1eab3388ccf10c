//! Runtime loading of shared libraries

use crate::entry::{EntryFn, EntryPoint};
use crate::error::{ProbeError, Result};
use libloading::Library;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A shared library mapped into the process
pub struct NativeLibrary {
    /// Path the library was opened from
    path: PathBuf,

    /// File name, used to label entry points
    name: String,

    library: Library,
}

impl NativeLibrary {
    /// Loads the library at `path`
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::LibraryLoad`] if the loader rejects the file.
    #[allow(unsafe_code, reason = "dynamic loading is inherently unsafe")]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), "loading library");

        // SAFETY: loading runs the library's initialisers. The probe is only
        // pointed at libraries the user asked for, which is the whole contract
        // of a loader.
        let library = unsafe { Library::new(&path) }.map_err(|source| ProbeError::LibraryLoad {
            path: path.clone(),
            source,
        })?;

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

        Ok(Self { path, name, library })
    }

    /// Resolves `symbol` as an [`EntryFn`]
    ///
    /// The symbol is trusted to have the `int32_t (void)` signature; there is
    /// no way to check this through a loader.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::SymbolMissing`] if the library does not export it.
    #[allow(unsafe_code, reason = "symbol lookup asserts the foreign signature")]
    pub fn entry_point(&self, symbol: &str) -> Result<EntryPoint<'_>> {
        // SAFETY: the returned pointer is copied out of the `Symbol` but its
        // `EntryPoint` borrows `self`, so it cannot outlive the mapping.
        let func = unsafe { self.library.get::<EntryFn>(symbol.as_bytes()) }
            .map(|resolved| *resolved)
            .map_err(|source| ProbeError::SymbolMissing {
                symbol: symbol.to_string(),
                path: self.path.clone(),
                source,
            })?;

        debug!(symbol, library = %self.name, "resolved entry point");
        Ok(EntryPoint::new(&self.name, func))
    }

    /// Path the library was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the library
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Platform file name of a cdylib with the given crate name
///
/// `fx_answer` becomes `libfx_answer.so`, `libfx_answer.dylib` or
/// `fx_answer.dll`.
pub fn library_file_name(stem: &str) -> OsString {
    libloading::library_filename(stem)
}
