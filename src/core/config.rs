//! Location of the backing `quilt_rs` library

use super::error::BridgeError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Full path to the shared object.
pub const LIBRARY_PATH_VAR: &str = "QUILT_RS_LIBRARY";
/// Directory holding the shared object under its platform file name.
pub const LIBRARY_DIR_VAR: &str = "QUILT_RS_LIBRARY_DIR";
/// Library name without platform prefix/suffix.
pub const LIBRARY_NAME: &str = "quilt_rs";

/// Captured from the build environment, used when nothing is set at runtime.
const BUILD_TIME_LIBRARY_PATH: Option<&str> = option_env!("QUILT_RS_LIBRARY");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    library_path: PathBuf,
}

impl BridgeConfig {
    pub fn new(library_path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: library_path.into(),
        }
    }

    pub fn from_env() -> Result<Self, BridgeError> {
        Self::resolve(|key| std::env::var_os(key))
    }

    /// Resolves the library location through `lookup`.
    ///
    /// Precedence: `QUILT_RS_LIBRARY`, then `QUILT_RS_LIBRARY_DIR` joined with the
    /// platform file name, then the build-time `QUILT_RS_LIBRARY`. Empty values
    /// count as unset.
    pub fn resolve<F>(lookup: F) -> Result<Self, BridgeError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(path) = non_empty(LIBRARY_PATH_VAR) {
            return Ok(Self::new(path));
        }

        if let Some(dir) = non_empty(LIBRARY_DIR_VAR) {
            return Ok(Self::new(
                PathBuf::from(dir).join(libloading::library_filename(LIBRARY_NAME)),
            ));
        }

        BUILD_TIME_LIBRARY_PATH
            .filter(|path| !path.is_empty())
            .map(Self::new)
            .ok_or(BridgeError::NotConfigured)
    }

    pub fn library_path(&self) -> &Path {
        &self.library_path
    }
}
