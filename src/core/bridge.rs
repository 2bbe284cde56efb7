//! Owning handle over the loaded `quilt_rs` library

use super::config::BridgeConfig;
use super::error::BridgeError;
use super::operation::Operation;
use libloading::Library;
use log::{debug, error, info, warn};
use std::ffi::{CStr, CString};
use std::fmt;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};

pub(crate) type CommitFn =
    unsafe extern "C" fn(*const c_char, *const c_char, *const c_char) -> *mut c_char;
pub(crate) type PairFn = unsafe extern "C" fn(*const c_char, *const c_char) -> *mut c_char;
pub(crate) type StringFreeFn = unsafe extern "C" fn(*mut c_char);
pub(crate) type LastErrorFn = unsafe extern "C" fn() -> *const c_char;

pub(crate) const STRING_FREE_SYMBOL: &str = "quilt_string_free";
pub(crate) const LAST_ERROR_SYMBOL: &str = "quilt_last_error";

/// Entry points resolved from the library.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NativeSymbols {
    pub(crate) commit: CommitFn,
    pub(crate) install: PairFn,
    pub(crate) push: PairFn,
    pub(crate) string_free: StringFreeFn,
    pub(crate) last_error: Option<LastErrorFn>,
}

impl NativeSymbols {
    /// # Safety
    /// The exports of `library` must have the signatures above, and the
    /// resolved pointers are valid only while `library` stays loaded.
    unsafe fn resolve(library: &Library) -> Result<Self, BridgeError> {
        unsafe {
            Ok(Self {
                commit: required(library, Operation::Commit.symbol())?,
                install: required(library, Operation::Install.symbol())?,
                push: required(library, Operation::Push.symbol())?,
                string_free: required(library, STRING_FREE_SYMBOL)?,
                last_error: optional(library, LAST_ERROR_SYMBOL),
            })
        }
    }
}

unsafe fn required<T: Copy>(library: &Library, symbol: &'static str) -> Result<T, BridgeError> {
    unsafe { library.get::<T>(symbol.as_bytes()) }
        .map(|sym| *sym)
        .map_err(|e| BridgeError::MissingSymbol {
            symbol,
            reason: e.to_string(),
        })
}

unsafe fn optional<T: Copy>(library: &Library, symbol: &'static str) -> Option<T> {
    match unsafe { library.get::<T>(symbol.as_bytes()) } {
        Ok(sym) => Some(*sym),
        Err(_) => {
            debug!("optional symbol `{}` not exported", symbol);
            None
        },
    }
}

/// A loaded `quilt_rs` library and its resolved entry points.
///
/// Dropping the handle unloads the library. Calls run synchronously on the
/// caller's thread; whether `quilt_rs` tolerates concurrent calls is up to it.
pub struct NativeBridge {
    symbols: NativeSymbols,
    library_path: PathBuf,
    // Must outlive `symbols`, so it is declared (and dropped) last.
    _library: Option<Library>,
}

impl NativeBridge {
    /// Links the library named by `config` and resolves its exports.
    ///
    /// Relative paths are taken from the working directory, never from the
    /// linker's search path. A path that is not an existing file is rejected
    /// before the dynamic linker is invoked.
    pub fn load(config: &BridgeConfig) -> Result<Self, BridgeError> {
        let path = config.library_path();

        let result = Self::open(path);
        match &result {
            Ok(bridge) => info!("loaded quilt_rs from {}", bridge.library_path().display()),
            Err(e) => error!("{}", e),
        }
        result
    }

    fn open(path: &Path) -> Result<Self, BridgeError> {
        let path = absolute_library_path(path)?;
        if !path.is_file() {
            return Err(BridgeError::LibraryNotFound { path });
        }

        // Runs the library's initialisers.
        let library = unsafe { Library::new(&path) }.map_err(|e| BridgeError::Load {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let symbols = unsafe { NativeSymbols::resolve(&library)? };

        Ok(Self {
            symbols,
            library_path: path,
            _library: Some(library),
        })
    }

    /// Bridge over symbols that are not backed by a loaded library.
    #[cfg(test)]
    pub(crate) fn from_symbols(symbols: NativeSymbols) -> Self {
        Self {
            symbols,
            library_path: PathBuf::from("<in-process>"),
            _library: None,
        }
    }

    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    pub fn commit(
        &self,
        domain: &str,
        namespace: &str,
        message: &str,
    ) -> Result<String, BridgeError> {
        let op = Operation::Commit;
        let domain = c_arg(op, "domain", domain)?;
        let namespace = c_arg(op, "namespace", namespace)?;
        let message = c_arg(op, "message", message)?;

        debug!("calling {}", op.symbol());
        let raw = unsafe {
            (self.symbols.commit)(domain.as_ptr(), namespace.as_ptr(), message.as_ptr())
        };
        self.take_result(op, raw)
    }

    pub fn install(&self, domain: &str, uri: &str) -> Result<String, BridgeError> {
        let op = Operation::Install;
        let domain = c_arg(op, "domain", domain)?;
        let uri = c_arg(op, "uri", uri)?;

        debug!("calling {}", op.symbol());
        let raw = unsafe { (self.symbols.install)(domain.as_ptr(), uri.as_ptr()) };
        self.take_result(op, raw)
    }

    pub fn push(&self, domain: &str, namespace: &str) -> Result<String, BridgeError> {
        let op = Operation::Push;
        let domain = c_arg(op, "domain", domain)?;
        let namespace = c_arg(op, "namespace", namespace)?;

        debug!("calling {}", op.symbol());
        let raw = unsafe { (self.symbols.push)(domain.as_ptr(), namespace.as_ptr()) };
        self.take_result(op, raw)
    }

    /// Copies a returned string and hands the pointer back to `quilt_string_free`.
    fn take_result(&self, operation: Operation, raw: *mut c_char) -> Result<String, BridgeError> {
        if raw.is_null() {
            let message = self.last_error();
            warn!(
                "{} returned NULL: {}",
                operation.symbol(),
                message.as_deref().unwrap_or("<no message>")
            );
            return Err(BridgeError::Native { operation, message });
        }

        let result = unsafe { CStr::from_ptr(raw) }
            .to_str()
            .map(str::to_owned)
            .map_err(|_| BridgeError::InvalidUtf8 { operation });

        // freed even when the payload was rejected
        unsafe { (self.symbols.string_free)(raw) };

        result
    }

    fn last_error(&self) -> Option<String> {
        let last_error = self.symbols.last_error?;
        let raw = unsafe { last_error() };
        if raw.is_null() {
            return None;
        }

        // Borrowed from the library, never freed here.
        Some(unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned())
    }
}

impl fmt::Debug for NativeBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBridge")
            .field("library_path", &self.library_path)
            .field("has_last_error", &self.symbols.last_error.is_some())
            .finish_non_exhaustive()
    }
}

/// Anchors `path` to the working directory.
///
/// The dynamic linker searches its own directories for a bare file name, which
/// is not the file the existence check looked at.
pub(crate) fn absolute_library_path(path: &Path) -> Result<PathBuf, BridgeError> {
    std::path::absolute(path).map_err(|_| BridgeError::LibraryNotFound {
        path: path.to_path_buf(),
    })
}

#[inline]
fn c_arg(
    operation: Operation,
    argument: &'static str,
    value: &str,
) -> Result<CString, BridgeError> {
    CString::new(value).map_err(|_| BridgeError::InteriorNul { operation, argument })
}
