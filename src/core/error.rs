//! Typed failures of the bridge

use super::operation::Operation;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error(
        "quilt_rs library location is not configured (set QUILT_RS_LIBRARY or QUILT_RS_LIBRARY_DIR)"
    )]
    NotConfigured,

    #[error("quilt_rs library not found at {}", .path.display())]
    LibraryNotFound { path: PathBuf },

    #[error("failed to load {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    #[error("symbol `{symbol}` missing from quilt_rs: {reason}")]
    MissingSymbol { symbol: &'static str, reason: String },

    #[error("{operation}: argument `{argument}` contains a NUL byte")]
    InteriorNul { operation: Operation, argument: &'static str },

    #[error(
        "{operation} failed: {}",
        .message.as_deref().unwrap_or("no error message from quilt_rs")
    )]
    Native { operation: Operation, message: Option<String> },

    #[error("{operation} returned a non UTF-8 result")]
    InvalidUtf8 { operation: Operation },
}

impl BridgeError {
    /// Whether the error happened while linking the library rather than during a call.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            BridgeError::NotConfigured
                | BridgeError::LibraryNotFound { .. }
                | BridgeError::Load { .. }
                | BridgeError::MissingSymbol { .. }
        )
    }

    /// Java exception class thrown when this error crosses the JNI boundary.
    pub fn java_exception_class(&self) -> &'static str {
        match self {
            e if e.is_load_failure() => "java/lang/UnsatisfiedLinkError",
            BridgeError::InteriorNul { .. } => "java/lang/IllegalArgumentException",
            _ => "java/lang/RuntimeException",
        }
    }
}
