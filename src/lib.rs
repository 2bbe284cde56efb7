//! JNI bridge between `nextflow.quilt.jep.Quilt` and the `quilt_rs` native library.
//!
//! The JVM loads this crate as `libquilt_bridge`; the backing library is located
//! through [`core::BridgeConfig`] and linked once, on first use.

pub mod core;
pub mod ext;
pub mod jni_interface;
pub mod logger;

pub use crate::core::{BridgeConfig, BridgeError, NativeBridge, Operation, shared_bridge};
