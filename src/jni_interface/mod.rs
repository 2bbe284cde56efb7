//! JNI interface implementations
//!
//! All JNI methods are centralized here for better organization.

pub mod quilt;

use crate::logger;
use jni::sys::{JNI_VERSION_1_6, JavaVM, jint};
use std::os::raw::c_void;

/// Installs logging when the JVM loads the bridge. The backing library is not
/// touched here; it is linked by the first Quilt call.
#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(_vm: *mut JavaVM, _reserved: *mut c_void) -> jint {
    logger::init();
    log::debug!("quilt_bridge loaded");
    JNI_VERSION_1_6
}
